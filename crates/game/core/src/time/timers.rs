use std::collections::{BTreeMap, HashMap};

use crate::state::Tick;

/// Handle to a scheduled timer. Stays unique for the lifetime of its queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Cancellable deadline queue keyed by absolute [`Tick`].
///
/// Timers due at the same instant fire in scheduling order. Cancelling removes
/// the entry immediately, so a cancelled timer can never fire afterwards.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    next_seq: u64,
    queue: BTreeMap<(Tick, u64), K>,
    deadlines: HashMap<u64, Tick>,
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, at: Tick, key: K) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((at, seq), key);
        self.deadlines.insert(seq, at);
        TimerHandle(seq)
    }

    /// Removes a pending timer, returning its payload if it had not fired yet.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<K> {
        let at = self.deadlines.remove(&handle.0)?;
        self.queue.remove(&(at, handle.0))
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    pub fn deadline(&self, handle: TimerHandle) -> Option<Tick> {
        self.deadlines.get(&handle.0).copied()
    }

    pub fn next_deadline(&self) -> Option<Tick> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    /// Pops the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Tick) -> Option<(TimerHandle, Tick, K)> {
        let (&(at, _), _) = self.queue.first_key_value()?;
        if at > now {
            return None;
        }
        let ((at, seq), key) = self.queue.pop_first()?;
        self.deadlines.remove(&seq);
        Some((TimerHandle(seq), at, key))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
