//! Per-entity status effect state machine.
//!
//! Each [`EffectType`] is either inactive or has exactly one live instance
//! backed by exactly one pending timer. Re-applying an effect cancels the old
//! timer and reverts its partial state before the new instance takes over.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::effect::{EffectApplication, EffectParams, EffectType, StatusEffectInstance};
use crate::combat::DamageKind;
use crate::state::{Tick, Vitals};
use crate::time::TimerQueue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EffectTimer {
    Expire(EffectType),
    DamageTick(EffectType),
}

/// Outcome of polling the controller, consumed by the runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatusEvent {
    /// A damage-over-time tick came due. The runtime routes it through the
    /// damage pipeline on the raw channel.
    DamageTick {
        effect: EffectType,
        damage: f32,
        kind: DamageKind,
    },
    Expired(EffectType),
}

#[derive(Clone, Debug, Default)]
pub struct StatusEffectController {
    active: HashMap<EffectType, StatusEffectInstance>,
    timers: TimerQueue<EffectTimer>,
}

impl StatusEffectController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatches an application to the matching `apply_*` call.
    pub fn apply(
        &mut self,
        vitals: &mut Vitals,
        application: EffectApplication,
        now: Tick,
    ) -> bool {
        let duration = application.duration;
        match application.params {
            EffectParams::Slow { factor } => self.apply_slow(vitals, factor, duration, now),
            EffectParams::Freeze => self.apply_freeze(vitals, duration, now),
            EffectParams::Stun {
                incoming_multiplier,
            } => self.apply_stun(vitals, duration, incoming_multiplier, now),
            EffectParams::Poison {
                tick_damage,
                interval,
            } => self.apply_poison(vitals, tick_damage, interval, duration, now),
            EffectParams::Burn {
                tick_damage,
                interval,
            } => self.apply_burn(vitals, tick_damage, interval, duration, now),
        }
    }

    /// Slows the entity to `1 - factor` of its speed (clamped to [0, 1]).
    pub fn apply_slow(
        &mut self,
        vitals: &mut Vitals,
        factor: f32,
        duration: Tick,
        now: Tick,
    ) -> bool {
        if vitals.is_dead() {
            return false;
        }
        self.supersede(vitals, EffectType::Slow);
        vitals.speed_modifier = (1.0 - factor).clamp(0.0, 1.0);
        self.start_timed(EffectParams::Slow { factor }, duration, now);
        true
    }

    pub fn apply_freeze(&mut self, vitals: &mut Vitals, duration: Tick, now: Tick) -> bool {
        if vitals.is_dead() {
            return false;
        }
        self.supersede(vitals, EffectType::Freeze);
        vitals.speed_modifier = 0.0;
        self.start_timed(EffectParams::Freeze, duration, now);
        true
    }

    /// Roots the entity and scales incoming damage by `incoming_multiplier`.
    ///
    /// Non-positive or non-finite multipliers are treated as 1 so the expiry
    /// division stays exact.
    pub fn apply_stun(
        &mut self,
        vitals: &mut Vitals,
        duration: Tick,
        incoming_multiplier: f32,
        now: Tick,
    ) -> bool {
        if vitals.is_dead() {
            return false;
        }
        self.supersede(vitals, EffectType::Stun);
        let incoming_multiplier = if incoming_multiplier.is_finite() && incoming_multiplier > 0.0 {
            incoming_multiplier
        } else {
            debug!(
                target: "game_core::status",
                incoming_multiplier,
                "ignoring invalid stun multiplier"
            );
            1.0
        };
        vitals.speed_modifier = 0.0;
        vitals.incoming_damage_multiplier *= incoming_multiplier;
        self.start_timed(
            EffectParams::Stun {
                incoming_multiplier,
            },
            duration,
            now,
        );
        true
    }

    pub fn apply_poison(
        &mut self,
        vitals: &mut Vitals,
        tick_damage: f32,
        interval: Tick,
        duration: Tick,
        now: Tick,
    ) -> bool {
        let interval = interval.max(Tick::new(1));
        self.start_damage_over_time(
            vitals,
            EffectParams::Poison {
                tick_damage,
                interval,
            },
            interval,
            duration,
            now,
        )
    }

    pub fn apply_burn(
        &mut self,
        vitals: &mut Vitals,
        tick_damage: f32,
        interval: Tick,
        duration: Tick,
        now: Tick,
    ) -> bool {
        let interval = interval.max(Tick::new(1));
        self.start_damage_over_time(
            vitals,
            EffectParams::Burn {
                tick_damage,
                interval,
            },
            interval,
            duration,
            now,
        )
    }

    /// Ends an effect early. Returns false if it was not active.
    pub fn remove_effect(&mut self, vitals: &mut Vitals, effect: EffectType) -> bool {
        let Some(instance) = self.active.remove(&effect) else {
            return false;
        };
        self.timers.cancel(instance.timer);
        revert(vitals, &instance.params);
        true
    }

    pub fn clear_all_effects(&mut self, vitals: &mut Vitals) {
        for effect in EffectType::ALL {
            self.remove_effect(vitals, effect);
        }
        self.timers.clear();
        vitals.speed_modifier = 1.0;
    }

    pub fn has_effect(&self, effect: EffectType) -> bool {
        self.active.contains_key(&effect)
    }

    pub fn instance(&self, effect: EffectType) -> Option<&StatusEffectInstance> {
        self.active.get(&effect)
    }

    /// Time left until the effect ends, or `None` if it is inactive.
    pub fn remaining(&self, effect: EffectType, now: Tick) -> Option<Tick> {
        self.active
            .get(&effect)
            .map(|instance| instance.expires_at - now)
    }

    pub fn active_effects(&self) -> impl Iterator<Item = EffectType> + '_ {
        EffectType::ALL
            .into_iter()
            .filter(|effect| self.active.contains_key(effect))
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of timers still pending. Always equals the number of active effects.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Fires every timer due at or before `now`.
    ///
    /// Damage ticks are scheduled from their own deadline, so a large step
    /// yields every tick that fell inside it. Ticks on a dead entity end the
    /// effect without producing damage.
    pub fn poll(&mut self, vitals: &mut Vitals, now: Tick) -> Vec<StatusEvent> {
        let mut events = Vec::new();
        while let Some((_, due, timer)) = self.timers.pop_due(now) {
            match timer {
                EffectTimer::Expire(effect) => {
                    if let Some(instance) = self.active.remove(&effect) {
                        revert(vitals, &instance.params);
                        trace!(target: "game_core::status", %effect, at = %due, "effect expired");
                        events.push(StatusEvent::Expired(effect));
                    }
                }
                EffectTimer::DamageTick(effect) => {
                    if vitals.is_dead() {
                        self.active.remove(&effect);
                        continue;
                    }
                    let Some(instance) = self.active.get_mut(&effect) else {
                        continue;
                    };
                    let (damage, interval) = match instance.params {
                        EffectParams::Poison {
                            tick_damage,
                            interval,
                        }
                        | EffectParams::Burn {
                            tick_damage,
                            interval,
                        } => (tick_damage, interval),
                        _ => continue,
                    };
                    instance.ticks_remaining = instance.ticks_remaining.saturating_sub(1);
                    let next = if instance.ticks_remaining > 0 {
                        EffectTimer::DamageTick(effect)
                    } else {
                        EffectTimer::Expire(effect)
                    };
                    instance.timer = self.timers.schedule(due + interval, next);
                    events.push(StatusEvent::DamageTick {
                        effect,
                        damage,
                        kind: effect.damage_kind().unwrap_or(DamageKind::Normal),
                    });
                }
            }
        }
        events
    }

    fn supersede(&mut self, vitals: &mut Vitals, effect: EffectType) {
        if self.remove_effect(vitals, effect) {
            trace!(target: "game_core::status", %effect, "superseding active effect");
        }
    }

    fn start_timed(&mut self, params: EffectParams, duration: Tick, now: Tick) {
        let effect = params.effect_type();
        let expires_at = now + duration;
        let timer = self.timers.schedule(expires_at, EffectTimer::Expire(effect));
        self.active.insert(
            effect,
            StatusEffectInstance {
                params,
                started_at: now,
                expires_at,
                timer,
                ticks_remaining: 0,
            },
        );
    }

    fn start_damage_over_time(
        &mut self,
        vitals: &mut Vitals,
        params: EffectParams,
        interval: Tick,
        duration: Tick,
        now: Tick,
    ) -> bool {
        if vitals.is_dead() {
            return false;
        }
        let effect = params.effect_type();
        self.supersede(vitals, effect);

        let ticks = duration.as_millis().div_ceil(interval.as_millis());
        if ticks == 0 {
            return false;
        }
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        let timer = self.timers.schedule(now, EffectTimer::DamageTick(effect));
        self.active.insert(
            effect,
            StatusEffectInstance {
                params,
                started_at: now,
                expires_at: now + Tick::new(interval.as_millis().saturating_mul(u64::from(ticks))),
                timer,
                ticks_remaining: ticks,
            },
        );
        true
    }
}

fn revert(vitals: &mut Vitals, params: &EffectParams) {
    if params.effect_type().affects_speed() {
        vitals.speed_modifier = 1.0;
    }
    if let EffectParams::Stun {
        incoming_multiplier,
    } = *params
    {
        vitals.incoming_damage_multiplier /= incoming_multiplier;
    }
}
