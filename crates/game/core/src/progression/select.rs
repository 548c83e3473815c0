//! Level-up screen composition.
//!
//! 1. drop new-weapon offers when every weapon slot is taken
//! 2. deduplicate by option id
//! 3. put one random plain upgrade first, if any exists
//! 4. shuffle the rest together and fill, skipping ids already chosen
//! 5. backfill from any distinct candidate left

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::{OptionId, OptionKind, ProgressionOption};

pub fn pick_options<R: Rng + ?Sized>(
    candidates: Vec<ProgressionOption>,
    count: usize,
    weapon_slots_full: bool,
    rng: &mut R,
) -> Vec<ProgressionOption> {
    if count == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let distinct: Vec<ProgressionOption> = candidates
        .into_iter()
        .filter(|option| !(weapon_slots_full && option.kind == OptionKind::NewWeapon))
        .filter(|option| seen.insert(option.id.clone()))
        .collect();

    let mut upgrades: Vec<&ProgressionOption> = distinct
        .iter()
        .filter(|option| option.kind == OptionKind::Upgrade)
        .collect();

    let mut chosen: Vec<&ProgressionOption> = Vec::with_capacity(count);
    let mut used: HashSet<&OptionId> = HashSet::new();

    if !upgrades.is_empty() {
        let first = upgrades.remove(rng.gen_range(0..upgrades.len()));
        used.insert(&first.id);
        chosen.push(first);
    }

    let mut pool = upgrades;
    for kind in [
        OptionKind::Evolution,
        OptionKind::NewWeapon,
        OptionKind::WeaponUpgrade,
    ] {
        pool.extend(distinct.iter().filter(|option| option.kind == kind));
    }
    pool.shuffle(rng);

    for option in pool.into_iter().chain(distinct.iter()) {
        if chosen.len() >= count {
            break;
        }
        if used.insert(&option.id) {
            chosen.push(option);
        }
    }

    chosen.into_iter().cloned().collect()
}
