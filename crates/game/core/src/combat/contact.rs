use rand::Rng;

use crate::state::{Combatant, Tick};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactOutcome {
    /// Target was dead or inside its invulnerability window.
    Ignored,
    Dodged,
    Hit { amount: f32, killed: bool },
}

/// Applies an enemy body hit to a defended target (the hero).
///
/// Contact hits bypass the crit roll. Order: invulnerability window, dodge
/// roll, incoming multiplier, flat reduction, then the grace window restarts.
pub fn apply_contact_damage<R: Rng + ?Sized>(
    target: &mut Combatant,
    amount: f32,
    now: Tick,
    rng: &mut R,
) -> ContactOutcome {
    if target.vitals.is_dead() || target.defense.is_invulnerable(now) {
        return ContactOutcome::Ignored;
    }

    let dodge = target.defense.dodge_chance.clamp(0.0, 1.0);
    if dodge > 0.0 && rng.gen_range(0.0f32..1.0) < dodge {
        return ContactOutcome::Dodged;
    }

    let reduction = target.defense.damage_reduction.clamp(0.0, 1.0);
    let amount = (amount * target.vitals.incoming_damage_multiplier * (1.0 - reduction)).max(0.0);

    let vitals = &mut target.vitals;
    vitals.health = (vitals.health - amount).clamp(0.0, vitals.max_health);
    target.defense.last_hit = Some(now);
    let killed = target.vitals.health <= 0.0 && target.vitals.mark_dead();
    ContactOutcome::Hit { amount, killed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Defense, EntityId, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hero() -> Combatant {
        Combatant::new(EntityId::HERO, Position::ORIGIN, 300.0)
            .with_defense(Defense::with_invulnerability(Tick::new(500)))
    }

    #[test]
    fn reduction_and_grace_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut hero = hero();
        hero.defense.damage_reduction = 0.25;

        let first = apply_contact_damage(&mut hero, 40.0, Tick::new(1_000), &mut rng);
        assert_eq!(first, ContactOutcome::Hit { amount: 30.0, killed: false });
        assert_eq!(hero.vitals.health, 270.0);

        let inside = apply_contact_damage(&mut hero, 40.0, Tick::new(1_400), &mut rng);
        assert_eq!(inside, ContactOutcome::Ignored);

        let after = apply_contact_damage(&mut hero, 40.0, Tick::new(1_500), &mut rng);
        assert!(matches!(after, ContactOutcome::Hit { .. }));
    }

    #[test]
    fn certain_dodge_avoids_damage() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut hero = hero();
        hero.defense.dodge_chance = 1.0;
        let outcome = apply_contact_damage(&mut hero, 40.0, Tick::ZERO, &mut rng);
        assert_eq!(outcome, ContactOutcome::Dodged);
        assert_eq!(hero.vitals.health, 300.0);
    }

    #[test]
    fn lethal_contact_kills_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut hero = hero();
        let outcome = apply_contact_damage(&mut hero, 1_000.0, Tick::ZERO, &mut rng);
        assert_eq!(outcome, ContactOutcome::Hit { amount: 1_000.0, killed: true });
        assert_eq!(
            apply_contact_damage(&mut hero, 1.0, Tick::new(10_000), &mut rng),
            ContactOutcome::Ignored
        );
    }
}
