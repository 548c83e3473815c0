//! Full sessions over the bundled content.

use game_content::ContentFactory;
use game_core::Tick;
use proptest::prelude::*;
use runtime::{Event, Runtime, RuntimeError};

const STEP: Tick = Tick::new(100);

fn bundled_runtime(seed: u64) -> Runtime {
    let content = ContentFactory::bundled();
    Runtime::builder()
        .game_config(content.load_config().expect("bundled config"))
        .catalog(content.load_catalog().expect("bundled catalog"))
        .enemies(content.load_enemies().expect("bundled enemies"))
        .seed(seed)
        .build()
        .expect("runtime")
}

/// Plays `ticks` steps, always taking the first offer, and calls `inspect`
/// after every completed tick.
fn play(seed: u64, ticks: usize, mut inspect: impl FnMut(&Runtime)) -> Vec<Event> {
    let mut runtime = bundled_runtime(seed);
    let opening = runtime.build_initial_options(3);
    runtime.select_option(&opening[0]).expect("starter weapon");

    let mut events = Vec::new();
    for step in 0..ticks {
        if runtime.pending_choice().is_some() {
            runtime.pause();
            let options = runtime.build_options(3);
            let Some(option) = options.first() else {
                break;
            };
            runtime.select_option(option).expect("offered option applies");
            runtime.resume();
        }
        if step % 10 == 0 {
            runtime.spawn_around_hero(6.0);
        }
        match runtime.tick(STEP) {
            Ok(_) => inspect(&runtime),
            Err(RuntimeError::GameOver) => break,
            Err(err) => panic!("unexpected tick error: {err}"),
        }
        events.extend(runtime.drain_events());
    }
    events
}

#[test]
fn equal_seeds_replay_equal_runs() {
    let first = play(42, 300, |_| {});
    let second = play(42, 300, |_| {});
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn hero_health_stays_within_bounds(seed in any::<u64>()) {
        let mut violations = Vec::new();
        play(seed, 200, |runtime| {
            let vitals = &runtime.world().hero().vitals;
            if vitals.health < 0.0 || vitals.health > vitals.max_health {
                violations.push((runtime.now(), vitals.health, vitals.max_health));
            }
        });
        prop_assert!(violations.is_empty(), "out of bounds: {:?}", violations);
    }
}
