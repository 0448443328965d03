//! Property tests for the undo/redo history manager.
//!
//! 1. Spaced commits each make an undo step, bounded by `max_entries`
//! 2. A burst of commits inside the debounce window is one step
//! 3. Committing the present value changes nothing
//! 4. Any real commit clears the redo stack
//! 5. `past` never exceeds its bound under arbitrary operation sequences

use herocard_editor::{HistoryConfig, HistoryManager, ManualClock};
use proptest::prelude::*;

const DEBOUNCE_MS: u64 = 500;
const MAX_ENTRIES: usize = 50;

#[derive(Debug, Clone)]
enum Op {
    Commit(i32),
    Undo,
    Redo,
    Wait(u64),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0i32..20).prop_map(Op::Commit),
        2 => Just(Op::Undo),
        1 => Just(Op::Redo),
        2 => (0u64..1200).prop_map(Op::Wait),
        1 => Just(Op::Clear),
    ]
}

fn manager() -> (HistoryManager<i32, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let history = HistoryManager::with_clock(-1, HistoryConfig::default(), clock.clone());
    (history, clock)
}

fn apply(history: &mut HistoryManager<i32, ManualClock>, clock: &ManualClock, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Commit(v) => {
                history.commit(*v);
            }
            Op::Undo => {
                history.undo();
            }
            Op::Redo => {
                history.redo();
            }
            Op::Wait(ms) => clock.advance_ms(*ms),
            Op::Clear => history.clear_history(),
        }
    }
}

proptest! {
    #[test]
    fn spaced_commits_are_separate_steps(n in 1usize..120, gap in DEBOUNCE_MS..2000) {
        let (mut history, clock) = manager();
        for v in 0..n as i32 {
            prop_assert!(history.commit(v));
            clock.advance_ms(gap);
        }

        let steps = n.min(MAX_ENTRIES);
        prop_assert_eq!(history.past().len(), steps);
        prop_assert!(history.can_undo());

        for _ in 0..steps {
            prop_assert!(history.undo());
        }
        prop_assert!(!history.can_undo());
        if n <= MAX_ENTRIES {
            prop_assert_eq!(*history.present(), -1);
        } else {
            prop_assert_eq!(*history.present(), (n - MAX_ENTRIES - 1) as i32);
        }
    }

    #[test]
    fn burst_is_one_step(gaps in prop::collection::vec(0u64..DEBOUNCE_MS, 1..80)) {
        let (mut history, clock) = manager();
        for (i, gap) in gaps.iter().enumerate() {
            history.commit(i as i32);
            clock.advance_ms(*gap);
        }

        prop_assert_eq!(history.past().len(), 1);
        prop_assert_eq!(*history.present(), gaps.len() as i32 - 1);
        history.undo();
        prop_assert_eq!(*history.present(), -1);
    }

    #[test]
    fn committing_present_is_a_noop(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let (mut history, clock) = manager();
        apply(&mut history, &clock, &ops);

        let past = history.past().clone();
        let future = history.future().clone();
        let version = history.version();

        let present = *history.present();
        prop_assert!(!history.commit(present));
        prop_assert_eq!(history.past(), &past);
        prop_assert_eq!(history.future(), &future);
        prop_assert_eq!(history.version(), version);
    }

    #[test]
    fn commit_after_undo_clears_future(
        ops in prop::collection::vec(op_strategy(), 0..60),
        value in 100i32..200,
    ) {
        let (mut history, clock) = manager();
        history.commit(0);
        apply(&mut history, &clock, &ops);
        history.undo();

        prop_assert!(history.commit(value));
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn past_stays_bounded(ops in prop::collection::vec(op_strategy(), 0..400)) {
        let (mut history, clock) = manager();
        for op in &ops {
            apply(&mut history, &clock, std::slice::from_ref(op));
            prop_assert!(history.past().len() <= MAX_ENTRIES);
            prop_assert!(history.future().len() <= MAX_ENTRIES);
        }
    }
}
