//! Fetch unit publication tests.

use std::sync::Arc;
use std::thread;

use ticker_dashboard::fetch::{Notifier, UnitContext};
use ticker_dashboard::{DashboardError, FetchUnit, Liveness, Phase, Section};

fn context() -> UnitContext {
    UnitContext {
        liveness: Liveness::new(),
        notifier: Arc::new(Notifier::default()),
    }
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn loaded_state_and_last_loaded_share_payload() {
    let unit: FetchUnit<Vec<u32>> = FetchUnit::new(Section::Performance);
    let ctx = context();
    unit.begin(&ctx);

    assert!(unit.resolve(Ok(vec![1, 2, 3]), &ctx));
    let state = unit.state();
    let payload = state.payload().unwrap();
    let last = unit.last_loaded().unwrap();
    assert!(Arc::ptr_eq(payload, &last));
}

#[test]
fn resolve_after_revoke_changes_nothing() {
    let unit: FetchUnit<Vec<u32>> = FetchUnit::new(Section::Performance);
    let ctx = context();
    let rx = ctx.notifier.subscribe();
    unit.begin(&ctx);
    ctx.liveness.revoke();

    assert!(!unit.resolve(Ok(vec![7]), &ctx));
    assert!(!unit.resolve(Err(DashboardError::InvalidArgument("late".into())), &ctx));
    assert!(unit.state().is_pending());
    assert!(unit.last_loaded().is_none());

    let phases: Vec<Phase> = rx.try_iter().map(|t| t.phase).collect();
    assert_eq!(phases, vec![Phase::Pending]);
}

#[test]
fn stale_context_cannot_replace_newer_payload() {
    let unit: FetchUnit<Vec<u32>> = FetchUnit::new(Section::Peaks);
    let old = context();
    unit.begin(&old);

    old.liveness.revoke();
    let new = context();
    unit.begin(&new);
    assert!(unit.resolve(Ok(vec![2]), &new));
    assert!(!unit.resolve(Ok(vec![1]), &old));

    assert_eq!(unit.last_loaded().as_deref(), Some(&vec![2]));
    assert_eq!(unit.state().payload().map(|p| p.as_slice()), Some(&[2][..]));
}

#[test]
fn nothing_is_published_once_fenced() {
    for round in 0..200u32 {
        let unit: FetchUnit<Vec<u32>> = FetchUnit::new(Section::Overview);
        let ctx = context();
        unit.begin(&ctx);

        let worker = {
            let unit = unit.clone();
            let ctx = ctx.clone();
            thread::spawn(move || unit.resolve(Ok(vec![round]), &ctx))
        };
        ctx.liveness.revoke();
        unit.fence();

        let loaded = unit.state().is_loaded();
        let kept = unit.last_loaded().is_some();
        assert_eq!(loaded, kept, "round {}", round);

        let published = worker.join().unwrap();
        assert_eq!(published, loaded, "round {}", round);
        assert_eq!(unit.state().is_loaded(), loaded, "round {}", round);
        assert_eq!(unit.last_loaded().is_some(), kept, "round {}", round);
    }
}
