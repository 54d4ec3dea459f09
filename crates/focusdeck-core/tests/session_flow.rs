//! End-to-end flow through controller, ledger, and storage.

use chrono::NaiveDate;
use focusdeck_core::{
    CalcHistory, Clock, CountdownEngine, Database, Event, FixedClock, MemStore,
    SessionController, StatsLedger, TimerState,
};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn full_session_through_sqlite_store() {
    let db = Database::open_memory().unwrap();
    let mut controller =
        SessionController::new(CountdownEngine::new(1500), StatsLedger::load(&db));
    let clock = FixedClock(day("2024-05-10"));

    controller.start_session();
    let mut completions = 0;
    for _ in 0..1500 {
        let (event, write) = controller.tick(clock.today());
        write.unwrap();
        if matches!(event, Some(Event::SessionCompleted { .. })) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(controller.snapshot().state, TimerState::Idle);

    // A fresh ledger over the same database sees the durable record.
    let reloaded = StatsLedger::load(&db);
    assert_eq!(reloaded.record().total_completed_sessions, 1);
    assert_eq!(reloaded.record().total_focus_min, 25);
    assert_eq!(reloaded.record().streak, 1);
}

#[test]
fn streak_builds_across_restarts() {
    let store = MemStore::new();

    // Day one: complete a session.
    {
        let mut controller =
            SessionController::new(CountdownEngine::new(60), StatsLedger::load(&store));
        controller.start_session();
        for _ in 0..60 {
            controller.tick(day("2024-02-28")).1.unwrap();
        }
    }

    // Day two (leap-year boundary): a calculation keeps the streak going.
    {
        let mut controller =
            SessionController::new(CountdownEngine::new(60), StatsLedger::load(&store));
        controller.record_calculation(day("2024-02-29")).unwrap();
        assert_eq!(controller.stats().streak, 2);
    }

    // Two idle days later the next activity restarts the streak.
    {
        let mut controller =
            SessionController::new(CountdownEngine::new(60), StatsLedger::load(&store));
        controller.record_calculation(day("2024-03-02")).unwrap();
        let stats = controller.stats();
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.last_active_date, Some(day("2024-03-02")));
        assert_eq!(stats.total_calculations, 2);
        assert_eq!(stats.total_completed_sessions, 1);
    }
}

#[test]
fn calculation_flow_updates_ledger_and_history() {
    let db = Database::open_memory().unwrap();
    let mut ledger = StatsLedger::load(&db);
    let mut history = CalcHistory::default();

    for expr in ["2+3", "10/4", "6×7"] {
        let value = focusdeck_core::evaluate(expr).unwrap();
        history.push(expr, &focusdeck_core::calc::format_result(value));
        ledger.record_calculation(day("2024-05-10")).unwrap();
    }

    assert_eq!(ledger.record().total_calculations, 3);
    assert_eq!(ledger.record().streak, 1);
    assert_eq!(history.len(), 3);
    assert_eq!(history.latest().unwrap().result, "42");

    // A failed evaluation touches neither ledger nor history.
    assert!(focusdeck_core::evaluate("1/0").is_err());
    assert_eq!(ledger.record().total_calculations, 3);
    assert_eq!(history.len(), 3);
}
