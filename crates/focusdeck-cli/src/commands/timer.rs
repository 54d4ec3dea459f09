use clap::Subcommand;
use focusdeck_core::clock::{Clock, SystemClock};
use focusdeck_core::session::SessionController;
use focusdeck_core::stats::{StatsLedger, StatsStore};
use focusdeck_core::storage::{Config, Database};
use focusdeck_core::timer::CountdownEngine;

const ENGINE_KEY: &str = "countdown_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the focus session
    Start,
    /// Pause the running session
    Pause,
    /// Reset to a full session
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Advance the countdown by N simulated seconds
    Tick {
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Drive the countdown in the foreground until it completes
    Run,
}

fn load_engine(db: &Database, config: &Config) -> CountdownEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<CountdownEngine>(&json) {
            return engine;
        }
    }
    CountdownEngine::new(config.session.focus_duration * 60)
}

fn save_engine(db: &Database, engine: &CountdownEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

fn print_snapshot<S: StatsStore>(
    controller: &SessionController<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}

/// Run a 1-second tick loop until the session completes.
///
/// The engine itself never sees the clock; this loop is the periodic
/// driver, and a tick delivered after completion is a no-op.
fn run_foreground<S: StatsStore>(
    controller: &mut SessionController<S>,
    clock: &SystemClock,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        controller.start_session();
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        // The first interval tick fires immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            let (event, write) = controller.tick(clock.today());
            if let Err(e) = write {
                eprintln!("warning: stats write failed: {e}");
            }
            if let Some(event) = event {
                println!("{}", serde_json::to_string_pretty(&event)?);
                return Ok::<(), Box<dyn std::error::Error>>(());
            }
        }
    })?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let engine = load_engine(&db, &config);
    let ledger = StatsLedger::load(&db);
    let mut controller = SessionController::new(engine, ledger);
    let clock = SystemClock;

    match action {
        TimerAction::Start => {
            controller.start_session();
            print_snapshot(&controller)?;
        }
        TimerAction::Pause => {
            controller.pause_session();
            print_snapshot(&controller)?;
        }
        TimerAction::Reset => {
            controller.reset_session();
            print_snapshot(&controller)?;
        }
        TimerAction::Status => {
            print_snapshot(&controller)?;
        }
        TimerAction::Tick { count } => {
            for _ in 0..count {
                let (event, write) = controller.tick(clock.today());
                if let Err(e) = write {
                    eprintln!("warning: stats write failed: {e}");
                }
                if let Some(event) = event {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
            }
            print_snapshot(&controller)?;
        }
        TimerAction::Run => {
            run_foreground(&mut controller, &clock)?;
        }
    }

    save_engine(&db, controller.engine())?;
    Ok(())
}
