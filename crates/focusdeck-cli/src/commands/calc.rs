use clap::Subcommand;
use focusdeck_core::calc::{evaluate, format_result, CalcHistory};
use focusdeck_core::clock::{Clock, SystemClock};
use focusdeck_core::stats::StatsLedger;
use focusdeck_core::storage::{Config, Database};

const HISTORY_KEY: &str = "calc_history";

#[derive(Subcommand)]
pub enum CalcAction {
    /// Evaluate an arithmetic expression
    Eval { expression: String },
    /// Show recent calculations, newest first
    History,
}

fn load_history(db: &Database, config: &Config) -> CalcHistory {
    if let Ok(Some(json)) = db.kv_get(HISTORY_KEY) {
        if let Ok(history) = serde_json::from_str::<CalcHistory>(&json) {
            return history;
        }
    }
    CalcHistory::new(config.history.capacity)
}

fn save_history(db: &Database, history: &CalcHistory) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(history)?;
    db.kv_set(HISTORY_KEY, &json)?;
    Ok(())
}

pub fn run(action: CalcAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();

    match action {
        CalcAction::Eval { expression } => {
            // Evaluation errors never touch statistics or history.
            let value = evaluate(&expression)?;
            let result = format_result(value);

            let mut history = load_history(&db, &config);
            history.push(expression, &result);
            save_history(&db, &history)?;

            let mut ledger = StatsLedger::load(&db);
            if let Err(e) = ledger.record_calculation(SystemClock.today()) {
                eprintln!("warning: stats write failed: {e}");
            }

            println!("{result}");
        }
        CalcAction::History => {
            let history = load_history(&db, &config);
            for entry in history.entries().rev() {
                println!(
                    "{} = {}  ({})",
                    entry.expression,
                    entry.result,
                    entry.at.format("%H:%M:%S")
                );
            }
        }
    }
    Ok(())
}
