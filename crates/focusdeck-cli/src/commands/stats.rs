use clap::Subcommand;
use focusdeck_core::stats::StatsLedger;
use focusdeck_core::storage::{Config, Database};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show accumulated statistics
    Show,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();

    match action {
        StatsAction::Show => {
            let ledger = StatsLedger::load(&db);
            let record = ledger.record();
            let goal = u64::from(config.session.weekly_goal.max(1));
            let output = serde_json::json!({
                "stats": record,
                "weekly_goal": goal,
                "weekly_sessions": record.total_completed_sessions % goal,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
