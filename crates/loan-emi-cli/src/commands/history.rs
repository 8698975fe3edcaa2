use clap::Args;
use serde_json::Value;

use loan_emi_core::snapshot::load_history;

use crate::store::JsonFileStore;

/// Arguments for listing saved calculations
#[derive(Args)]
pub struct HistoryArgs {
    /// Path to the history file written by `summary --save`
    #[arg(long)]
    pub store: String,
}

pub fn run_history(args: HistoryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(&args.store);
    let history = load_history(&store)?;
    Ok(serde_json::to_value(history)?)
}
