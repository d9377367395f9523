//! Handler for the `migrate` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Bring the ledger schema up to date.
pub fn execute(config: &Config) -> Result<()> {
    sqlite::open(config.database_url())?;

    if output::is_json() {
        output::json_output(json!({
            "command": "migrate",
            "database": config.database_url(),
            "status": "ok",
        }));
        return Ok(());
    }

    output::success(&format!("Ledger ready at {}", config.database_url()));
    Ok(())
}
