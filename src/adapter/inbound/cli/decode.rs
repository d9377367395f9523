//! Handler for the `decode` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::domain::execution;
use crate::error::Result;

/// Combine status names into one execution code and print it.
pub fn execute(statuses: &[String]) -> Result<()> {
    let code = execution::decode(statuses)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "decode",
            "code": code.bits(),
            "flags": code.flags().iter().map(|f| f.as_str()).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    println!("{}", code.bits());
    if !output::is_quiet() {
        output::note(&code.to_string());
    }
    Ok(())
}
