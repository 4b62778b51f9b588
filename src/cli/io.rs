//! JSON output for the CLI
//!
//! Every command writes exactly one JSON object to stdout.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&serde_json::json!({
        "status": "ok",
        "data": data
    }))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str, data: Option<Value>) -> CliResult<()> {
    let mut response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    if let Some(data) = data {
        response["data"] = data;
    }
    write_value(&response)
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
