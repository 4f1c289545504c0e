// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Success/failure classification of vendor CLI `--json` output

use serde_json::Value;
use thiserror::Error;

/// The buffered stdout of a completed run could not be classified.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("unexpected output from `{command}`: {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Classified result of one `fx ... --json` run.
///
/// The vendor CLI reports `{"status": 0, "result": ...}` on success and a
/// non-zero status with `name`/`message` fields on failure. Classification is
/// recomputed per run, never cached.
#[derive(Debug, Clone, PartialEq)]
pub enum CliOutcome {
    Success { result: Value },
    Failure { name: Option<String>, message: String },
}

impl CliOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CliOutcome::Success { .. })
    }
}

/// Classify the buffered stdout of a completed process.
///
/// Non-JSON output is a distinct failure mode ([`ClassifyError::Parse`]),
/// reported by the caller with a dedicated message and an exception telemetry
/// event. A parseable document whose status is missing or non-zero is an
/// ordinary failure, not a parse error.
pub fn classify(command: &str, stdout: &str) -> Result<CliOutcome, ClassifyError> {
    let doc: Value = serde_json::from_str(stdout.trim())
        .map_err(|source| ClassifyError::Parse { command: command.to_string(), source })?;

    if doc.get("status").and_then(Value::as_i64) == Some(0) {
        let result = doc.get("result").cloned().unwrap_or(Value::Null);
        return Ok(CliOutcome::Success { result });
    }

    let name = doc.get("name").and_then(Value::as_str).map(str::to_string);
    let message = doc
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| doc.to_string());
    Ok(CliOutcome::Failure { name, message })
}

#[cfg(test)]
#[path = "cli_output_tests.rs"]
mod tests;
