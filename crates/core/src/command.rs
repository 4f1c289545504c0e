// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Descriptor for one external CLI invocation

use serde::{Deserialize, Serialize};

/// Describes one invocation of the wrapped vendor CLI.
///
/// `display_name` is what the user sees in notifications and progress
/// surfaces; `log_name` is the stable identifier used for telemetry events
/// and log lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    display_name: String,
    log_name: String,
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Full command line for log output, e.g. `fx org display --json`.
    pub fn to_command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Builder for [`CommandSpec`].
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    display_name: Option<String>,
    log_name: Option<String>,
    program: String,
    args: Vec<String>,
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), ..Self::default() }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn log_name(mut self, name: impl Into<String>) -> Self {
        self.log_name = Some(name.into());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Request machine-readable output from the vendor CLI.
    pub fn json(self) -> Self {
        self.arg("--json")
    }

    /// Finalize the spec. Missing names fall back to the program name; the
    /// log name is slugged from the display name so telemetry keys stay
    /// stable even when the display wording changes case or spacing.
    pub fn build(self) -> CommandSpec {
        let display_name = self.display_name.unwrap_or_else(|| self.program.clone());
        let log_name = self.log_name.unwrap_or_else(|| slug(&display_name));
        CommandSpec { display_name, log_name, program: self.program, args: self.args }
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
