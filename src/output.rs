//! Terminal rendering of firewall results.

use crate::core::firewall::{ActionResult, FirewallStatus, RuleEntry, RuleSet};
use crate::utils::truncate_string;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

const COMMENT_WIDTH: usize = 32;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A one-line message about a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FirewallMessage {
    /// Success flag of a state-changing request, with the server's reason if any
    Outcome {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// Fixed informational text
    Text { message: String },
}

impl FirewallMessage {
    pub fn text(message: impl Into<String>) -> Self {
        FirewallMessage::Text {
            message: message.into(),
        }
    }
}

impl From<ActionResult> for FirewallMessage {
    fn from(result: ActionResult) -> Self {
        FirewallMessage::Outcome {
            success: result.success,
            detail: result.message,
        }
    }
}

/// Sink for dispatch results
pub trait Presenter {
    fn message(&mut self, message: &FirewallMessage) -> io::Result<()>;
    fn status(&mut self, status: &FirewallStatus) -> io::Result<()>;
    fn rules(&mut self, rules: &RuleSet) -> io::Result<()>;
}

/// Writes results as text or JSON to any writer (stdout in the binary).
pub struct TerminalPresenter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)
    }

    fn rule_row(&mut self, entry: &RuleEntry, index: usize) -> io::Result<()> {
        let position = entry.position_display(index);
        writeln!(
            self.out,
            "  {:<4} {:<6} {:<12} {:<18} {:<20} {}",
            position,
            entry.protocol_display(),
            entry.port_display(),
            entry.ip_display(),
            entry.expires_display(),
            truncate_string(entry.comment.as_deref().unwrap_or(""), COMMENT_WIDTH),
        )
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn message(&mut self, message: &FirewallMessage) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(message);
        }
        match message {
            FirewallMessage::Outcome {
                success: true,
                detail,
            } => match detail {
                Some(detail) => writeln!(self.out, "✓ {detail}"),
                None => writeln!(self.out, "✓ Firewall updated."),
            },
            FirewallMessage::Outcome {
                success: false,
                detail,
            } => match detail {
                Some(detail) => writeln!(self.out, "✗ Firewall request failed: {detail}"),
                None => writeln!(self.out, "✗ Firewall request failed."),
            },
            FirewallMessage::Text { message } => writeln!(self.out, "{message}"),
        }
    }

    fn status(&mut self, status: &FirewallStatus) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(status);
        }
        if !status.success {
            let reason = status.message.as_deref().unwrap_or("unknown error");
            return writeln!(self.out, "✗ Could not read firewall status: {reason}");
        }
        let state = if status.enabled { "enabled" } else { "disabled" };
        writeln!(self.out, "Firewall: {state}")
    }

    fn rules(&mut self, rules: &RuleSet) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(rules);
        }
        if !rules.success {
            let reason = rules.message.as_deref().unwrap_or("unknown error");
            return writeln!(self.out, "✗ Could not list firewall rules: {reason}");
        }
        for (direction, entries) in rules.by_direction() {
            writeln!(self.out, "{} rules ({}):", direction.display_name(), entries.len())?;
            if entries.is_empty() {
                continue;
            }
            writeln!(
                self.out,
                "  {:<4} {:<6} {:<12} {:<18} {:<20} COMMENT",
                "POS", "PROTO", "PORT", "IP", "EXPIRES"
            )?;
            for (index, entry) in entries.iter().enumerate() {
                self.rule_row(entry, index)?;
            }
        }
        Ok(())
    }
}
