//! Parsed firewall invocations
//!
//! A firewall command is three positional arguments plus optional rule flags:
//!
//! ```text
//! fwctl firewall <product_scope> <service_id> <action> [--type in|out] [--port P] ...
//! ```
//!
//! - [`Action`]: the closed set of operations, plus an `Unknown` fallback
//! - [`RuleFlags`]: immutable flag values, built once by clap
//! - [`Invocation`]: validated arguments ready for dispatch
//!
//! # Example
//!
//! ```
//! use fwctl::command::{Action, Invocation, RuleFlags};
//!
//! let args = vec!["server".to_string(), "15".to_string(), "status".to_string()];
//! let invocation = Invocation::parse(args, RuleFlags::default()).unwrap();
//! assert_eq!(invocation.action, Action::Status);
//! assert_eq!(invocation.service_id, "15");
//! ```

use crate::core::error::UsageError;
use crate::core::firewall::{ANY_IP, Direction, Rule};
use crate::validators::{EXPECTED_ARGS, validate_args};

/// Firewall operation selected by the third positional argument
///
/// Matching is exact and case-sensitive. Anything outside the known set
/// becomes [`Action::Unknown`], which dispatch rejects as a usage error.
#[derive(Debug, Clone, PartialEq, Eq, strum::EnumString, strum::EnumIter)]
pub enum Action {
    /// Enable the firewall
    #[strum(serialize = "on")]
    On,
    /// Disable the firewall
    #[strum(serialize = "off")]
    Off,
    /// Append a rule
    #[strum(serialize = "add")]
    Add,
    /// Replace the rule at `--position`
    #[strum(serialize = "edit")]
    Edit,
    /// Remove the rule at `--position`
    #[strum(serialize = "del")]
    Del,
    /// Show whether the firewall is enabled
    #[strum(serialize = "status")]
    Status,
    /// List all rules
    #[strum(serialize = "rules")]
    Rules,
    #[strum(default)]
    Unknown(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::On => "on",
            Action::Off => "off",
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Del => "del",
            Action::Status => "status",
            Action::Rules => "rules",
            Action::Unknown(token) => token,
        }
    }

    /// Parses an action token; anything unrecognized becomes `Unknown`.
    pub fn from_token(token: &str) -> Self {
        token
            .parse()
            .unwrap_or_else(|_| Action::Unknown(token.to_string()))
    }
}

/// Rule flags shared by every action
///
/// Only `add`, `edit` and `del` read them; other actions ignore them.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct RuleFlags {
    /// Rule direction
    #[arg(long = "type", value_enum, default_value_t = Direction::In)]
    pub direction: Direction,

    /// Port or port range [default: all ports]
    #[arg(long, default_value = "", hide_default_value = true)]
    pub port: String,

    /// Source/destination IP
    #[arg(long, default_value = ANY_IP)]
    pub ip: String,

    /// Protocol: tcp|udp|icmp [default: any]
    #[arg(long = "proto", default_value = "", hide_default_value = true)]
    pub protocol: String,

    /// Free-text comment
    #[arg(long, default_value = "", hide_default_value = true)]
    pub comment: String,

    /// Hours until the rule expires: empty or 1-24
    #[arg(long, default_value = "", hide_default_value = true)]
    pub expires: String,

    /// Rule position for edit/del [default: 0]
    #[arg(long, default_value = "", hide_default_value = true)]
    pub position: String,
}

impl Default for RuleFlags {
    fn default() -> Self {
        Self {
            direction: Direction::In,
            port: String::new(),
            ip: ANY_IP.to_string(),
            protocol: String::new(),
            comment: String::new(),
            expires: String::new(),
            position: String::new(),
        }
    }
}

impl RuleFlags {
    /// Builds the add payload. `position` is left unset.
    pub fn to_rule(&self) -> Rule {
        Rule {
            direction: self.direction,
            port: non_empty(&self.port),
            ip: self.ip.clone(),
            protocol: non_empty(&self.protocol),
            comment: non_empty(&self.comment),
            expires: non_empty(&self.expires),
            position: None,
        }
    }

    /// Builds the edit payload: the add payload plus `position`.
    pub fn to_positioned_rule(&self) -> Rule {
        Rule {
            position: self.position(),
            ..self.to_rule()
        }
    }

    pub fn position(&self) -> Option<String> {
        non_empty(&self.position)
    }
}

/// A validated firewall command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub product_scope: String,
    pub service_id: String,
    pub action: Action,
    pub flags: RuleFlags,
}

impl Invocation {
    /// Validates positional arguments and pairs them with the flags.
    ///
    /// # Errors
    ///
    /// Returns the first [`UsageError`] raised by [`validate_args`].
    pub fn parse(args: Vec<String>, flags: RuleFlags) -> Result<Self, UsageError> {
        validate_args(&args)?;

        let [product_scope, service_id, action]: [String; EXPECTED_ARGS] = args
            .try_into()
            .map_err(|rest: Vec<String>| UsageError::WrongArity { found: rest.len() })?;

        Ok(Self {
            product_scope,
            service_id,
            action: Action::from_token(&action),
            flags,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_action_round_trips_known_tokens() {
        for action in Action::iter().filter(|a| !matches!(a, Action::Unknown(_))) {
            assert_eq!(Action::from_token(action.as_str()), action);
        }
    }

    #[test]
    fn test_action_is_case_sensitive() {
        assert_eq!(Action::from_token("ON"), Action::Unknown("ON".to_string()));
        assert_eq!(Action::from_token("delete"), Action::Unknown("delete".to_string()));
    }

    #[test]
    fn test_parse_keeps_arguments_unmodified() {
        let invocation = Invocation::parse(args(&["cloud-app", "-7", "rules"]), RuleFlags::default())
            .unwrap();
        assert_eq!(invocation.product_scope, "cloud-app");
        assert_eq!(invocation.service_id, "-7");
        assert_eq!(invocation.action, Action::Rules);
    }

    #[test]
    fn test_parse_rejects_before_building() {
        let err = Invocation::parse(args(&["0", "15"]), RuleFlags::default()).unwrap_err();
        assert_eq!(err, UsageError::WrongArity { found: 2 });
    }

    #[test]
    fn test_unknown_action_survives_parse() {
        let invocation =
            Invocation::parse(args(&["server", "15", "restart"]), RuleFlags::default()).unwrap();
        assert_eq!(invocation.action, Action::Unknown("restart".to_string()));
    }

    #[test]
    fn test_default_flags_build_any_rule() {
        let rule = RuleFlags::default().to_rule();
        assert_eq!(rule, Rule::default());
        assert_eq!(rule.ip, "0.0.0.0");
        assert!(rule.port.is_none());
    }

    #[test]
    fn test_add_rule_ignores_position() {
        let flags = RuleFlags {
            position: "3".to_string(),
            ..RuleFlags::default()
        };
        assert_eq!(flags.to_rule().position, None);
        assert_eq!(flags.to_positioned_rule().position.as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_flags_map_to_none() {
        let flags = RuleFlags {
            direction: Direction::Out,
            port: "443".to_string(),
            ip: "10.0.0.1".to_string(),
            protocol: "tcp".to_string(),
            comment: "web".to_string(),
            expires: String::new(),
            position: String::new(),
        };
        let rule = flags.to_rule();
        assert_eq!(rule.direction, Direction::Out);
        assert_eq!(rule.port.as_deref(), Some("443"));
        assert_eq!(rule.protocol.as_deref(), Some("tcp"));
        assert_eq!(rule.comment.as_deref(), Some("web"));
        assert_eq!(rule.expires, None);
        assert_eq!(flags.position(), None);
    }
}
