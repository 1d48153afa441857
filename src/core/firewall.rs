//! Firewall rule data structures exchanged with the control-plane API
//!
//! This module defines the request payload for rule changes and the response
//! types returned by the firewall endpoints.
//!
//! # Rule Structure
//!
//! A [`Rule`] is a transient request payload built from command-line flags:
//! - Direction (inbound/outbound)
//! - Port (empty means all ports)
//! - Source/destination IP (`0.0.0.0` means any)
//! - Protocol, comment and expiry, passed through unvalidated
//! - Position among existing rules (edit only)
//!
//! The server is authoritative for what a legal rule is, so none of the
//! string fields are checked locally.
//!
//! # Example
//!
//! ```
//! use fwctl::core::firewall::{Direction, Rule};
//!
//! let rule = Rule {
//!     direction: Direction::Out,
//!     port: Some("443".to_string()),
//!     ip: "10.0.0.1".to_string(),
//!     protocol: Some("tcp".to_string()),
//!     comment: Some("web".to_string()),
//!     expires: None,
//!     position: None,
//! };
//! assert_eq!(rule.direction.as_str(), "out");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// IP address meaning "any source/destination"
pub const ANY_IP: &str = "0.0.0.0";

/// Direction of traffic a rule applies to
///
/// `Copy` trait allows efficient passing by value for this small enum.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, strum::Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Traffic arriving at the service
    #[default]
    #[strum(serialize = "in")]
    In,
    /// Traffic leaving the service
    #[strum(serialize = "out")]
    Out,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }

    /// Returns heading used when listing rules
    pub const fn display_name(self) -> &'static str {
        match self {
            Direction::In => "Inbound",
            Direction::Out => "Outbound",
        }
    }
}

/// Target state for a firewall on/off request
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum FirewallSwitch {
    #[strum(serialize = "on")]
    On,
    #[strum(serialize = "off")]
    Off,
}

impl FirewallSwitch {
    pub const fn as_str(self) -> &'static str {
        match self {
            FirewallSwitch::On => "on",
            FirewallSwitch::Off => "off",
        }
    }
}

/// Packet-filter rule sent with add and edit requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    #[serde(rename = "type")]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    pub ip: String,
    #[serde(rename = "proto", default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Hours until the rule is removed; absent means never
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    /// Slot among existing rules; absent lets the server pick its default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            direction: Direction::In,
            port: None,
            ip: ANY_IP.to_string(),
            protocol: None,
            comment: None,
            expires: None,
            position: None,
        }
    }
}

/// A rule as listed by the server
///
/// `position` and `port` are accepted as JSON strings or numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub port: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(rename = "proto", default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl RuleEntry {
    /// Position column text, falling back to the listing index
    pub fn position_display(&self, index: usize) -> String {
        match self.position.as_deref() {
            Some(position) if !position.is_empty() => position.to_string(),
            _ => index.to_string(),
        }
    }

    /// Port column text, "all" when the rule matches every port
    pub fn port_display(&self) -> &str {
        match self.port.as_deref() {
            Some(port) if !port.is_empty() => port,
            _ => "all",
        }
    }

    /// Protocol column text, "any" when unset
    pub fn protocol_display(&self) -> &str {
        match self.protocol.as_deref() {
            Some(proto) if !proto.is_empty() => proto,
            _ => "any",
        }
    }

    pub fn ip_display(&self) -> &str {
        match self.ip.as_deref() {
            Some(ip) if !ip.is_empty() => ip,
            _ => ANY_IP,
        }
    }

    pub fn expires_display(&self) -> String {
        self.expires_at.map_or_else(
            || "never".to_string(),
            |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
    }
}

/// Outcome of a state-changing request (on/off/add/edit/del)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResult {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Whether a service's firewall is currently enforcing rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallStatus {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Rules keyed by direction, in server order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectionalRules {
    #[serde(rename = "in", default)]
    pub inbound: Vec<RuleEntry>,
    #[serde(rename = "out", default)]
    pub outbound: Vec<RuleEntry>,
}

/// Response of the rule listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSet {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub rules: DirectionalRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleSet {
    /// True when neither direction holds a rule
    pub fn is_empty(&self) -> bool {
        self.rules.inbound.is_empty() && self.rules.outbound.is_empty()
    }

    /// Iterates both directions, inbound first
    pub fn by_direction(&self) -> [(Direction, &[RuleEntry]); 2] {
        [
            (Direction::In, self.rules.inbound.as_slice()),
            (Direction::Out, self.rules.outbound.as_slice()),
        ]
    }
}

/// Response types that can stand in for a rejected request.
///
/// Non-2xx responses are not transport failures: they are turned into a
/// value with `success = false` so the presenter can render them.
pub trait RemoteResponse: serde::de::DeserializeOwned {
    fn rejected(message: String) -> Self;
}

impl RemoteResponse for ActionResult {
    fn rejected(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
        }
    }
}

impl RemoteResponse for FirewallStatus {
    fn rejected(message: String) -> Self {
        Self {
            success: false,
            enabled: false,
            message: Some(message),
        }
    }
}

impl RemoteResponse for RuleSet {
    fn rejected(message: String) -> Self {
        Self {
            success: false,
            rules: DirectionalRules::default(),
            message: Some(message),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(text) => text,
            StringOrNumber::Number(number) => number.to_string(),
        }),
    )
}
