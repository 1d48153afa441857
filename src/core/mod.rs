//! Core firewall command functionality
//!
//! This module contains the types and logic that turn a validated command
//! into a control-plane request. It provides:
//!
//! - [`firewall`]: Rule payload and response types
//! - [`api`]: The [`api::FirewallApi`] operations the dispatcher consumes
//! - [`client`]: HTTP implementation of those operations
//! - [`dispatch`]: Action-to-request routing
//! - [`error`]: Error types and user-facing translations

pub mod api;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod firewall;

#[cfg(test)]
pub mod test_helpers;
