//! fwctl - firewall control for hosted services
//!
//! Enables/disables a service's firewall and manages its packet-filter
//! rules through the control-plane API.
//!
//! # Architecture
//!
//! - [`validators`] - Positional argument checks, run before anything else
//! - [`command`] - Action enum, rule flags and validated invocations
//! - [`core`] - Dispatch, rule model, API client and errors
//! - [`output`] - Text/JSON rendering of results
//! - [`config`] - API URL, token and timeout settings
//! - [`utils`] - Utility functions (XDG directories, text truncation)
//!
//! # Flow
//!
//! ```text
//! args ──validate──▶ Invocation ──dispatch──▶ FirewallApi ──▶ Presenter
//! ```
//!
//! Usage errors never reach the API. Every completed round trip is rendered,
//! including requests the server rejected.

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod command;
pub mod config;
pub mod core;
pub mod output;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use command::{Action, Invocation, RuleFlags};
pub use core::dispatch::dispatch;
pub use core::error::{Error, Result, UsageError};
pub use core::firewall::{Direction, Rule, RuleSet};
