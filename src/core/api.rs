//! Control-plane operations consumed by the dispatcher
//!
//! Each method maps to exactly one request. A rejected request (bad token,
//! unknown service, illegal rule) comes back as `Ok` with `success = false`;
//! `Err` is reserved for failures that prevent a round trip at all.

use crate::core::error::Result;
use crate::core::firewall::{ActionResult, FirewallStatus, FirewallSwitch, Rule, RuleSet};

#[allow(async_fn_in_trait)]
pub trait FirewallApi {
    /// Turns a service's firewall on or off
    async fn change_status(
        &self,
        service_id: &str,
        switch: FirewallSwitch,
        scope: &str,
    ) -> Result<ActionResult>;

    async fn add_rule(&self, service_id: &str, rule: &Rule, scope: &str) -> Result<ActionResult>;

    /// Replaces the rule at `rule.position`
    async fn edit_rule(&self, service_id: &str, rule: &Rule, scope: &str) -> Result<ActionResult>;

    async fn remove_rule(
        &self,
        service_id: &str,
        position: Option<&str>,
        scope: &str,
    ) -> Result<ActionResult>;

    async fn firewall_status(&self, service_id: &str, scope: &str) -> Result<FirewallStatus>;

    async fn firewall_rules(&self, service_id: &str, scope: &str) -> Result<RuleSet>;
}
