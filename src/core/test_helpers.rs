//! Shared test utilities for core module tests
//!
//! Provides a recording [`FirewallApi`] double and a recording [`Presenter`]
//! so dispatch tests can assert on exact calls.
//! This module is only compiled in test mode.

use crate::command::{Invocation, RuleFlags};
use crate::core::api::FirewallApi;
use crate::core::error::Result;
use crate::core::firewall::{
    ActionResult, DirectionalRules, FirewallStatus, FirewallSwitch, Rule, RuleEntry, RuleSet,
};
use crate::output::{FirewallMessage, Presenter};
use std::io;
use std::sync::Mutex;

/// One call made against [`MockApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ChangeStatus {
        service_id: String,
        switch: FirewallSwitch,
        scope: String,
    },
    AddRule {
        service_id: String,
        rule: Rule,
        scope: String,
    },
    EditRule {
        service_id: String,
        rule: Rule,
        scope: String,
    },
    RemoveRule {
        service_id: String,
        position: Option<String>,
        scope: String,
    },
    Status {
        service_id: String,
        scope: String,
    },
    Rules {
        service_id: String,
        scope: String,
    },
}

/// API double returning fixed responses and recording every call.
pub struct MockApi {
    pub calls: Mutex<Vec<ApiCall>>,
    pub action_result: ActionResult,
    pub status: FirewallStatus,
    pub rules: RuleSet,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            action_result: ActionResult {
                success: true,
                message: None,
            },
            status: FirewallStatus {
                success: true,
                enabled: true,
                message: None,
            },
            rules: RuleSet {
                success: true,
                rules: DirectionalRules::default(),
                message: None,
            },
        }
    }
}

impl MockApi {
    pub fn with_rules(inbound: Vec<RuleEntry>, outbound: Vec<RuleEntry>) -> Self {
        Self {
            rules: RuleSet {
                success: true,
                rules: DirectionalRules { inbound, outbound },
                message: None,
            },
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl FirewallApi for MockApi {
    async fn change_status(
        &self,
        service_id: &str,
        switch: FirewallSwitch,
        scope: &str,
    ) -> Result<ActionResult> {
        self.record(ApiCall::ChangeStatus {
            service_id: service_id.to_string(),
            switch,
            scope: scope.to_string(),
        });
        Ok(self.action_result.clone())
    }

    async fn add_rule(&self, service_id: &str, rule: &Rule, scope: &str) -> Result<ActionResult> {
        self.record(ApiCall::AddRule {
            service_id: service_id.to_string(),
            rule: rule.clone(),
            scope: scope.to_string(),
        });
        Ok(self.action_result.clone())
    }

    async fn edit_rule(&self, service_id: &str, rule: &Rule, scope: &str) -> Result<ActionResult> {
        self.record(ApiCall::EditRule {
            service_id: service_id.to_string(),
            rule: rule.clone(),
            scope: scope.to_string(),
        });
        Ok(self.action_result.clone())
    }

    async fn remove_rule(
        &self,
        service_id: &str,
        position: Option<&str>,
        scope: &str,
    ) -> Result<ActionResult> {
        self.record(ApiCall::RemoveRule {
            service_id: service_id.to_string(),
            position: position.map(ToString::to_string),
            scope: scope.to_string(),
        });
        Ok(self.action_result.clone())
    }

    async fn firewall_status(&self, service_id: &str, scope: &str) -> Result<FirewallStatus> {
        self.record(ApiCall::Status {
            service_id: service_id.to_string(),
            scope: scope.to_string(),
        });
        Ok(self.status.clone())
    }

    async fn firewall_rules(&self, service_id: &str, scope: &str) -> Result<RuleSet> {
        self.record(ApiCall::Rules {
            service_id: service_id.to_string(),
            scope: scope.to_string(),
        });
        Ok(self.rules.clone())
    }
}

/// One call made against [`RecordingPresenter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Message(FirewallMessage),
    Status(FirewallStatus),
    Rules(RuleSet),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
}

impl Presenter for RecordingPresenter {
    fn message(&mut self, message: &FirewallMessage) -> io::Result<()> {
        self.calls.push(PresenterCall::Message(message.clone()));
        Ok(())
    }

    fn status(&mut self, status: &FirewallStatus) -> io::Result<()> {
        self.calls.push(PresenterCall::Status(status.clone()));
        Ok(())
    }

    fn rules(&mut self, rules: &RuleSet) -> io::Result<()> {
        self.calls.push(PresenterCall::Rules(rules.clone()));
        Ok(())
    }
}

/// Builds a validated invocation from string arguments.
pub fn invocation(args: &[&str], flags: RuleFlags) -> Invocation {
    Invocation::parse(args.iter().map(ToString::to_string).collect(), flags)
        .expect("test invocation must be valid")
}

/// A listed inbound SSH rule.
pub fn ssh_entry() -> RuleEntry {
    RuleEntry {
        position: Some("0".to_string()),
        port: Some("22".to_string()),
        ip: Some("0.0.0.0".to_string()),
        protocol: Some("tcp".to_string()),
        comment: Some("ssh".to_string()),
        expires_at: None,
    }
}
