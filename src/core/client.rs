//! HTTP implementation of [`FirewallApi`] for the control-plane REST API.
//!
//! All endpoints live under `{api_url}/{scope}/{service_id}/firewall`.

use crate::config::AppConfig;
use crate::core::api::FirewallApi;
use crate::core::error::{Error, Result};
use crate::core::firewall::{
    ActionResult, FirewallStatus, FirewallSwitch, RemoteResponse, Rule, RuleSet,
};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

/// REST client for firewall endpoints.
#[derive(Clone)]
pub struct HttpFirewallApi {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

/// Error body shape; either field may carry the reason.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpFirewallApi {
    /// Creates a client from the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an unusable API URL and `Error::Http`
    /// when the TLS backend cannot be initialized.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| Error::Config(format!("invalid API URL '{}': {e}", config.api_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API URL '{}' cannot carry a path",
                config.api_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("fwctl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    /// Builds `{base}/{scope}/{service_id}/firewall/{tail..}` with each
    /// segment percent-encoded.
    fn endpoint(&self, scope: &str, service_id: &str, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(scope)
                .push(service_id)
                .push("firewall")
                .extend(tail);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(
            %method,
            path = url.path(),
            authenticated = self.api_token.is_some(),
            "Sending firewall request"
        );
        let request = self.http_client.request(method, url);
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and decodes the response.
    ///
    /// Non-2xx statuses become `T::rejected` so they reach the presenter.
    async fn send<T: RemoteResponse>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            debug!(%status, bytes = body.len(), "Firewall request succeeded");
            let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
            Ok(serde_json::from_str(body)?)
        } else {
            let message = rejection_message(status, &body);
            warn!(%status, %message, "Firewall request rejected");
            Ok(T::rejected(message))
        }
    }
}

/// Extracts the most useful reason from an error response.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(message) = parsed.message.or(parsed.error)
        && !message.is_empty()
    {
        return message;
    }

    let text = body.trim();
    if !text.is_empty() && !text.starts_with('{') && !text.starts_with('<') {
        return crate::utils::truncate_string(text, 200);
    }

    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}

impl FirewallApi for HttpFirewallApi {
    async fn change_status(
        &self,
        service_id: &str,
        switch: FirewallSwitch,
        scope: &str,
    ) -> Result<ActionResult> {
        let url = self.endpoint(scope, service_id, &[switch.as_str()]);
        self.send(self.request(Method::POST, url)).await
    }

    async fn add_rule(&self, service_id: &str, rule: &Rule, scope: &str) -> Result<ActionResult> {
        let url = self.endpoint(scope, service_id, &["rules"]);
        self.send(self.request(Method::POST, url).json(rule)).await
    }

    async fn edit_rule(&self, service_id: &str, rule: &Rule, scope: &str) -> Result<ActionResult> {
        let url = self.endpoint(scope, service_id, &["rules"]);
        self.send(self.request(Method::PUT, url).json(rule)).await
    }

    async fn remove_rule(
        &self,
        service_id: &str,
        position: Option<&str>,
        scope: &str,
    ) -> Result<ActionResult> {
        let mut url = self.endpoint(scope, service_id, &["rules"]);
        if let Some(position) = position {
            url.query_pairs_mut().append_pair("position", position);
        }
        self.send(self.request(Method::DELETE, url)).await
    }

    async fn firewall_status(&self, service_id: &str, scope: &str) -> Result<FirewallStatus> {
        let url = self.endpoint(scope, service_id, &[]);
        self.send(self.request(Method::GET, url)).await
    }

    async fn firewall_rules(&self, service_id: &str, scope: &str) -> Result<RuleSet> {
        let url = self.endpoint(scope, service_id, &["rules"]);
        self.send(self.request(Method::GET, url)).await
    }
}
