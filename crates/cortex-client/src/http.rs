//! HTTP client for the rules engine's configuration APIs
//!
//! Rule groups live under `/api/v1/rules/{namespace}[/{group}]`, the
//! tenant's Alertmanager configuration under `/api/v1/alerts`. Request and
//! response bodies are YAML. HTTP 404 is mapped to the typed "absent"
//! outcome here and never surfaces as an error to callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use url::Url;

use cortex_rules::native::{AlertmanagerConfig, RuleGroup};

use crate::api::{AlertmanagerApi, RuleGroupApi};
use crate::config::Config;
use crate::error::{Error, Result};

const YAML_CONTENT_TYPE: &str = "application/yaml";

/// Client for one engine tenant.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CortexClient {
    /// HTTP client used for outbound requests
    http: reqwest::Client,
    /// Base URL of the engine
    address: Url,
    /// Tenant sent as `X-Scope-OrgID`, when configured
    tenant_id: Option<String>,
    /// Basic-auth username, when configured
    username: Option<String>,
    /// Basic-auth password, when configured
    password: Option<String>,
}

impl CortexClient {
    /// Build a client from connection parameters.
    ///
    /// # Errors
    ///
    /// Returns an error when the address is not usable as a base URL or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let address = Url::parse(&config.address).map_err(|e| Error::InvalidAddress {
            address: config.address.clone(),
            reason: e.to_string(),
        })?;
        if address.cannot_be_a_base() {
            return Err(Error::InvalidAddress {
                address: config.address.clone(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http,
            address,
            tenant_id: config.tenant_id.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Build an endpoint URL by appending path segments to the base address
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.address.clone();
        // Cannot fail: new() rejects cannot-be-a-base addresses.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start a request with tenant scoping and credentials applied
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(tenant) = &self.tenant_id {
            request = request.header("X-Scope-OrgID", tenant);
        }
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }
        request
    }
}

/// Turn a non-success response into an API error, keeping the engine's
/// message text for the caller to log
async fn read_api_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Error::Api {
        status,
        message: message.trim().to_string(),
    }
}

#[async_trait]
impl RuleGroupApi for CortexClient {
    async fn get_rule_group(&self, namespace: &str, group: &str) -> Result<Option<RuleGroup>> {
        let url = self.endpoint(&["api", "v1", "rules", namespace, group]);
        tracing::debug!(%url, "Fetching rule group");

        let response = self.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }

        let body = response.text().await?;
        let observed: RuleGroup = serde_yaml::from_str(&body)?;
        Ok(Some(observed))
    }

    async fn set_rule_group(&self, namespace: &str, group: &RuleGroup) -> Result<()> {
        let url = self.endpoint(&["api", "v1", "rules", namespace]);
        tracing::debug!(%url, group = %group.name, "Upserting rule group");

        let body = serde_yaml::to_string(group)?;
        let response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, YAML_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }
        Ok(())
    }

    async fn delete_rule_group(&self, namespace: &str, group: &str) -> Result<()> {
        let url = self.endpoint(&["api", "v1", "rules", namespace, group]);
        tracing::debug!(%url, "Deleting rule group");

        let response = self.request(Method::DELETE, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            // Already gone; delete is idempotent.
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl AlertmanagerApi for CortexClient {
    async fn get_alertmanager_config(&self) -> Result<Option<AlertmanagerConfig>> {
        let url = self.endpoint(&["api", "v1", "alerts"]);
        tracing::debug!(%url, "Fetching Alertmanager config");

        let response = self.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }

        let body = response.text().await?;
        let observed: AlertmanagerConfig = serde_yaml::from_str(&body)?;
        // Some engine versions answer with an empty document instead of 404
        // when no configuration is stored.
        if observed.alertmanager_config.is_empty() {
            return Ok(None);
        }
        Ok(Some(observed))
    }

    async fn set_alertmanager_config(&self, config: &AlertmanagerConfig) -> Result<()> {
        let url = self.endpoint(&["api", "v1", "alerts"]);
        tracing::debug!(%url, "Upserting Alertmanager config");

        let body = serde_yaml::to_string(config)?;
        let response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, YAML_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }
        Ok(())
    }

    async fn delete_alertmanager_config(&self) -> Result<()> {
        let url = self.endpoint(&["api", "v1", "alerts"]);
        tracing::debug!(%url, "Deleting Alertmanager config");

        let response = self.request(Method::DELETE, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }
        Ok(())
    }
}
