//! API call contracts and the uniform call path

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::frontend::{Frontend, LoadingGuard};
use crate::io::{HttpClient, HttpMethod};

/// One endpoint: path under the base URL, method, and a default suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRule {
    pub path: String,
    pub method: HttpMethod,
    pub suffix: String,
}

impl ApiRule {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            suffix: String::new(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// The endpoints the board talks to
#[derive(Debug, Clone)]
pub struct ApiRules {
    pub status: ApiRule,
    pub logs: ApiRule,
    pub emergency: ApiRule,
}

impl ApiRules {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            status: ApiRule::new(config.status_path.clone(), HttpMethod::Get),
            logs: ApiRule::new(config.logs_path.clone(), HttpMethod::Get),
            emergency: ApiRule::new(config.emergency_path.clone(), config.emergency_method),
        }
    }
}

/// Per-call options
#[derive(Debug, Clone, Copy)]
pub struct CallOptions {
    pub show_loading_indicator: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            show_loading_indicator: true,
        }
    }
}

impl CallOptions {
    /// For background polling, which must not flash the indicator
    pub fn silent() -> Self {
        Self {
            show_loading_indicator: false,
        }
    }
}

/// Issues calls against one backend base URL
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    frontend: Arc<dyn Frontend>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        frontend: Arc<dyn Frontend>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            frontend,
        }
    }

    pub fn frontend(&self) -> &Arc<dyn Frontend> {
        &self.frontend
    }

    /// `base + path + suffix`, where `suffix` overrides the rule's own
    pub fn url_for(&self, rule: &ApiRule, suffix: Option<&str>) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            rule.path,
            suffix.unwrap_or(&rule.suffix)
        )
    }

    /// Issue one request and decode the JSON body.
    ///
    /// Non-2xx, transport and decode failures are returned as errors; the
    /// caller reports them. The loading indicator, when requested, is shown
    /// for the duration of the call and hidden on every exit path.
    pub async fn call<T: DeserializeOwned>(
        &self,
        rule: &ApiRule,
        suffix: Option<&str>,
        options: CallOptions,
    ) -> crate::Result<T> {
        let _loading = LoadingGuard::show_if(&self.frontend, options.show_loading_indicator);
        let url = self.url_for(rule, suffix);

        let result = self.fetch(rule.method, &url).await;
        if let Err(e) = &result {
            tracing::debug!("{} {} failed: {}", rule.method, url, e);
        }
        result
    }

    async fn fetch<T: DeserializeOwned>(&self, method: HttpMethod, url: &str) -> crate::Result<T> {
        let response = self.http.send(method, url).await?;
        if !response.is_success() {
            return Err(crate::BoardError::HttpStatus {
                status: response.status,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
