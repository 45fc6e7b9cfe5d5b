//! Occupancy board - live facility availability
//!
//! Polls a facility-occupancy backend, re-renders only when the reported
//! state changes, shapes usage logs into charts, and toggles the server's
//! emergency mode.

pub mod api;
pub mod chart;
pub mod config;
pub mod controller;
pub mod emergency;
pub mod error;
pub mod frontend;
pub mod io;
pub mod logs;
pub mod model;
pub mod render;
pub mod snapshot;

pub use config::{load_config, Config};
pub use error::{BoardError, Result};

use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::{ApiClient, ApiRules};
use crate::chart::DecoratedSeries;
use crate::controller::PollController;
use crate::frontend::{Frontend, TracingFrontend};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::logs::LogQuery;
use crate::model::EmergencyResponse;

/// One dashboard session: the API client, the endpoint rules and the shared
/// frontend. Controllers created from it share the frontend but each owns
/// its own snapshot cache.
#[derive(Debug)]
pub struct Board {
    config: Config,
    api: Arc<ApiClient>,
    rules: ApiRules,
}

impl Board {
    pub fn new(config: Config, http: Arc<dyn HttpClient>, frontend: Arc<dyn Frontend>) -> Self {
        let api = Arc::new(ApiClient::new(config.api.base_url.clone(), http, frontend));
        let rules = ApiRules::from_config(&config.api);
        Self { config, api, rules }
    }

    /// Production wiring: reqwest transport, log-based frontend
    pub fn from_config(config: Config) -> Result<Self> {
        let http: Arc<dyn HttpClient> =
            Arc::new(ReqwestHttpClient::with_timeout(config.api.timeout)?);
        let frontend: Arc<dyn Frontend> = Arc::new(TracingFrontend);
        Ok(Self::new(config, http, frontend))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status_controller(&self) -> PollController {
        PollController::new(
            Arc::clone(&self.api),
            self.rules.status.clone(),
            &self.config.polling,
        )
    }

    pub async fn fetch_logs(&self, today: NaiveDate) -> Result<Vec<DecoratedSeries>> {
        let query = LogQuery::window(today, &self.config.logs);
        logs::fetch_logs(&self.api, &self.rules.logs, &query).await
    }

    pub async fn toggle_emergency(&self) -> Result<EmergencyResponse> {
        emergency::toggle_emergency(&self.api, &self.rules.emergency).await
    }
}

/// Poll the status endpoint until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let board = Board::from_config(config)?;
    let handle = board.status_controller().spawn();

    tracing::info!(
        "Watching {}{}",
        board.config().api.base_url,
        board.config().api.status_path
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    let controller = handle.stop().await?;
    tracing::debug!("Final poll state: {}", controller.state());
    Ok(())
}
