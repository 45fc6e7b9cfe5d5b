//! BDD test world for the occupancy board

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cucumber::World;
use occupancy_board::chart::DecoratedSeries;
use occupancy_board::config::Config;
use occupancy_board::frontend::Frontend;
use occupancy_board::io::{HttpClient, HttpMethod, HttpResponse};
use occupancy_board::model::EmergencyResponse;
use occupancy_board::render::StatusEntry;
use occupancy_board::Board;

// --- Test doubles ---

/// Replays canned responses in order, repeating the last one, and records
/// every request
#[derive(Debug, Default)]
pub struct ScriptedHttp {
    script: Mutex<VecDeque<Result<HttpResponse, String>>>,
    last: Mutex<Option<Result<HttpResponse, String>>>,
    pub requests: Mutex<Vec<(HttpMethod, String)>>,
}

impl ScriptedHttp {
    pub fn push_json(&self, status: u16, body: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttp {
    async fn send(&self, method: HttpMethod, url: &str) -> occupancy_board::Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((method, url.to_string()));
        let next = self.script.lock().unwrap().pop_front();
        let entry = match next {
            Some(entry) => {
                *self.last.lock().unwrap() = Some(entry.clone());
                entry
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err("no scripted response".to_string())),
        };
        entry.map_err(occupancy_board::BoardError::Transport)
    }
}

/// A frontend that remembers what it was told
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    pub valid_modes: Mutex<Vec<bool>>,
    pub log_modes: Mutex<Vec<bool>>,
    pub status: Mutex<Vec<Vec<StatusEntry>>>,
    pub graphs: Mutex<Vec<Vec<DecoratedSeries>>>,
    pub alerts: Mutex<Vec<String>>,
    pub loading: Mutex<Vec<bool>>,
}

impl Frontend for RecordingFrontend {
    fn set_loading_indicator(&self, visible: bool) {
        self.loading.lock().unwrap().push(visible);
    }

    fn set_valid_display_mode(&self, valid: bool) {
        self.valid_modes.lock().unwrap().push(valid);
    }

    fn apply_status(&self, entries: &[StatusEntry]) {
        self.status.lock().unwrap().push(entries.to_vec());
    }

    fn set_log_display_mode(&self, valid: bool) {
        self.log_modes.lock().unwrap().push(valid);
    }

    fn apply_graphs(&self, series: &[DecoratedSeries]) {
        self.graphs.lock().unwrap().push(series.to_vec());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Debug, Default, World)]
pub struct BoardWorld {
    pub http: Arc<ScriptedHttp>,
    pub frontend: Arc<RecordingFrontend>,
    pub board: Option<Board>,
    pub log_result: Option<occupancy_board::Result<Vec<DecoratedSeries>>>,
    pub emergency_result: Option<occupancy_board::Result<EmergencyResponse>>,
}

impl BoardWorld {
    /// Build (once) a board wired to the scripted transport. The render
    /// delay is zeroed so single polls finish without waiting.
    pub fn board(&mut self) -> &Board {
        let http = Arc::clone(&self.http);
        let frontend = Arc::clone(&self.frontend);
        self.board.get_or_insert_with(|| {
            let mut config = Config::default();
            config.api.base_url = "http://board.test".to_string();
            config.polling.render_delay = Duration::ZERO;
            Board::new(config, http, frontend)
        })
    }

    pub fn last_status(&self) -> Vec<StatusEntry> {
        self.frontend
            .status
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no status was rendered")
    }

    pub fn last_valid_mode(&self) -> Option<bool> {
        self.frontend.valid_modes.lock().unwrap().last().copied()
    }
}
