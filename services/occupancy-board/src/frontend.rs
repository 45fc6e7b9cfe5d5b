//! Hooks into the view layer, and the scoped loading indicator

use std::sync::Arc;

use crate::chart::DecoratedSeries;
use crate::render::{StatusEntry, StatusView};

/// The view layer the board drives. Implementations own all drawing; the
/// board only hands them fully shaped data and display-mode flags.
///
/// One frontend is usually shared by the status poller, the log view and the
/// admin actions, so the loading indicator is a shared flag.
pub trait Frontend: Send + Sync {
    fn set_loading_indicator(&self, visible: bool);

    /// `true` shows the live status list, `false` the degraded notice
    fn set_valid_display_mode(&self, valid: bool);

    /// Replace every previously applied status entry with `entries`
    fn apply_status(&self, entries: &[StatusEntry]);

    /// `true` shows the charts, `false` the log error notice
    fn set_log_display_mode(&self, valid: bool);

    /// Replace every previously applied chart with `series`
    fn apply_graphs(&self, series: &[DecoratedSeries]);

    /// Blocking user-facing message for deliberate one-shot actions
    fn alert(&self, message: &str);
}

/// Shows the loading indicator for as long as it lives.
///
/// Hiding happens in `Drop`, so every exit path of the owning scope
/// (success, error, early return) turns the indicator back off exactly once.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard {
    frontend: Option<Arc<dyn Frontend>>,
}

impl LoadingGuard {
    pub fn show(frontend: &Arc<dyn Frontend>) -> Self {
        frontend.set_loading_indicator(true);
        Self {
            frontend: Some(Arc::clone(frontend)),
        }
    }

    /// A guard that never touches the indicator, for silent background work
    pub fn silent() -> Self {
        Self { frontend: None }
    }

    pub fn show_if(frontend: &Arc<dyn Frontend>, visible: bool) -> Self {
        if visible {
            Self::show(frontend)
        } else {
            Self::silent()
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Some(frontend) = self.frontend.take() {
            frontend.set_loading_indicator(false);
        }
    }
}

/// Frontend for the headless host: writes every view update to the log
#[derive(Debug, Default)]
pub struct TracingFrontend;

impl Frontend for TracingFrontend {
    fn set_loading_indicator(&self, visible: bool) {
        tracing::trace!("Loading indicator: {}", visible);
    }

    fn set_valid_display_mode(&self, valid: bool) {
        if valid {
            tracing::debug!("Status view: live");
        } else {
            tracing::warn!("Status view: degraded");
        }
    }

    fn apply_status(&self, entries: &[StatusEntry]) {
        for entry in entries {
            match &entry.view {
                StatusView::Available(item) => {
                    let details: Vec<String> = item
                        .details
                        .iter()
                        .map(|d| format!("{}={}", d.name, d.state))
                        .collect();
                    tracing::info!(
                        "{}: {}% ({}) available={} [{}]",
                        entry.name,
                        item.rate_percent,
                        item.band,
                        item.availability,
                        details.join(", ")
                    );
                }
                StatusView::OutOfService => {
                    tracing::info!("{}: out of service", entry.name);
                }
            }
        }
    }

    fn set_log_display_mode(&self, valid: bool) {
        tracing::debug!("Log view valid: {}", valid);
    }

    fn apply_graphs(&self, series: &[DecoratedSeries]) {
        for s in series {
            let total: f64 = s
                .series
                .data
                .datasets
                .first()
                .map(|d| d.data.iter().sum())
                .unwrap_or_default();
            tracing::info!(
                "{} [{}]: {} buckets, total {}",
                s.title,
                s.color,
                s.series.data.labels.len(),
                total
            );
        }
    }

    fn alert(&self, message: &str) {
        tracing::warn!("ALERT: {}", message);
    }
}
