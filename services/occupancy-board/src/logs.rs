//! Historical usage logs: query window and chart delivery

use chrono::{Days, NaiveDate};

use crate::api::{ApiClient, ApiRule, CallOptions};
use crate::chart::{shape, DecoratedSeries};
use crate::config::{LogsConfig, QueryStyle};
use crate::model::LogPayload;

const DATE_FORMAT: &str = "%Y%m%d";

/// Date window and sampling for the logs endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub begin: NaiveDate,
    pub end: NaiveDate,
    pub begin_hours_per_day: u8,
    pub end_hours_per_day: u8,
    pub step_hours: u8,
    pub style: QueryStyle,
}

impl LogQuery {
    /// The configured number of days up to and including `today`
    pub fn window(today: NaiveDate, config: &LogsConfig) -> Self {
        let begin = today
            .checked_sub_days(Days::new(u64::from(config.days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            begin,
            end: today,
            begin_hours_per_day: config.begin_hours_per_day,
            end_hours_per_day: config.end_hours_per_day,
            step_hours: config.step_hours,
            style: config.style,
        }
    }

    pub fn suffix(&self) -> String {
        let begin = self.begin.format(DATE_FORMAT);
        let end = self.end.format(DATE_FORMAT);
        match self.style {
            QueryStyle::Query => format!(
                "?begin_date={}&end_date={}&begin_hours_per_day={}&end_hours_per_day={}&step_hours={}",
                begin, end, self.begin_hours_per_day, self.end_hours_per_day, self.step_hours
            ),
            QueryStyle::Path => format!("{}/{}/{}", begin, end, self.step_hours),
        }
    }
}

/// Fetch the usage log for `query`, shape it into charts and hand them to
/// the frontend.
///
/// Any failure, including a `success: false` body, switches the log view to
/// its error notice and is returned.
pub async fn fetch_logs(
    api: &ApiClient,
    rule: &ApiRule,
    query: &LogQuery,
) -> crate::Result<Vec<DecoratedSeries>> {
    let suffix = query.suffix();
    tracing::debug!("Fetching logs {}", suffix);

    let result = api
        .call::<LogPayload>(rule, Some(&suffix), CallOptions::default())
        .await
        .and_then(LogPayload::into_graphs);

    let frontend = api.frontend();
    match result {
        Ok(graphs) => {
            frontend.set_log_display_mode(true);
            let shaped = shape(&graphs);
            frontend.apply_graphs(&shaped);
            tracing::info!("Applied {} log charts", shaped.len());
            Ok(shaped)
        }
        Err(e) => {
            frontend.set_log_display_mode(false);
            tracing::error!("Log fetch failed: {}", e);
            Err(e)
        }
    }
}
