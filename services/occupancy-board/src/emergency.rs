//! Administrator emergency stop / resume toggle

use crate::api::{ApiClient, ApiRule, CallOptions};
use crate::model::EmergencyResponse;

const FAILURE_ALERT: &str = "Failed to switch mode. See the error log for details.";

/// Flip the server's operating mode. The outcome is always alerted, success
/// or failure.
pub async fn toggle_emergency(api: &ApiClient, rule: &ApiRule) -> crate::Result<EmergencyResponse> {
    let frontend = api.frontend();
    match api
        .call::<EmergencyResponse>(rule, None, CallOptions::default())
        .await
    {
        Ok(response) => {
            let running = response.valid == Some(true);
            frontend.set_valid_display_mode(running);
            frontend.alert(&format!("Switched to mode [{}].", response.action));
            tracing::info!(
                "Emergency toggle: valid={:?} action={}",
                response.valid,
                response.action
            );
            Ok(response)
        }
        Err(e) => {
            frontend.alert(FAILURE_ALERT);
            tracing::error!("Emergency toggle failed: {}", e);
            Err(e)
        }
    }
}
