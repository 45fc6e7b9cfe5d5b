//! BDD step definitions for status polling

use std::time::Duration;

use cucumber::{given, then, when};

use occupancy_board::render::SeverityBand;

use crate::world::BoardWorld;

fn facility_body(name: &str, used: u32, max: u32) -> String {
    serde_json::json!({
        "success": true,
        "status": [{"name": name, "valid": true, "used": used, "max": max}]
    })
    .to_string()
}

fn parse_band(s: &str) -> SeverityBand {
    match s {
        "nominal" => SeverityBand::Nominal,
        "warning" => SeverityBand::Warning,
        "critical" => SeverityBand::Critical,
        other => panic!("Unknown band: {}", other),
    }
}

#[given(expr = "the status endpoint returns a facility {string} using {int} of {int}")]
fn status_returns_facility(world: &mut BoardWorld, name: String, used: u32, max: u32) {
    world.http.push_json(200, facility_body(&name, used, max));
}

#[given(expr = "the status endpoint reports failure {string}")]
fn status_reports_failure(world: &mut BoardWorld, message: String) {
    world.http.push_json(
        200,
        serde_json::json!({"success": false, "message": message}).to_string(),
    );
}

#[given(expr = "the status endpoint answers HTTP {int}")]
fn status_answers_http(world: &mut BoardWorld, status: u16) {
    world.http.push_json(status, "error");
}

#[given(
    expr = "the status endpoint is unreachable once and then returns a facility {string} using {int} of {int}"
)]
fn status_unreachable_then_facility(world: &mut BoardWorld, name: String, used: u32, max: u32) {
    world.http.push_transport_error("TypeError: Failed to fetch");
    world.http.push_json(200, facility_body(&name, used, max));
}

#[given(expr = "the status endpoint returns an out-of-service facility {string}")]
fn status_returns_out_of_service(world: &mut BoardWorld, name: String) {
    world.http.push_json(
        200,
        serde_json::json!({
            "success": true,
            "status": [{"name": name, "valid": false, "used": 1, "max": 2}]
        })
        .to_string(),
    );
}

#[when("the status is polled once")]
async fn poll_once(world: &mut BoardWorld) {
    let mut controller = world.board().status_controller();
    controller.run_once().await;
}

#[when(expr = "the status is polled {int} times")]
async fn poll_n_times(world: &mut BoardWorld, times: u32) {
    let mut controller = world.board().status_controller();
    for _ in 0..times {
        controller.cycle().await;
    }
}

#[when(expr = "the poll loop runs for {int} milliseconds")]
async fn poll_loop_runs(world: &mut BoardWorld, millis: u64) {
    let handle = world.board().status_controller().spawn();
    tokio::time::sleep(Duration::from_millis(millis)).await;
    handle.stop().await.expect("poll task failed");
}

#[then(expr = "{int} status entry/entries is/are rendered")]
fn entries_rendered(world: &mut BoardWorld, count: usize) {
    assert_eq!(world.last_status().len(), count);
}

#[then(expr = "the status was rendered {int} time(s)")]
fn status_rendered_times(world: &mut BoardWorld, times: usize) {
    assert_eq!(world.frontend.status.lock().unwrap().len(), times);
}

#[then("no status was rendered")]
fn no_status_rendered(world: &mut BoardWorld) {
    assert!(world.frontend.status.lock().unwrap().is_empty());
}

#[then(expr = "entry {string} shows {int} percent in band {string} with {int} available")]
fn entry_shows(
    world: &mut BoardWorld,
    name: String,
    percent: u8,
    band: String,
    available: u32,
) {
    let entries = world.last_status();
    let entry = entries
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no entry named {}", name));
    let view = entry.available_view().expect("entry is out of service");
    assert_eq!(view.rate_percent, percent);
    assert_eq!(view.band, parse_band(&band));
    assert_eq!(view.available, available);
}

#[then(expr = "entry {string} is out of service")]
fn entry_out_of_service(world: &mut BoardWorld, name: String) {
    let entries = world.last_status();
    let entry = entries
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no entry named {}", name));
    assert!(entry.is_out_of_service());
}

#[then("the display mode is valid")]
fn display_valid(world: &mut BoardWorld) {
    assert_eq!(world.last_valid_mode(), Some(true));
}

#[then("the display mode is invalid")]
fn display_invalid(world: &mut BoardWorld) {
    assert_eq!(world.last_valid_mode(), Some(false));
}

#[then(expr = "the status endpoint was requested {int} times")]
fn status_requested(world: &mut BoardWorld, times: usize) {
    assert_eq!(world.http.request_count(), times);
}

#[then("the loading indicator was never shown for the fetch")]
fn loading_not_shown_for_fetch(world: &mut BoardWorld) {
    // The only toggles allowed are the ones around a render
    let loading = world.frontend.loading.lock().unwrap().clone();
    let renders = world.frontend.status.lock().unwrap().len();
    assert_eq!(loading.len(), renders * 2);
}
