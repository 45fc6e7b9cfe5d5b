//! BDD step definitions for the usage log charts

use chrono::NaiveDate;
use cucumber::{given, then, when};

use crate::world::BoardWorld;

fn graph(label: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "bar",
        "data": {
            "labels": ["09:00", "10:00"],
            "datasets": [{"label": label, "data": [1, 2]}]
        }
    })
}

#[given(expr = "the logs endpoint returns {int} graphs")]
fn logs_return_graphs(world: &mut BoardWorld, count: usize) {
    let graphs: Vec<_> = (0..count).map(|i| graph(&format!("room {}", i))).collect();
    world.http.push_json(
        200,
        serde_json::json!({"success": true, "graphs": graphs}).to_string(),
    );
}

#[given(expr = "the logs endpoint reports failure {string}")]
fn logs_report_failure(world: &mut BoardWorld, message: String) {
    world.http.push_json(
        200,
        serde_json::json!({"success": false, "message": message}).to_string(),
    );
}

#[when(expr = "the usage log is fetched on {string}")]
async fn fetch_usage_log(world: &mut BoardWorld, today: String) {
    let today = NaiveDate::parse_from_str(&today, "%Y-%m-%d").expect("invalid date");
    let result = world.board().fetch_logs(today).await;
    world.log_result = Some(result);
}

#[then(expr = "{int} charts are delivered")]
fn charts_delivered(world: &mut BoardWorld, count: usize) {
    let graphs = world.frontend.graphs.lock().unwrap();
    let last = graphs.last().expect("no charts were delivered");
    assert_eq!(last.len(), count);
}

#[then(expr = "chart {int} is coloured {string}")]
fn chart_coloured(world: &mut BoardWorld, index: usize, color: String) {
    let graphs = world.frontend.graphs.lock().unwrap();
    let last = graphs.last().expect("no charts were delivered");
    assert_eq!(last[index - 1].color, color);
}

#[then(expr = "chart {int} is titled {string}")]
fn chart_titled(world: &mut BoardWorld, index: usize, title: String) {
    let graphs = world.frontend.graphs.lock().unwrap();
    let last = graphs.last().expect("no charts were delivered");
    assert_eq!(last[index - 1].title, title);
}

#[then("the log view is valid")]
fn log_view_valid(world: &mut BoardWorld) {
    assert_eq!(world.frontend.log_modes.lock().unwrap().last(), Some(&true));
}

#[then("the log view shows the error notice")]
fn log_view_error(world: &mut BoardWorld) {
    assert_eq!(world.frontend.log_modes.lock().unwrap().last(), Some(&false));
    assert!(world.frontend.graphs.lock().unwrap().is_empty());
    assert!(matches!(world.log_result, Some(Err(_))));
}

#[then(expr = "the logs request ends with {string}")]
fn logs_request_ends_with(world: &mut BoardWorld, suffix: String) {
    let requests = world.http.requests.lock().unwrap();
    let (_, url) = requests.last().expect("no request was made");
    assert!(url.ends_with(&suffix), "{} does not end with {}", url, suffix);
}
