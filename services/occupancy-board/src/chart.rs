//! Log/chart data shaper

use serde::Serialize;
use serde_json::{json, Value};

use crate::model::GraphSeries;

/// The "mpn65" qualitative palette, in order
const MPN65: [&str; 65] = [
    "ff0029", "377eb8", "66a61e", "984ea3", "00d2d5", "ff7f00", "af8d00", "7f80cd", "b3e900",
    "c42e60", "a65628", "f781bf", "8dd3c7", "bebada", "fb8072", "80b1d3", "fdb462", "fccde5",
    "bc80bd", "ffed6f", "c4eaff", "cf8c00", "1b9e77", "d95f02", "e7298a", "e6ab02", "a6761d",
    "0097ff", "00d067", "000000", "252525", "525252", "737373", "969696", "bdbdbd", "f43600",
    "4ba93b", "5779bb", "927acc", "97ee3f", "bf3947", "9f5b00", "f48758", "8caed6", "f2b94f",
    "eff26e", "e43872", "d9b100", "9d7a00", "698cff", "d9d9d9", "00d27e", "d06800", "009f82",
    "c49200", "cbe8ff", "fecddf", "c27eb6", "8cd2ce", "c4b8d9", "f883b0", "a49100", "f48800",
    "27d0df", "a04a9b",
];

const Y_AXIS_LABEL: &str = "Usage count";

/// A chart ready for the chart library, plus the colour it was given
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedSeries {
    pub color: String,
    pub title: String,
    #[serde(flatten)]
    pub series: GraphSeries,
    pub options: Value,
}

/// Exactly `n` colours as `#rrggbb`, cycling through the palette past 65
pub fn palette(n: usize) -> Vec<String> {
    MPN65
        .iter()
        .cycle()
        .take(n)
        .map(|hex| format!("#{}", hex))
        .collect()
}

/// Colour and style each series by position. The inputs are left untouched.
pub fn shape(graphs: &[GraphSeries]) -> Vec<DecoratedSeries> {
    let colors = palette(graphs.len());
    graphs
        .iter()
        .zip(colors)
        .map(|(graph, color)| decorate(graph, color))
        .collect()
}

fn decorate(graph: &GraphSeries, color: String) -> DecoratedSeries {
    let mut series = graph.clone();
    let mut title = String::new();

    if let Some(primary) = series.data.datasets.first_mut() {
        title = primary.label.clone();
        let style = [
            ("backgroundColor", json!(format!("{}66", color))),
            ("hoverBackgroundColor", json!(format!("{}ff", color))),
            ("borderColor", json!(format!("{}aa", color))),
            ("borderWidth", json!(1)),
            ("animation", json!(true)),
        ];
        for (key, value) in style {
            primary.extra.insert(key.to_string(), value);
        }
    }

    let options = json!({
        "title": { "display": true, "fontSize": 28, "text": title },
        "legend": { "display": false },
        "scales": {
            "yAxes": [{
                "display": true,
                "scaleLabel": { "display": true, "fontSize": 18, "labelString": Y_AXIS_LABEL },
                "ticks": { "beginAtZero": true, "precision": 0 }
            }]
        }
    });

    DecoratedSeries {
        color,
        title,
        series,
        options,
    }
}
