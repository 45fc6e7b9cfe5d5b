//! Status renderer: turns facility status into view-model entries

use std::fmt;

use serde::Serialize;

use crate::model::StatusItem;

/// Anchor prefix linking a summary row to its detail panel
const ANCHOR_PREFIX: &str = "toilet-group";

/// Capacity usage classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Nominal,
    Warning,
    Critical,
}

impl SeverityBand {
    pub fn from_rate(rate_percent: u8) -> Self {
        match rate_percent {
            0..=49 => SeverityBand::Nominal,
            50..=99 => SeverityBand::Warning,
            _ => SeverityBand::Critical,
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityBand::Nominal => write!(f, "nominal"),
            SeverityBand::Warning => write!(f, "warning"),
            SeverityBand::Critical => write!(f, "critical"),
        }
    }
}

/// Free capacity, with "none" kept distinct from a count so the view can
/// swap the number for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Some(u32),
    None,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Some(n) => write!(f, "{}", n),
            Availability::None => write!(f, "none"),
        }
    }
}

/// State of one sub-unit inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailState {
    InUse,
    Available,
    OutOfService,
}

impl fmt::Display for DetailState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailState::InUse => write!(f, "in use"),
            DetailState::Available => write!(f, "available"),
            DetailState::OutOfService => write!(f, "out of service"),
        }
    }
}

/// Callout colour for a facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Primary,
    Danger,
}

impl Accent {
    /// Men's facilities get the primary callout, everything else danger
    pub fn for_name(name: &str) -> Self {
        if name.contains('男') {
            Accent::Primary
        } else {
            Accent::Danger
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailEntry {
    pub name: String,
    pub state: DetailState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableView {
    pub anchor_id: String,
    pub used: u32,
    pub max: u32,
    pub rate_percent: u8,
    pub band: SeverityBand,
    pub available: u32,
    pub availability: Availability,
    pub details: Vec<DetailEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum StatusView {
    Available(AvailableView),
    OutOfService,
}

/// One rendered facility
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEntry {
    pub name: String,
    pub accent: Accent,
    pub view: StatusView,
}

impl StatusEntry {
    pub fn is_out_of_service(&self) -> bool {
        matches!(self.view, StatusView::OutOfService)
    }

    pub fn available_view(&self) -> Option<&AvailableView> {
        match &self.view {
            StatusView::Available(view) => Some(view),
            StatusView::OutOfService => None,
        }
    }
}

/// `round(100 * used / max)` clamped to 100. An empty facility (`max == 0`)
/// has nothing to offer and counts as full.
pub fn rate_percent(used: u32, max: u32) -> u8 {
    if max == 0 {
        return 100;
    }
    let (used, max) = (u64::from(used), u64::from(max));
    let rounded = (200 * used + max) / (2 * max);
    rounded.min(100) as u8
}

/// Shape every top-level item. Output order and anchors follow input order.
pub fn render(items: &[StatusItem]) -> Vec<StatusEntry> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| render_item(index, item))
        .collect()
}

fn render_item(index: usize, item: &StatusItem) -> StatusEntry {
    let accent = Accent::for_name(&item.name);
    if !item.valid {
        return StatusEntry {
            name: item.name.clone(),
            accent,
            view: StatusView::OutOfService,
        };
    }

    let used = item.used.unwrap_or_default();
    let max = item.max.unwrap_or_default();
    let rate = rate_percent(used, max);
    let available = max.saturating_sub(used);
    let details = item
        .details
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|sub| DetailEntry {
            name: sub.name.clone(),
            state: detail_state(sub),
        })
        .collect();

    StatusEntry {
        name: item.name.clone(),
        accent,
        view: StatusView::Available(AvailableView {
            anchor_id: format!("{}-{}", ANCHOR_PREFIX, index),
            used,
            max,
            rate_percent: rate,
            band: SeverityBand::from_rate(rate),
            available,
            availability: if available > 0 {
                Availability::Some(available)
            } else {
                Availability::None
            },
            details,
        }),
    }
}

fn detail_state(sub: &StatusItem) -> DetailState {
    if !sub.valid {
        DetailState::OutOfService
    } else if sub.used.unwrap_or_default() > 0 {
        DetailState::InUse
    } else {
        DetailState::Available
    }
}
