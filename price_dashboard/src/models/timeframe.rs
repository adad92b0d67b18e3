use serde::Serialize;

/// Bar interval sent to the price service.
///
/// The dashboard charts daily closes only; the service's wire form is `"day"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    #[default]
    Day,
}

impl TimeFrame {
    pub const fn day() -> Self {
        TimeFrame::Day
    }
}
