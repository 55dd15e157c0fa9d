//! Rating display helpers

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::MAX_STARS;

/// Five star slots split into full, half and empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StarRow {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRow {
    /// Average rating: `floor(rating)` full stars, then a half star when the
    /// fractional part is at least 0.5. Values are clamped to 0..=5.
    pub fn from_average(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, f64::from(MAX_STARS))
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = full < MAX_STARS && rating.fract() >= 0.5;
        let empty = MAX_STARS - full - u8::from(half);
        Self { full, half, empty }
    }

    /// Whole-star review rating: `rating` filled, the rest empty
    pub fn from_review(rating: i32) -> Self {
        let full = rating.clamp(0, i32::from(MAX_STARS)) as u8;
        Self {
            full,
            half: false,
            empty: MAX_STARS - full,
        }
    }

    /// Text rendering, e.g. "★★★⯨☆"
    pub fn glyphs(&self) -> String {
        let mut out = "★".repeat(usize::from(self.full));
        if self.half {
            out.push('⯨');
        }
        out.push_str(&"☆".repeat(usize::from(self.empty)));
        out
    }
}

/// Card label: one decimal, or "N/A"
pub fn card_label(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Star row for an optional average; `None` renders as "No rating"
pub fn star_row(rating: Option<f64>) -> Option<StarRow> {
    rating.map(StarRow::from_average)
}
