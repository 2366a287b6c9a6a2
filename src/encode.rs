//! Color and radius policy for graph nodes.
//!
//! Objective nodes are encoded from their success score; every other type is
//! a table lookup in the [`Palette`] with an optional integer size boost.

use crate::ir::NodeKind;
use crate::theme::{FALLBACK_COLOR, Palette, Rgb};

pub const OBJECTIVE_MIN_RADIUS: u32 = 8;
const SCORE_RADIUS_SPAN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub r: u32,
    pub color: String,
}

/// Restricts `value` to [0, 1]. NaN maps to 0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Maps a score onto the gradient described by `stops`, spaced evenly over
/// [0, 1].
pub fn score_to_color(score: f64, stops: &[Rgb]) -> Rgb {
    match stops {
        [] => FALLBACK_COLOR,
        [only] => *only,
        _ => {
            let segments = stops.len() - 1;
            let t = clamp01(score) * segments as f64;
            let idx = (t.floor() as usize).min(segments - 1);
            stops[idx].lerp(stops[idx + 1], t - idx as f64)
        }
    }
}

pub fn objective_radius(base: u32, score: f64) -> u32 {
    let boost = (clamp01(score) * SCORE_RADIUS_SPAN).round() as u32;
    base.saturating_add(boost).max(OBJECTIVE_MIN_RADIUS)
}

/// Negative hints are ignored so a node never shrinks below its base.
pub fn sized_radius(base: u32, size_hint: Option<i64>) -> u32 {
    let boost = size_hint
        .filter(|hint| *hint > 0)
        .map(|hint| u32::try_from(hint).unwrap_or(u32::MAX))
        .unwrap_or(0);
    base.saturating_add(boost).max(1)
}

pub fn encode(palette: &Palette, tag: &str, kind: NodeKind, score: f64, size_hint: Option<i64>) -> Encoding {
    let base = palette.base_radius(tag);
    if kind.is_objective() {
        Encoding {
            r: objective_radius(base, score),
            color: score_to_color(score, &palette.score_stops).to_hex(),
        }
    } else {
        Encoding {
            r: sized_radius(base, size_hint),
            color: palette.color_for(tag).to_hex(),
        }
    }
}
