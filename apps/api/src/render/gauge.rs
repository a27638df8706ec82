//! Semi-circular score gauge rendered as inline SVG.
//!
//! A `Gauge` is an owned handle. The score area holds at most one; replacing it
//! always releases the previous handle before the new one is created.

use std::f64::consts::PI;

use tracing::debug;
use uuid::Uuid;

use crate::models::analysis::Score;

const CENTER_X: f64 = 100.0;
const CENTER_Y: f64 = 100.0;
const RADIUS: f64 = 80.0;
const STROKE_WIDTH: f64 = 24.0;
const FILLED_COLOR: &str = "#0d6efd";
const REMAINDER_COLOR: &str = "#e9ecef";

/// Arc lengths in score units. `filled + remainder == 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeArcs {
    pub filled: u8,
    pub remainder: u8,
}

impl GaugeArcs {
    pub fn for_score(score: Score) -> Self {
        Self {
            filled: score.value(),
            remainder: 100 - score.value(),
        }
    }

    /// Sweep of the filled arc in degrees, out of 180.
    pub fn filled_sweep_degrees(&self) -> f64 {
        180.0 * self.filled as f64 / 100.0
    }
}

#[derive(Debug)]
pub struct Gauge {
    id: Uuid,
    score: Score,
    arcs: GaugeArcs,
    markup: String,
}

impl Gauge {
    fn create(score: Score) -> Self {
        let id = Uuid::new_v4();
        let arcs = GaugeArcs::for_score(score);
        let markup = gauge_markup(id, score, arcs);
        debug!("Created gauge {id} for score {score}");
        Self {
            id,
            score,
            arcs,
            markup,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn arcs(&self) -> GaugeArcs {
        self.arcs
    }

    pub fn overlay_text(&self) -> String {
        format!("{}%", self.score)
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Consumes the handle. After this nothing refers to the gauge's markup.
    pub fn release(self) {
        debug!("Released gauge {}", self.id);
    }
}

/// Releases `previous` (if any), then creates the gauge for `score`.
pub fn replace(previous: Option<Gauge>, score: Score) -> Gauge {
    if let Some(old) = previous {
        old.release();
    }
    Gauge::create(score)
}

/// Point on the gauge circle, `fraction` of the way from the left end over the top.
fn arc_point(fraction: f64) -> (f64, f64) {
    let theta = PI * fraction;
    (
        CENTER_X - RADIUS * theta.cos(),
        CENTER_Y - RADIUS * theta.sin(),
    )
}

fn arc_path(from: f64, to: f64, color: &str) -> String {
    let (x1, y1) = arc_point(from);
    let (x2, y2) = arc_point(to);
    format!(
        r#"<path d="M {x1:.2} {y1:.2} A {RADIUS} {RADIUS} 0 0 1 {x2:.2} {y2:.2}" fill="none" stroke="{color}" stroke-width="{STROKE_WIDTH}"/>"#
    )
}

fn gauge_markup(id: Uuid, score: Score, arcs: GaugeArcs) -> String {
    let split = arcs.filled as f64 / 100.0;
    let filled = arc_path(0.0, split, FILLED_COLOR);
    let remainder = if arcs.remainder > 0 {
        arc_path(split, 1.0, REMAINDER_COLOR)
    } else {
        String::new()
    };

    format!(
        r#"<div class="gauge" id="gauge-{id}" style="position: relative;">
    <svg viewBox="0 0 200 110" role="img" aria-label="Overall score {score} out of 100">
        {filled}
        {remainder}
    </svg>
    <div class="gauge-overlay" style="position: absolute; top: 60%; left: 50%; transform: translate(-50%, -50%); text-align: center;"><strong class="display-5">{score}%</strong></div>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: u32) -> Score {
        Score::new(v).unwrap()
    }

    #[test]
    fn test_arcs_split_proportionally() {
        let arcs = GaugeArcs::for_score(score(82));
        assert_eq!(arcs.filled, 82);
        assert_eq!(arcs.remainder, 18);
        assert!((arcs.filled_sweep_degrees() - 147.6).abs() < 1e-9);
    }

    #[test]
    fn test_overlay_text_has_percent_sign() {
        let gauge = replace(None, score(82));
        assert_eq!(gauge.overlay_text(), "82%");
        assert!(gauge.markup().contains("<strong class=\"display-5\">82%</strong>"));
    }

    #[test]
    fn test_full_score_has_no_remainder_arc() {
        let gauge = replace(None, score(100));
        assert_eq!(gauge.markup().matches("<path").count(), 1);
        assert!(!gauge.markup().contains(REMAINDER_COLOR));

        let gauge = replace(None, score(60));
        assert_eq!(gauge.markup().matches("<path").count(), 2);
    }

    #[test]
    fn test_filled_arc_ends_on_circle() {
        // 50% lands at the top of the circle
        let (x, y) = arc_point(0.5);
        assert!((x - CENTER_X).abs() < 1e-9);
        assert!((y - (CENTER_Y - RADIUS)).abs() < 1e-9);
    }

    #[test]
    fn test_replace_produces_fresh_instance() {
        let first = replace(None, score(70));
        let first_id = first.id();
        let second = replace(Some(first), score(70));
        assert_ne!(second.id(), first_id);
        assert_eq!(second.arcs().filled, 70);
    }
}
