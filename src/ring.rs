//! Concentric-ring layout for the mood factor chart.
//!
//! Each factor gets its own ring, outermost first. A ring's arc covers the
//! factor's share of the total points minus a small gap, and every arc starts
//! at the top of its circle.

use crate::models::MoodFactor;
use crate::theme::MoodTheme;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::f64::consts::PI;
use std::fmt::Write as _;

pub const CHART_SIZE: f64 = 192.0;
pub const BASE_RADIUS: f64 = 70.0;
pub const RING_SPACING: f64 = 10.0;
pub const STROKE_WIDTH: f64 = 6.0;
/// Share of each ring's circumference left empty.
pub const ARC_GAP: f64 = 0.02;
/// Duration of the centre label count-up animation in the browser.
pub const LABEL_ANIMATION_MS: u32 = 1200;

#[derive(Debug, Clone, PartialEq)]
pub struct RingArc {
    pub name: String,
    pub color: String,
    pub radius: f64,
    pub circumference: f64,
    /// Share of the circumference covered by the arc, in `[0, 1]`.
    pub fraction: f64,
    pub arc_length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub center: f64,
    pub stroke_width: f64,
    pub rings: Vec<RingArc>,
}

pub fn layout_rings(factors: &[MoodFactor]) -> RingLayout {
    let total: f64 = factors.iter().map(|factor| factor.points).sum::<f64>().max(1.0);

    let rings = factors
        .iter()
        .enumerate()
        .filter_map(|(index, factor)| {
            let radius = BASE_RADIUS - index as f64 * RING_SPACING;
            if radius <= STROKE_WIDTH / 2.0 {
                return None;
            }
            let circumference = 2.0 * PI * radius;
            let fraction = (factor.points / total - ARC_GAP).max(0.0);
            Some(RingArc {
                name: factor.name.clone(),
                color: factor.color.clone(),
                radius,
                circumference,
                fraction,
                arc_length: fraction * circumference,
            })
        })
        .collect();

    RingLayout {
        center: CHART_SIZE / 2.0,
        stroke_width: STROKE_WIDTH,
        rings,
    }
}

/// Renders the layout as an inline SVG with the score in the centre.
pub fn render_svg(layout: &RingLayout, mood_score: u8) -> String {
    let c = layout.center;
    let mut svg = format!(
        r#"<svg class="mood-rings" viewBox="0 0 {size} {size}" role="img" aria-label="Mood factors">"#,
        size = CHART_SIZE
    );

    for ring in &layout.rings {
        let _ = write!(
            svg,
            r#"<circle class="ring-track" cx="{c}" cy="{c}" r="{r}" fill="none" stroke-width="{w}" />"#,
            r = ring.radius,
            w = layout.stroke_width,
        );
        let _ = write!(
            svg,
            r#"<circle class="ring-arc" cx="{c}" cy="{c}" r="{r}" fill="none" stroke="{color}" stroke-width="{w}" stroke-linecap="round" stroke-dasharray="{arc:.2} {circ:.2}" transform="rotate(-90 {c} {c})"><title>{name}</title></circle>"#,
            r = ring.radius,
            color = encode_double_quoted_attribute(&ring.color),
            w = layout.stroke_width,
            arc = ring.arc_length,
            circ = ring.circumference,
            name = encode_text(&ring.name),
        );
    }

    let theme = MoodTheme::from_score(mood_score);
    let _ = write!(
        svg,
        r#"<text class="ring-score mood-{theme}" x="{c}" y="{c}" text-anchor="middle" dominant-baseline="central" fill="{fill}" data-score="{mood_score}" data-duration="{LABEL_ANIMATION_MS}">{mood_score}</text></svg>"#,
        theme = theme.as_str(),
        fill = theme.color(),
    );
    svg
}
