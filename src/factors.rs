//! Turns the backend's free-text factor descriptions into [`MoodFactor`]s.
//!
//! The backend describes each influence on the predicted mood as a sentence
//! such as `"Temperature had a 12 points impact"`. Only the number directly in
//! front of the word `points` counts.

use crate::models::MoodFactor;
use once_cell::sync::Lazy;
use regex::Regex;

static POINTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([+-]?(?:\d+(?:\.\d+)?|\.\d+))\s*points\b").expect("points pattern is valid")
});

/// Ring colours, assigned by position and reused cyclically.
pub const PALETTE: [&str; 5] = [
    "hsl(267, 75%, 80%)",
    "hsl(151, 65%, 75%)",
    "hsl(25, 65%, 75%)",
    "hsl(200, 70%, 75%)",
    "hsl(340, 70%, 80%)",
];

/// Fallback factors as shares of the mood score.
const DEFAULT_FACTORS: [(&str, f64); 3] = [("Weather", 0.40), ("Location", 0.35), ("Sleep", 0.25)];

pub fn parse_factors(mood_score: u8, descriptions: &[String]) -> Vec<MoodFactor> {
    let parsed: Vec<(String, f64)> = descriptions
        .iter()
        .filter_map(|text| parse_description(text))
        .collect();

    if parsed.is_empty() {
        return default_factors(mood_score);
    }

    parsed
        .into_iter()
        .enumerate()
        .map(|(index, (name, points))| build_factor(index, name, points, mood_score))
        .collect()
}

pub fn default_factors(mood_score: u8) -> Vec<MoodFactor> {
    DEFAULT_FACTORS
        .iter()
        .enumerate()
        .map(|(index, (name, share))| {
            build_factor(index, (*name).to_string(), f64::from(mood_score) * share, mood_score)
        })
        .collect()
}

fn parse_description(text: &str) -> Option<(String, f64)> {
    let captures = POINTS.captures(text)?;
    let number = captures.get(1)?;
    let points = number.as_str().parse::<f64>().ok()?.abs();

    let name = factor_name(text, number.start());
    Some((name, points))
}

fn factor_name(text: &str, points_start: usize) -> String {
    let head = [" had a ", ":", " of "]
        .iter()
        .find_map(|separator| text.find(separator).map(|at| &text[..at]))
        .unwrap_or(&text[..points_start]);
    head.trim().to_string()
}

fn build_factor(index: usize, name: String, points: f64, mood_score: u8) -> MoodFactor {
    let name = if name.is_empty() {
        format!("Factor {}", index + 1)
    } else {
        name
    };
    MoodFactor {
        name,
        impact: impact(points, mood_score),
        points,
        color: PALETTE[index % PALETTE.len()].to_string(),
    }
}

fn impact(points: f64, mood_score: u8) -> u32 {
    if mood_score == 0 {
        return 0;
    }
    (points / f64::from(mood_score) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn had_a_phrase_names_the_factor() {
        let factors = parse_factors(75, &strings(&["Temperature had a 12 points impact"]));
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].name, "Temperature");
        assert_eq!(factors[0].points, 12.0);
        assert_eq!(factors[0].impact, 16);
        assert_eq!(factors[0].color, PALETTE[0]);
    }

    #[test]
    fn separators_apply_in_priority_order() {
        let factors = parse_factors(
            50,
            &strings(&[
                "Sleep quality: +5 points",
                "Amount of daylight added -3.5 Points",
                "Humidity -2 points",
            ]),
        );
        let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Sleep quality", "Amount", "Humidity"]);
        assert_eq!(factors[1].points, 3.5);
        assert_eq!(factors[2].points, 2.0);
    }

    #[test]
    fn only_the_adjacent_number_counts() {
        let factors = parse_factors(80, &strings(&["Air quality index 42 had a 7 points effect"]));
        assert_eq!(factors[0].points, 7.0);
        assert_eq!(factors[0].name, "Air quality index 42");
    }

    #[test]
    fn bare_decimal_points_keep_their_size() {
        let factors = parse_factors(50, &strings(&["Humidity had a .5 points impact"]));
        assert_eq!(factors[0].name, "Humidity");
        assert_eq!(factors[0].points, 0.5);
        assert_eq!(factors[0].impact, 1);
    }

    #[test]
    fn unparseable_strings_are_dropped() {
        let factors = parse_factors(
            60,
            &strings(&["no number here", "Traffic had a 6 points impact", "points"]),
        );
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].name, "Traffic");
        assert_eq!(factors[0].color, PALETTE[0]);
    }

    #[test]
    fn nothing_parseable_yields_defaults() {
        let factors = parse_factors(80, &strings(&["calm day", "sunny"]));
        assert_eq!(factors.len(), 3);
        assert_eq!(factors, default_factors(80));

        let empty = parse_factors(80, &[]);
        assert_eq!(empty, default_factors(80));
    }

    #[test]
    fn defaults_are_proportional_to_score() {
        let factors = default_factors(80);
        let points: Vec<f64> = factors.iter().map(|f| f.points).collect();
        assert_eq!(points, [32.0, 28.0, 20.0]);
        let impacts: Vec<u32> = factors.iter().map(|f| f.impact).collect();
        assert_eq!(impacts, [40, 35, 25]);
    }

    #[test]
    fn zero_score_has_zero_impact() {
        let factors = parse_factors(0, &strings(&["Noise had a 4 points impact"]));
        assert_eq!(factors[0].impact, 0);
        assert_eq!(factors[0].points, 4.0);
    }

    #[test]
    fn palette_wraps_around() {
        let inputs: Vec<String> = (0..7).map(|i| format!("F{i} had a 1 points impact")).collect();
        let factors = parse_factors(50, &inputs);
        assert_eq!(factors[5].color, PALETTE[0]);
        assert_eq!(factors[6].color, PALETTE[1]);
    }
}
