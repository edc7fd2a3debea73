use std::fmt;

use eframe::egui::Color32;
use palette::{named, Mix, Srgb};

use crate::data::model::Tweet;

/// Light gray shared by both scales as their neutral stop.
const NEUTRAL: Srgb<u8> = Srgb::new(0xEC, 0xEC, 0xEC);
const SUBJECTIVE_BLUE: Srgb<u8> = Srgb::new(0x44, 0x67, 0xC4);

// ---------------------------------------------------------------------------
// Color metric selector
// ---------------------------------------------------------------------------

/// Which tweet attribute drives marker fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMetric {
    #[default]
    Sentiment,
    Subjectivity,
}

impl ColorMetric {
    pub const ALL: [ColorMetric; 2] = [ColorMetric::Sentiment, ColorMetric::Subjectivity];

    pub fn label(self) -> &'static str {
        match self {
            ColorMetric::Sentiment => "Sentiment",
            ColorMetric::Subjectivity => "Subjectivity",
        }
    }

    /// Read this metric from a tweet.
    pub fn value(self, tweet: &Tweet) -> f64 {
        match self {
            ColorMetric::Sentiment => tweet.sentiment,
            ColorMetric::Subjectivity => tweet.subjectivity,
        }
    }

    /// Forward scale used for marker fill.
    pub fn scale(self) -> ColorScale {
        match self {
            ColorMetric::Sentiment => ColorScale::new(vec![
                (-1.0, named::RED),
                (0.0, NEUTRAL),
                (1.0, named::GREEN),
            ]),
            ColorMetric::Subjectivity => {
                ColorScale::new(vec![(0.0, NEUTRAL), (1.0, SUBJECTIVE_BLUE)])
            }
        }
    }

    /// Legend captions for the (top, bottom) ends.
    pub fn legend_labels(self) -> (&'static str, &'static str) {
        match self {
            ColorMetric::Sentiment => ("Positive", "Negative"),
            ColorMetric::Subjectivity => ("High", "Low"),
        }
    }
}

impl fmt::Display for ColorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Piecewise-linear color scale
// ---------------------------------------------------------------------------

/// Maps a number onto colors by linear RGB interpolation between stops.
///
/// Values outside the domain take the nearest end color; NaN maps to gray.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<(f64, Srgb<f32>)>,
}

impl ColorScale {
    /// `stops` must be sorted by ascending domain value and non-empty.
    pub fn new(stops: Vec<(f64, Srgb<u8>)>) -> Self {
        ColorScale {
            stops: stops
                .into_iter()
                .map(|(v, c)| (v, c.into_format::<f32>()))
                .collect(),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match (self.stops.first(), self.stops.last()) {
            (Some(lo), Some(hi)) => (lo.0, hi.0),
            _ => (0.0, 1.0),
        }
    }

    /// Same domain, colors in reverse order.
    pub fn inverted(&self) -> Self {
        let colors = self.stops.iter().rev().map(|(_, c)| *c);
        ColorScale {
            stops: self.stops.iter().map(|(v, _)| *v).zip(colors).collect(),
        }
    }

    pub fn apply(&self, value: f64) -> Color32 {
        if value.is_nan() || self.stops.is_empty() {
            return Color32::GRAY;
        }

        // Segment whose upper stop is the first one >= value (clamped to the ends).
        let upper = self
            .stops
            .iter()
            .position(|(v, _)| *v >= value)
            .unwrap_or(self.stops.len() - 1)
            .max(1)
            .min(self.stops.len() - 1);
        let rgb = if self.stops.len() == 1 {
            self.stops[0].1
        } else {
            let (v0, c0) = self.stops[upper - 1];
            let (v1, c1) = self.stops[upper];
            let span = v1 - v0;
            let t = if span.abs() < f64::EPSILON {
                0.0
            } else {
                ((value - v0) / span).clamp(0.0, 1.0)
            };
            c0.mix(c1, t as f32)
        };
        to_color32(rgb)
    }

    /// `n` evenly spaced samples across the domain, both ends included.
    pub fn samples(&self, n: usize) -> Vec<Color32> {
        let (lo, hi) = self.domain();
        match n {
            0 => Vec::new(),
            1 => vec![self.apply(lo)],
            _ => (0..n)
                .map(|i| self.apply(lo + (hi - lo) * i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

fn to_color32(rgb: Srgb<f32>) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use eframe::egui::Color32;

    use super::ColorMetric;

    #[test]
    fn sentiment_control_points() {
        let scale = ColorMetric::Sentiment.scale();
        assert_eq!(scale.apply(-1.0), Color32::from_rgb(255, 0, 0));
        assert_eq!(scale.apply(0.0), Color32::from_rgb(0xEC, 0xEC, 0xEC));
        assert_eq!(scale.apply(1.0), Color32::from_rgb(0, 128, 0));
    }

    #[test]
    fn sentiment_interpolates_between_stops() {
        let c = ColorMetric::Sentiment.scale().apply(0.8);
        // Mostly green, a little neutral gray left.
        assert!(c.g() > c.r());
        assert!(c.r() < 0x40 && c.r() > 0x20);
    }

    #[test]
    fn subjectivity_runs_gray_to_blue() {
        let scale = ColorMetric::Subjectivity.scale();
        assert_eq!(scale.apply(0.0), Color32::from_rgb(0xEC, 0xEC, 0xEC));
        assert_eq!(scale.apply(1.0), Color32::from_rgb(0x44, 0x67, 0xC4));
    }

    #[test]
    fn out_of_domain_clamps_and_nan_is_gray() {
        let scale = ColorMetric::Subjectivity.scale();
        assert_eq!(scale.apply(3.0), scale.apply(1.0));
        assert_eq!(scale.apply(-2.0), scale.apply(0.0));
        assert_eq!(scale.apply(f64::NAN), Color32::GRAY);
    }

    #[test]
    fn inverted_scale_swaps_ends() {
        let scale = ColorMetric::Sentiment.scale();
        let inv = scale.inverted();
        assert_eq!(inv.domain(), (-1.0, 1.0));
        assert_eq!(inv.apply(-1.0), scale.apply(1.0));
        assert_eq!(inv.apply(0.0), scale.apply(0.0));
    }

    #[test]
    fn inverted_samples_start_at_the_maximum() {
        let scale = ColorMetric::Sentiment.scale();
        let samples = scale.inverted().samples(20);
        assert_eq!(samples.len(), 20);
        assert_eq!(samples[0], scale.apply(1.0));
        assert_eq!(samples[19], scale.apply(-1.0));
    }
}
