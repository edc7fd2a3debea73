use eframe::egui::{pos2, vec2, Color32, Pos2, Rect, Stroke};

use crate::color::ColorMetric;
use crate::config::ChartConfig;
use crate::data::model::TweetDataset;
use crate::layout::SwarmLayout;
use crate::selection::SelectionSet;

pub const AXIS_FONT_SIZE: f32 = 14.0;
pub const LEGEND_FONT_SIZE: f32 = 12.0;
/// Gap between the axis line and the right edge of its labels.
const AXIS_LABEL_GAP: f32 = 3.0;
const SELECTED_STROKE: Stroke = Stroke {
    width: 2.0,
    color: Color32::BLACK,
};

// ---------------------------------------------------------------------------
// Scene primitives (canvas pixel coordinates, y pointing down)
// ---------------------------------------------------------------------------

/// One filled circle per tweet.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Index of the tweet in the dataset.
    pub index: usize,
    pub center: Pos2,
    pub radius: f32,
    pub fill: Color32,
    pub selected: bool,
}

impl Marker {
    pub fn stroke(&self) -> Stroke {
        if self.selected {
            SELECTED_STROKE
        } else {
            Stroke::NONE
        }
    }

    pub fn contains(&self, point: Pos2) -> bool {
        self.center.distance_sq(point) <= self.radius * self.radius
    }
}

/// A bold month label, right-aligned at `anchor` and vertically centered on it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub anchor: Pos2,
}

/// Left-aligned legend text with its baseline at `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub position: Pos2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Top to bottom.
    pub swatches: Vec<(Rect, Color32)>,
    pub top: Caption,
    pub bottom: Caption,
}

/// Everything needed to draw the chart once. Rebuilt from scratch on change.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub markers: Vec<Marker>,
    pub axis: Vec<AxisLabel>,
    pub legend: Legend,
}

impl Scene {
    pub fn build(
        dataset: &TweetDataset,
        layout: &SwarmLayout,
        metric: ColorMetric,
        selection: &SelectionSet,
        config: &ChartConfig,
    ) -> Self {
        let origin = vec2(config.margin.left, config.margin.top);
        let scale = metric.scale();

        let markers = dataset
            .tweets
            .iter()
            .zip(&layout.positions)
            .enumerate()
            .map(|(index, (tweet, pos))| Marker {
                index,
                center: (origin + *pos).to_pos2(),
                radius: config.marker_radius,
                fill: scale.apply(metric.value(tweet)),
                selected: selection.contains(index),
            })
            .collect();

        let axis = dataset
            .months
            .iter()
            .enumerate()
            .map(|(band, month)| AxisLabel {
                text: month.clone(),
                anchor: pos2(
                    origin.x + config.axis_x - AXIS_LABEL_GAP,
                    origin.y + layout.bands.center_of(band),
                ),
            })
            .collect();

        Scene {
            width: config.width,
            height: config.height,
            markers,
            axis,
            legend: build_legend(metric, config),
        }
    }

    /// Topmost marker under `point`, if any.
    pub fn marker_at(&self, point: Pos2) -> Option<usize> {
        self.markers
            .iter()
            .rev()
            .find(|m| m.contains(point))
            .map(|m| m.index)
    }
}

fn build_legend(metric: ColorMetric, config: &ChartConfig) -> Legend {
    let lc = &config.legend;
    let origin = pos2(config.margin.left + lc.x, config.margin.top + lc.y);
    let swatch_height = lc.height / lc.swatches.max(1) as f32;

    let swatches = metric
        .scale()
        .inverted()
        .samples(lc.swatches)
        .into_iter()
        .enumerate()
        .map(|(i, color)| {
            let min = origin + vec2(0.0, swatch_height * i as f32);
            (Rect::from_min_size(min, vec2(lc.width, swatch_height)), color)
        })
        .collect();

    let (top, bottom) = metric.legend_labels();
    let text_x = origin.x + lc.width + 5.0;
    Legend {
        swatches,
        top: Caption {
            text: top.to_string(),
            position: pos2(text_x, origin.y + 5.0),
        },
        bottom: Caption {
            text: bottom.to_string(),
            position: pos2(text_x, origin.y + lc.height + 20.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Tweet;
    use crate::layout;

    fn example() -> (TweetDataset, SwarmLayout, ChartConfig) {
        let config = ChartConfig::default();
        let ds = TweetDataset::from_tweets(
            vec![
                Tweet::new("Jan", 0.8, 0.2, "A"),
                Tweet::new("Jan", -0.5, 0.9, "B"),
            ],
            config.max_records,
        );
        let layout = layout::compute(&ds, &config).unwrap();
        (ds, layout, config)
    }

    #[test]
    fn example_markers_are_colored_by_sentiment() {
        let (ds, layout, config) = example();
        let scene = Scene::build(
            &ds,
            &layout,
            ColorMetric::Sentiment,
            &SelectionSet::default(),
            &config,
        );

        assert_eq!(scene.markers.len(), 2);
        let a = &scene.markers[0];
        let b = &scene.markers[1];
        assert!(a.fill.g() > a.fill.r(), "A should be green-ish: {:?}", a.fill);
        assert!(b.fill.r() > b.fill.g(), "B should be red-ish: {:?}", b.fill);

        // Both sit in the single "Jan" band.
        let (top, bottom) = layout.bands.extent_of(0);
        for m in &scene.markers {
            let y = m.center.y - config.margin.top;
            assert!(y > top && y < bottom);
            assert_eq!(m.stroke(), Stroke::NONE);
        }
        assert_eq!(scene.axis.len(), 1);
        assert_eq!(scene.axis[0].text, "Jan");
    }

    #[test]
    fn subjectivity_recolors_without_moving_markers() {
        let (ds, layout, config) = example();
        let sel = SelectionSet::default();
        let sentiment = Scene::build(&ds, &layout, ColorMetric::Sentiment, &sel, &config);
        let subjectivity = Scene::build(&ds, &layout, ColorMetric::Subjectivity, &sel, &config);

        for (a, b) in sentiment.markers.iter().zip(&subjectivity.markers) {
            assert_eq!(a.center, b.center);
            assert_ne!(a.fill, b.fill);
        }
        // "B" is highly subjective: blue dominates.
        let b = subjectivity.markers[1].fill;
        assert!(b.b() > b.r() && b.b() > b.g());
    }

    #[test]
    fn selected_markers_get_a_black_stroke() {
        let (ds, layout, config) = example();
        let mut sel = SelectionSet::default();
        sel.toggle(0);
        let scene = Scene::build(&ds, &layout, ColorMetric::Sentiment, &sel, &config);
        assert_eq!(scene.markers[0].stroke(), SELECTED_STROKE);
        assert_eq!(scene.markers[1].stroke(), Stroke::NONE);
    }

    #[test]
    fn legend_reads_positive_on_top() {
        let (ds, layout, config) = example();
        let scene = Scene::build(
            &ds,
            &layout,
            ColorMetric::Sentiment,
            &SelectionSet::default(),
            &config,
        );
        let legend = &scene.legend;
        assert_eq!(legend.swatches.len(), 20);
        assert_eq!(legend.top.text, "Positive");
        assert_eq!(legend.bottom.text, "Negative");

        let (first_rect, first_color) = legend.swatches[0];
        let (last_rect, last_color) = legend.swatches[19];
        assert_eq!(first_color, ColorMetric::Sentiment.scale().apply(1.0));
        assert_eq!(last_color, ColorMetric::Sentiment.scale().apply(-1.0));
        assert_eq!(first_rect.min, pos2(640.0, 170.0));
        assert!((last_rect.max.y - 370.0).abs() < 1e-3);
        assert_eq!(first_rect.width(), 20.0);
    }

    #[test]
    fn subjectivity_legend_labels() {
        let (ds, layout, config) = example();
        let scene = Scene::build(
            &ds,
            &layout,
            ColorMetric::Subjectivity,
            &SelectionSet::default(),
            &config,
        );
        assert_eq!(scene.legend.top.text, "High");
        assert_eq!(scene.legend.bottom.text, "Low");
    }

    #[test]
    fn hit_test_finds_the_marker_under_the_pointer() {
        let (ds, layout, config) = example();
        let scene = Scene::build(
            &ds,
            &layout,
            ColorMetric::Sentiment,
            &SelectionSet::default(),
            &config,
        );
        let b = &scene.markers[1];
        assert_eq!(scene.marker_at(b.center + vec2(1.0, -1.0)), Some(1));
        assert_eq!(scene.marker_at(pos2(-50.0, -50.0)), None);
    }
}
