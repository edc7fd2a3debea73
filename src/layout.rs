use eframe::egui::{vec2, Vec2};

use crate::config::{ChartConfig, ForceConfig};
use crate::data::model::TweetDataset;

const INITIAL_RADIUS: f32 = 10.0;

// ---------------------------------------------------------------------------
// Band scale: month → vertical pixel range
// ---------------------------------------------------------------------------

/// Splits `[0, range]` into `count` equal bands with inner and outer padding,
/// centered in the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    pub fn new(count: usize, range: f32, padding: f32) -> Self {
        let n = count as f32;
        let step = range / (n - padding + 2.0 * padding).max(1.0);
        let start = (range - step * (n - padding)) * 0.5;
        BandScale {
            count,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// Top edge of band `index`.
    pub fn start_of(&self, index: usize) -> f32 {
        self.start + self.step * index as f32
    }

    pub fn center_of(&self, index: usize) -> f32 {
        self.start_of(index) + self.bandwidth * 0.5
    }

    /// `(top, bottom)` of band `index`.
    pub fn extent_of(&self, index: usize) -> (f32, f32) {
        let top = self.start_of(index);
        (top, top + self.bandwidth)
    }
}

// ---------------------------------------------------------------------------
// Layout result
// ---------------------------------------------------------------------------

/// Marker centers in inner-chart coordinates, one per tweet (same index).
#[derive(Debug, Clone)]
pub struct SwarmLayout {
    pub positions: Vec<Vec2>,
    /// Band index of each tweet.
    pub bands_of: Vec<usize>,
    pub bands: BandScale,
}

/// Lay out every tweet of the dataset. Returns `None` for an empty dataset.
pub fn compute(dataset: &TweetDataset, config: &ChartConfig) -> Option<SwarmLayout> {
    if dataset.is_empty() {
        return None;
    }

    let bands = BandScale::new(
        dataset.months.len(),
        config.inner_height(),
        config.band_padding,
    );
    let bands_of: Vec<usize> = dataset
        .tweets
        .iter()
        .map(|t| dataset.month_index(&t.month).unwrap_or(0))
        .collect();
    let y_targets: Vec<f32> = bands_of.iter().map(|&b| bands.center_of(b)).collect();

    let mut sim = Simulation::new(y_targets, config.collide_radius(), config.forces);
    for _ in 0..config.forces.iterations {
        sim.tick();
    }

    log::debug!(
        "Laid out {} tweets in {} bands after {} ticks (alpha {:.4})",
        dataset.len(),
        bands.count(),
        config.forces.iterations,
        sim.alpha
    );

    Some(SwarmLayout {
        positions: sim.nodes.iter().map(|n| n.position).collect(),
        bands_of,
        bands,
    })
}

// ---------------------------------------------------------------------------
// Force simulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Node {
    position: Vec2,
    velocity: Vec2,
}

/// Velocity-Verlet style relaxation with a decaying `alpha` that scales the
/// positioning forces. Collisions are resolved at full strength every tick.
struct Simulation {
    nodes: Vec<Node>,
    y_targets: Vec<f32>,
    collide_radius: f32,
    forces: ForceConfig,
    alpha: f32,
    alpha_decay: f32,
    jiggle: Lcg,
}

impl Simulation {
    fn new(y_targets: Vec<f32>, collide_radius: f32, forces: ForceConfig) -> Self {
        Simulation {
            nodes: (0..y_targets.len()).map(phyllotaxis).collect(),
            y_targets,
            collide_radius,
            forces,
            alpha: 1.0,
            alpha_decay: forces.alpha_decay(),
            jiggle: Lcg::new(),
        }
    }

    fn tick(&mut self) {
        self.alpha += (0.0 - self.alpha) * self.alpha_decay;
        let alpha = self.alpha;

        for (node, &target_y) in self.nodes.iter_mut().zip(&self.y_targets) {
            let f = &self.forces;
            node.velocity.x += (f.x_target - node.position.x) * f.x_strength * alpha;
            node.velocity.y += (target_y - node.position.y) * f.y_strength * alpha;
        }

        self.collide();

        let keep = 1.0 - self.forces.velocity_decay;
        for node in &mut self.nodes {
            node.velocity *= keep;
            node.position += node.velocity;
        }
    }

    /// One pass of pairwise overlap removal on the predicted positions.
    fn collide(&mut self) {
        let min_distance = self.collide_radius * 2.0;
        let min_distance_sq = min_distance * min_distance;
        let strength = self.forces.collide_strength;

        for i in 0..self.nodes.len() {
            let predicted_i = self.nodes[i].position + self.nodes[i].velocity;
            for j in (i + 1)..self.nodes.len() {
                let other = self.nodes[j];
                let mut delta = predicted_i - (other.position + other.velocity);
                if delta.x.abs() >= min_distance || delta.y.abs() >= min_distance {
                    continue;
                }
                let mut distance_sq = delta.length_sq();
                if distance_sq >= min_distance_sq {
                    continue;
                }

                if delta.x == 0.0 {
                    delta.x = self.jiggle.jiggle();
                    distance_sq += delta.x * delta.x;
                }
                if delta.y == 0.0 {
                    delta.y = self.jiggle.jiggle();
                    distance_sq += delta.y * delta.y;
                }
                let distance = distance_sq.sqrt();
                // Equal radii: each node takes half of the correction.
                let push = delta * ((min_distance - distance) / distance * strength * 0.5);
                self.nodes[i].velocity += push;
                self.nodes[j].velocity -= push;
            }
        }
    }
}

/// Deterministic spiral start so repeated layouts of the same data agree.
fn phyllotaxis(index: usize) -> Node {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
    let angle = index as f32 * golden_angle;
    Node {
        position: vec2(radius * angle.cos(), radius * angle.sin()),
        velocity: Vec2::ZERO,
    }
}

/// Linear congruential generator used only to break exact coincidences.
struct Lcg {
    state: u64,
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    fn new() -> Self {
        Lcg { state: 1 }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = (Self::A * self.state + Self::C) % Self::M;
        self.state as f32 / Self::M as f32
    }

    fn jiggle(&mut self) -> f32 {
        (self.next_f32() - 0.5) * 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Tweet;

    fn dataset(months: &[(&str, usize)]) -> TweetDataset {
        let mut tweets = Vec::new();
        for (month, count) in months {
            for i in 0..*count {
                tweets.push(Tweet::new(month, 0.0, 0.5, &format!("{month} {i}")));
            }
        }
        TweetDataset::from_tweets(tweets, 300)
    }

    #[test]
    fn single_band_is_centered() {
        let bands = BandScale::new(1, 540.0, 0.1);
        assert!((bands.center_of(0) - 270.0).abs() < 1e-3);
        assert!((bands.bandwidth() - 441.818).abs() < 1e-2);
    }

    #[test]
    fn bands_are_symmetric_and_padded() {
        let bands = BandScale::new(3, 540.0, 0.1);
        assert!((bands.center_of(1) - 270.0).abs() < 1e-3);
        assert!((bands.center_of(0) + bands.center_of(2) - 540.0).abs() < 1e-3);
        let (_, bottom0) = bands.extent_of(0);
        let (top1, _) = bands.extent_of(1);
        assert!(top1 > bottom0);
        assert!(bands.start_of(0) > 0.0);
    }

    #[test]
    fn empty_dataset_has_no_layout() {
        let ds = TweetDataset::from_tweets(Vec::new(), 300);
        assert!(compute(&ds, &ChartConfig::default()).is_none());
    }

    fn assert_inside_bands(layout: &SwarmLayout) {
        for (pos, &band) in layout.positions.iter().zip(&layout.bands_of) {
            let (top, bottom) = layout.bands.extent_of(band);
            assert!(
                pos.y > top && pos.y < bottom,
                "y {} outside band {band} ({top}, {bottom})",
                pos.y
            );
        }
    }

    /// Overlapping pairs (closer than the collision diameter minus 1 px),
    /// total pairs and mean nearest-neighbour distance.
    fn overlap_stats(layout: &SwarmLayout, config: &ChartConfig) -> (usize, usize, f32) {
        let min_distance = config.collide_radius() * 2.0;
        let n = layout.positions.len();
        let mut overlapping = 0;
        let mut nearest_sum = 0.0;
        for i in 0..n {
            let mut nearest = f32::INFINITY;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = (layout.positions[i] - layout.positions[j]).length();
                nearest = nearest.min(d);
                if j > i && d < min_distance - 1.0 {
                    overlapping += 1;
                }
            }
            nearest_sum += nearest;
        }
        (overlapping, n * (n - 1) / 2, nearest_sum / n as f32)
    }

    #[test]
    fn every_marker_stays_inside_its_band() {
        let ds = dataset(&[("Jan", 12), ("Feb", 8), ("Mar", 15)]);
        let layout = compute(&ds, &ChartConfig::default()).unwrap();
        assert_eq!(layout.positions.len(), ds.len());
        assert_inside_bands(&layout);
    }

    #[test]
    fn markers_rarely_overlap() {
        let config = ChartConfig::default();
        let ds = dataset(&[("Jan", 25), ("Feb", 25)]);
        let layout = compute(&ds, &config).unwrap();
        let (overlapping, pairs, mean_nearest) = overlap_stats(&layout, &config);
        assert!(overlapping * 20 <= pairs, "{overlapping} of {pairs} pairs overlap");
        assert!(mean_nearest >= config.marker_radius * 2.0);
    }

    #[test]
    fn full_single_month_stays_in_band() {
        let config = ChartConfig::default();
        let ds = dataset(&[("Jan", 300)]);
        let layout = compute(&ds, &config).unwrap();
        assert_eq!(layout.positions.len(), config.max_records);
        assert_inside_bands(&layout);
        let (overlapping, pairs, mean_nearest) = overlap_stats(&layout, &config);
        assert!(overlapping * 20 <= pairs, "{overlapping} of {pairs} pairs overlap");
        assert!(mean_nearest >= config.marker_radius * 2.0);
    }

    #[test]
    fn full_dataset_over_six_months_stays_in_bands() {
        let config = ChartConfig::default();
        let months: Vec<(String, usize)> = (1..=6).map(|m| (format!("M{m}"), 50)).collect();
        let months: Vec<(&str, usize)> = months.iter().map(|(m, c)| (m.as_str(), *c)).collect();
        let ds = dataset(&months);
        let layout = compute(&ds, &config).unwrap();
        assert_eq!(layout.bands.count(), 6);
        assert_eq!(layout.positions.len(), config.max_records);
        assert_inside_bands(&layout);
        let (overlapping, pairs, _) = overlap_stats(&layout, &config);
        assert!(overlapping * 20 <= pairs, "{overlapping} of {pairs} pairs overlap");
    }

    #[test]
    fn markers_gather_around_the_target_column() {
        let config = ChartConfig::default();
        let ds = dataset(&[("Jan", 20)]);
        let layout = compute(&ds, &config).unwrap();
        let mean_x = layout.positions.iter().map(|p| p.x).sum::<f32>() / ds.len() as f32;
        assert!((mean_x - config.forces.x_target).abs() < 20.0, "mean x {mean_x}");
    }

    #[test]
    fn layout_is_deterministic() {
        let ds = dataset(&[("Jan", 10), ("Feb", 10)]);
        let a = compute(&ds, &ChartConfig::default()).unwrap();
        let b = compute(&ds, &ChartConfig::default()).unwrap();
        assert_eq!(a.positions, b.positions);
    }
}
