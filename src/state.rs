use crate::color::ColorMetric;
use crate::config::ChartConfig;
use crate::data::model::{Tweet, TweetDataset};
use crate::layout::{self, SwarmLayout};
use crate::scene::Scene;
use crate::selection::SelectionSet;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ChartConfig,

    /// Loaded tweets (None until user loads a file).
    pub dataset: Option<TweetDataset>,

    /// Metric mapped to marker fill.
    pub metric: ColorMetric,

    /// Tweets the user clicked, newest first.
    pub selection: SelectionSet,

    /// Marker positions for the current dataset (cached).
    pub layout: Option<SwarmLayout>,

    /// How many layouts have been computed.
    pub layout_runs: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl AppState {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            dataset: None,
            metric: ColorMetric::default(),
            selection: SelectionSet::default(),
            layout: None,
            layout_runs: 0,
            status_message: None,
        }
    }

    /// Ingest freshly loaded tweets: keep the first `max_records`, reset the
    /// selection and lay the chart out.
    pub fn set_tweets(&mut self, tweets: Vec<Tweet>) {
        let total = tweets.len();
        let dataset = TweetDataset::from_tweets(tweets, self.config.max_records);
        if dataset.len() < total {
            log::info!("Plotting the first {} of {total} tweets", dataset.len());
        }
        if dataset.is_empty() {
            log::warn!("Dataset has no tweets; nothing to draw");
        }

        self.selection.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.relayout();
    }

    /// Switch the color metric. Re-lays out the chart; the selection is kept.
    pub fn set_metric(&mut self, metric: ColorMetric) {
        if metric == self.metric {
            return;
        }
        log::info!("Coloring by {metric}");
        self.metric = metric;
        self.relayout();
    }

    /// Recompute marker positions from scratch.
    pub fn relayout(&mut self) {
        self.layout = self
            .dataset
            .as_ref()
            .and_then(|ds| layout::compute(ds, &self.config));
        if self.layout.is_some() {
            self.layout_runs += 1;
            log::info!("Layout #{} ready ({})", self.layout_runs, self.metric);
        }
    }

    /// Toggle selection of tweet `index` (a marker click).
    pub fn toggle_selection(&mut self, index: usize) {
        let in_range = self.dataset.as_ref().is_some_and(|ds| index < ds.len());
        if !in_range {
            return;
        }
        let selected = self.selection.toggle(index);
        log::debug!("Tweet {index} selected: {selected}");
    }

    /// Selected tweets, most recently selected first.
    pub fn selected_tweets(&self) -> Vec<&Tweet> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        self.selection
            .iter()
            .filter_map(|i| ds.tweets.get(i))
            .collect()
    }

    /// Drawable scene for the current state; `None` when there is nothing to draw.
    pub fn scene(&self) -> Option<Scene> {
        let ds = self.dataset.as_ref()?;
        let layout = self.layout.as_ref()?;
        Some(Scene::build(
            ds,
            layout,
            self.metric,
            &self.selection,
            &self.config,
        ))
    }
}
