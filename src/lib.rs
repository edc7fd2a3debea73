//! Beeswarm chart of tweets grouped by month and colored by sentiment or
//! subjectivity.
//!
//! ```text
//!  file ──► data::loader ──► TweetDataset ──► layout::compute ──► SwarmLayout
//!                                                                    │
//!              ColorMetric + SelectionSet ──► scene::Scene::build ◄──┘
//!                                                  │
//!                                    ui::chart (egui_plot) / svg
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod layout;
pub mod scene;
pub mod selection;
pub mod state;
pub mod svg;
pub mod ui;
