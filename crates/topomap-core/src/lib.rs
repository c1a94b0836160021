//! Topomap Core - Topology model, device classification, and rendering
//!
//! This crate provides the foundational types for topomap:
//! - Device and Link types for the discovered network graph
//! - Topology graph built up during a discovery crawl
//! - Device-type classifier driven by a TOML pattern table
//! - Text tree renderer for topology reports

pub mod classifier;
pub mod device;
pub mod render;
pub mod topology;

pub use classifier::{Classifier, ClassifierConfig, ClassifierError, CrawlFilters};
pub use device::{Device, Link, Protocol};
pub use render::render_tree;
pub use topology::Topology;
