//! Match Analytics - Recommendation Effectiveness and Business Impact Engine
//!
//! This crate scores a match recommender twice: by how good its
//! recommendation lists are (precision, ranking, diversity, coverage,
//! novelty) and by what it does for the platform (engagement, retention,
//! revenue, conversion, satisfaction, network effects). Snapshots are kept
//! per engine, compared against benchmark targets and turned into reports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
