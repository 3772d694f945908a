//! # Petri
//!
//! Command-line front end for the concurrent Game of Life engine in
//! `petri_core`: loads a board file, runs it on a fixed worker pool and
//! reports the result.

pub mod app;
pub mod report;

pub use app::{run, run_with, Output};
pub use report::RunReport;
