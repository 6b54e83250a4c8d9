pub mod config;
pub mod domain;
pub mod driver;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod hydraulics;
pub mod report;
pub mod setup;
pub mod solver;
pub mod utils;
