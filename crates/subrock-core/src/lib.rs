pub mod config;
pub mod logging;

pub mod client;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod persist;
pub mod probe;
pub mod render;
pub mod runner;
pub mod targets;
