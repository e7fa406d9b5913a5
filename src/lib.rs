pub mod advancement;
pub mod bracket;
pub mod config;
pub mod demo;
pub mod fixtures;
pub mod outcome;
pub mod slot;
pub mod snapshot;
pub mod standings;
