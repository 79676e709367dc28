// ABOUTME: tox integration front-end: commands, configuration, watcher, host adapters
// ABOUTME: Library surface consumed by the toxide binary and its tests

pub mod cli;
pub mod commands;
pub mod config;
pub mod host;
pub mod test_tree;
pub mod watcher;

pub use commands::Commands;
pub use config::Config;
