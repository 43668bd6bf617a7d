pub mod apply;
pub mod cli;
pub mod commands;
pub mod config;
pub mod daemon;
pub mod error;
pub mod monitors;
pub mod pool;
pub mod select;
pub mod state;
