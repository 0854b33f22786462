//! Replaying adapters that replay recorded interactions.

pub mod runner;

pub use runner::ReplayingCommandRunner;
