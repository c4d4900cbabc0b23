// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - module_name_repetitions: Formatter types are clearer with their module's name
// - needless_pass_by_value: Sometimes clearer semantically
// - match_same_arms: Combined arms can reduce readability
// - single_match_else: match is clearer than if-let for pattern matching
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::match_same_arms,
    clippy::single_match_else
)]

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod models;
pub mod table;
pub mod warning_log;
