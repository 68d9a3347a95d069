// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are limited to constant regex construction
// - too_many_lines: Extraction loops read better in one piece
// - similar_names: Variable naming is contextually clear
// - option_if_let_else: if-let is often clearer
// - fn_params_excessive_bools: CLI flags are naturally boolean
// - module_name_repetitions: Parser types are named after their section
// - manual_let_else: if-let with early return is often clearer in context
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::similar_names,
    clippy::option_if_let_else,
    clippy::fn_params_excessive_bools,
    clippy::module_name_repetitions,
    clippy::manual_let_else
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod operations;
pub mod writer;
