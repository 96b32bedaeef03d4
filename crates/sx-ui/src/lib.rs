//! Terminal UI helpers for sx.
//!
//! This crate provides consistent output formatting, spinners, progress bars,
//! and error display for the sx CLI.

pub mod output;
pub mod printer;
pub mod spinner;
pub mod style;

pub use output::{Output, Verbosity};
pub use printer::Printer;
pub use spinner::{Progress, Spinner};
pub use style::{Style, colors_enabled};
