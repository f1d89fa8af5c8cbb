//! Display model implementations for table and JSON output
//!
//! Display models turn search types into rows with column names suited to
//! the terminal.

pub mod common;
mod result;

pub use result::{ResultDisplay, ResultRowDisplay, VerdictDisplay};
