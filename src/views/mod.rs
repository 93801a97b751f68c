//! Output DTO types for the chronogram views.

pub mod chronogram;

pub use chronogram::*;
