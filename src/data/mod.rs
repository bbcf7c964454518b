//! Authored diagrams.

pub mod heart_failure;
