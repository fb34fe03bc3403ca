//! CLI library components for the Barakatna form tool.

pub mod logging;
