//! CLI-specific utilities for butterfly-nav
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod output;

pub use output::{render_info, render_random, render_route};
