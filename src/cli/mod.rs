//! CLI infrastructure for the smartcab toolkit
//!
//! This module provides the command-line interface for driving trips with a
//! chosen policy and comparing policies on the reference grid.

pub mod commands;
pub mod output;
