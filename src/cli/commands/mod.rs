//! Subcommands of the smartcab CLI

pub mod compare;
pub mod run;
