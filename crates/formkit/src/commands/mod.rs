//! Commands module for the formkit CLI
//!
//! `script` parses and applies builder sessions; the remaining modules
//! implement one subcommand each.

pub mod palette;
pub mod replay;
pub mod script;
pub mod submit;
