//! Formkit - command-line shell around `formkit-core`
//!
//! Lists the component palette, replays scripted builder sessions and checks
//! preview submissions against the resulting form.

pub mod cli;
pub mod commands;
