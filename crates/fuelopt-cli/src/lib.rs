//! Fuel optimizer CLI library.
//!
//! Subcommand handlers live in [`commands`]; rendering of library results for
//! the terminal (text tables or JSON) lives in [`output`].

pub mod commands;
pub mod output;
