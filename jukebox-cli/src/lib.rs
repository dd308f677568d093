//! # Jukebox CLI
//!
//! The interpreter shell: a keyword-dispatched command registry over the
//! jukebox services, a line-oriented run loop, and the logging bootstrap.

pub mod app;
pub mod command;
pub mod handlers;
pub mod logging;

pub use app::App;
pub use command::{Command, CommandError, CommandRegistry};
