//! CLI module
//!
//! Command-line access to the open platform API.
//!
//! # Commands
//!
//! - `get` - Send a GET request and print the response
//! - `post` - Send a POST request with a JSON body
//! - `list` - Follow the cursor of a list endpoint, printing each page

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, RequestArgs};
pub use runner::Runner;
