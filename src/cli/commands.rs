//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lark open platform CLI
#[derive(Parser, Debug)]
#[command(name = "lark-cli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Domain override: feishu, lark, or a base URL
    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// Access token override
    #[arg(long, global = true, env = "LARK_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a GET request and print the response
    Get {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Send a POST request and print the response
    Post {
        #[command(flatten)]
        request: RequestArgs,

        /// Inline JSON body
        #[arg(long)]
        body: Option<String>,
    },

    /// Follow the cursor of a list endpoint, one page per line
    List {
        #[command(flatten)]
        request: RequestArgs,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Print the elements of this array field instead of whole pages
        #[arg(long)]
        items: Option<String>,
    },
}

/// Arguments shared by every request command
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Endpoint path template, e.g. /open-apis/im/v1/chats/:chat_id
    pub path: String,

    /// Query parameter (repeatable)
    #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub query: Vec<(String, String)>,

    /// Path template parameter (repeatable)
    #[arg(short, long = "path-param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub path_params: Vec<(String, String)>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse a `KEY=VALUE` argument
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
