//! CLI module - Command definitions and handlers

use clap::{Args, Parser, Subcommand};

pub mod attrs;
pub mod info;
pub mod label;
pub mod search;
pub mod show;
pub mod sql;
pub mod tree;
pub mod utils;

/// trl - inspect a Trilium server through its scripting endpoint
#[derive(Parser, Debug)]
#[command(name = "trl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect; flags and env vars override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Config file path
    #[arg(short, long, global = true, env = "TRILIUM_CONFIG")]
    pub config: Option<String>,

    /// Endpoint URL
    #[arg(long, global = true, env = "TRILIUM_URL")]
    pub url: Option<String>,

    /// Endpoint token
    #[arg(long, global = true, env = "TRILIUM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show server version info
    Info,

    /// Show a note by id
    Show(show::ShowArgs),

    /// Search notes
    Search(search::SearchArgs),

    /// List a note's attributes
    Attrs(attrs::AttrsArgs),

    /// Set, toggle or remove a label
    Label(label::LabelArgs),

    /// List every path from root to a note
    Paths(tree::PathsArgs),

    /// List a note and all its descendants
    Tree(tree::TreeArgs),

    /// Run a read query against the server database
    Sql(sql::SqlArgs),
}
