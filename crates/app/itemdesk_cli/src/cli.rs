use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "itemdesk", about = "Terminal client for the Itemdesk API", version)]
pub struct Cli {
    /// Base URL of the Itemdesk API.
    #[arg(
        long,
        global = true,
        env = "ITEMDESK_API_URL",
        default_value = "http://localhost:4000"
    )]
    pub api_url: String,

    /// Directory holding the persisted session. Defaults to the platform data dir.
    #[arg(long, global = true, env = "ITEMDESK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the client version.
    Version,

    /// Log in and persist the session.
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "ITEMDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the persisted session.
    Logout,

    /// Show who is logged in and until when.
    Status,

    /// Manage items.
    #[command(subcommand)]
    Items(ItemsCommand),
}

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// List all items.
    List,

    /// Create an item.
    Add {
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Rename an item, optionally replacing its description.
    Edit {
        id: i64,

        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an item.
    Rm { id: i64 },
}
