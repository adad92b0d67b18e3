use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Trailing-year price dashboard")]
pub struct Cli {
    /// Path to the config file (dashboard.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root URL of the price service; wins over the config file and PRICE_DASHBOARD_URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the selectable assets
    Assets,

    /// Fetch the trailing window for one asset and print its summary
    Show {
        /// Symbol to show (defaults to the first configured asset)
        #[arg(long)]
        symbol: Option<String>,

        /// Report the change between two point indices, as a chart brush would
        #[arg(long, num_args = 2, value_names = ["START", "END"])]
        brush: Option<Vec<usize>>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read commands (select, brush, refresh, assets, status, quit) from stdin
    Interactive,
}
