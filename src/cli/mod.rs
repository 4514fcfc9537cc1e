pub mod convert;
pub mod init;
pub mod inspect;
pub mod rates;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tabfx",
    about = "Convert transaction spreadsheets between currencies using historical daily rates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tabfx: choose a data directory and initialize the rate database.
    Init {
        /// Path for tabfx data (default: ~/Documents/tabfx)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage the exchange-rate store.
    Rates {
        #[command(subcommand)]
        command: RatesCommands,
    },
    /// Show the detected header row and column role suggestions for a file.
    Inspect {
        /// Path to a CSV/TSV/XLSX/TXT file
        file: String,
    },
    /// Convert a file's amounts to a target currency and export the result.
    Convert {
        /// Path to a CSV/TSV/XLSX/TXT file
        file: String,
        /// Target currency code (default: from settings)
        #[arg(long)]
        target: Option<String>,
        /// Column title holding dates (default: auto-detected)
        #[arg(long = "date-col")]
        date_col: Option<String>,
        /// Column title holding amounts (default: auto-detected)
        #[arg(long = "amount-col")]
        amount_col: Option<String>,
        /// Column title holding currency codes (default: auto-detected)
        #[arg(long = "currency-col")]
        currency_col: Option<String>,
        /// Amount cells carry their own currency code ("12.34 EUR")
        #[arg(long)]
        combined: bool,
        /// Output path (default: <input>-converted.csv)
        #[arg(long)]
        output: Option<String>,
        /// Export hidden columns too
        #[arg(long = "include-hidden")]
        include_hidden: bool,
    },
    /// Show current settings and rate-store statistics.
    Status,
}

#[derive(Subcommand)]
pub enum RatesCommands {
    /// Load a rate archive CSV into the local store.
    Load {
        /// Path to the archive CSV (Currency-labeled date column, one column per code)
        file: String,
    },
    /// Show rate-store statistics.
    Status,
}
