mod cli;
mod convert;
mod currencies;
mod dates;
mod db;
mod error;
mod export;
mod guess;
mod header;
mod rates;
mod reader;
mod settings;
mod table;

use clap::Parser;

use cli::{Cli, Commands, RatesCommands};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Rates { command } => match command {
            RatesCommands::Load { file } => cli::rates::load(&file),
            RatesCommands::Status => cli::rates::status(),
        },
        Commands::Inspect { file } => cli::inspect::run(&file),
        Commands::Convert {
            file,
            target,
            date_col,
            amount_col,
            currency_col,
            combined,
            output,
            include_hidden,
        } => cli::convert::run(
            &file,
            target.as_deref(),
            date_col.as_deref(),
            amount_col.as_deref(),
            currency_col.as_deref(),
            combined,
            output.as_deref(),
            include_hidden,
        ),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
