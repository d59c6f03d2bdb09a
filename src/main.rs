use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};

use asset_labels::cli::{self, Args};
use asset_labels::{LabelError, PrintStatus};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_logger(args.verbose);

    let outcome = match cli::run(&args) {
        Ok(outcome) => outcome,
        Err(e @ (LabelError::Format { .. } | LabelError::InvertedRange { .. })) => {
            Args::command().error(ErrorKind::ValueValidation, e).exit();
        }
        Err(e @ (LabelError::Layout { .. } | LabelError::Font { .. })) => {
            Args::command().error(ErrorKind::InvalidValue, e).exit();
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", args.output.display()));
        }
    };

    println!("Successfully created {}", outcome.path.display());
    match outcome.print {
        PrintStatus::Skipped => {}
        PrintStatus::Printed => println!("Successfully printed {}", outcome.path.display()),
        PrintStatus::Failed(reason) => {
            eprintln!("Error printing {}: {reason}", outcome.path.display());
        }
    }

    Ok(())
}
