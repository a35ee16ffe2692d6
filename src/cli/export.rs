//! Export CLI commands

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{PayplanError, PayplanResult};
use crate::export::{
    export_debts_csv, export_envelopes_csv, export_full_json, export_full_yaml,
    export_transfers_csv,
};
use crate::storage::Storage;

/// What to export as CSV
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum CsvTarget {
    Envelopes,
    Debts,
    Transfers,
}

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export one entity table as CSV
    Csv {
        /// Which table to export
        #[arg(value_enum)]
        target: CsvTarget,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the full budget as JSON
    Json {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the full budget as YAML
    Yaml {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> PayplanResult<()> {
    match cmd {
        ExportCommands::Csv { target, output } => {
            let mut writer = open_output(&output)?;
            match target {
                CsvTarget::Envelopes => export_envelopes_csv(storage, &mut writer)?,
                CsvTarget::Debts => export_debts_csv(storage, &mut writer)?,
                CsvTarget::Transfers => export_transfers_csv(storage, &mut writer)?,
            }
            report_done(&output);
        }

        ExportCommands::Json { output } => {
            let mut writer = open_output(&output)?;
            export_full_json(storage, &mut writer)?;
            report_done(&output);
        }

        ExportCommands::Yaml { output } => {
            let mut writer = open_output(&output)?;
            export_full_yaml(storage, &mut writer)?;
            report_done(&output);
        }
    }

    Ok(())
}

fn open_output(output: &Option<PathBuf>) -> PayplanResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| PayplanError::Export(format!("Cannot create {}: {}", path.display(), e)))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

fn report_done(output: &Option<PathBuf>) {
    if let Some(path) = output {
        println!("Exported to {}", path.display());
    }
}
