use clap::{Parser, Subcommand};

use singlish_cli::commands::table_ops;

#[derive(Parser)]
#[command(name = "tabletool", about = "Singlish mapping table and settings tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the embedded default mapping table TOML
    Export,
    /// Validate a mapping table (TOML or compiled)
    Validate {
        /// Table file
        file: String,
    },
    /// Compile a TOML mapping table into the binary format
    Compile {
        /// Input table (TOML or compiled)
        input_file: String,
        /// Output file
        output_file: String,
    },
    /// Show table statistics (format auto-detected by magic bytes)
    Inspect {
        /// Table file
        file: String,
    },
    /// Print the embedded default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Settings file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Export => table_ops::table_export(),
        Command::Validate { file } => table_ops::table_validate(&file),
        Command::Compile {
            input_file,
            output_file,
        } => table_ops::table_compile(&input_file, &output_file),
        Command::Inspect { file } => table_ops::table_inspect(&file),
        Command::SettingsExport => table_ops::settings_export(),
        Command::SettingsValidate { file } => table_ops::settings_validate(&file),
    }
}
