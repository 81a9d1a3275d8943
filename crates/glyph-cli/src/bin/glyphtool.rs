use clap::{Parser, Subcommand};

use glyph_cli::commands::{catalog_ops, config_ops, dict_ops};
use glyph_cli::trace_init;

#[derive(Parser)]
#[command(name = "glyphtool", about = "Hieroglyph dictionary build tool")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a dictionary trie from transcription tables
    Build {
        /// Sign catalog (JSON)
        #[arg(long)]
        catalog: String,
        /// Settings TOML (defaults are embedded)
        #[arg(long)]
        config: Option<String>,
        /// Record source format
        #[arg(long, default_value = "csv")]
        source: String,
        /// Write skipped-record diagnostics to this JSON file
        #[arg(long)]
        diagnostics: Option<String>,
        /// Output file (.json for the JSON tree, otherwise binary)
        output_file: String,
        /// Input tables, read in the given order
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Show dictionary info (format auto-detected)
    Info {
        /// Dictionary file
        file: String,
    },
    /// Prefix lookup: entries for every prefix of the glyph text
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Glyph text, e.g. 𓀀𓁐
        text: String,
        /// Longest match first
        #[arg(long)]
        longest_first: bool,
    },
    /// Show how sign codes resolve to glyphs
    Resolve {
        /// Sign catalog (JSON)
        #[arg(long)]
        catalog: String,
        /// Settings TOML (defaults are embedded)
        #[arg(long)]
        config: Option<String>,
        /// Sign codes, e.g. G17 or "O90A-A1B"
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Search the catalog by description, transliteration or notes
    Search {
        /// Sign catalog (JSON)
        #[arg(long)]
        catalog: String,
        /// Search text (at least 2 characters)
        text: String,
    },
    /// Convert between the JSON and binary dictionary formats
    Convert {
        /// Input dictionary
        input_file: String,
        /// Output file (.json for the JSON tree, otherwise binary)
        output_file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    trace_init::init_tracing(cli.log_json);

    match cli.command {
        Command::Build {
            catalog,
            config,
            source,
            diagnostics,
            output_file,
            inputs,
        } => {
            let opts = dict_ops::BuildOptions {
                catalog_file: &catalog,
                config: config.as_deref(),
                source: &source,
                diagnostics_file: diagnostics.as_deref(),
            };
            dict_ops::build(&opts, &output_file, &inputs);
        }
        Command::Info { file } => dict_ops::info(&file),
        Command::Lookup {
            dict_file,
            text,
            longest_first,
        } => dict_ops::lookup(&dict_file, &text, longest_first),
        Command::Resolve {
            catalog,
            config,
            codes,
        } => catalog_ops::resolve(&catalog, config.as_deref(), &codes),
        Command::Search { catalog, text } => catalog_ops::search(&catalog, &text),
        Command::Convert {
            input_file,
            output_file,
        } => dict_ops::convert(&input_file, &output_file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
