use clap::{Parser, Subcommand};

use crate::models::SchemaKind;

#[derive(Parser)]
#[command(
    name = "cvparse",
    version,
    about = "Extract education, experience, projects and skills from a LaTeX CV into portfolio JSON",
    after_help = "Settings are read from cvparse.toml in the current directory (see `cvparse init`). \
                  Logs go to stderr; set CVPARSE_LOG to change the filter."
)]
pub struct Cli {
    /// Log extraction progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse the CV and write the portfolio JSON.
    ///
    /// The output file is written once, atomically, after every section has
    /// been extracted. Malformed records are skipped and counted in the summary.
    Parse {
        /// LaTeX source (default: paths.input from config)
        #[arg(short, long)]
        input: Option<String>,
        /// JSON destination (default: paths.output from config)
        #[arg(short, long)]
        output: Option<String>,
        /// Skill grouping to apply
        #[arg(long, value_enum)]
        schema: Option<SchemaKind>,
        /// Drop grade-only education details ("Year 1: 2:1", "89%")
        #[arg(long)]
        filter_grades: bool,
        /// Print the JSON document to stdout instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the section delimiters found in the CV
    Sections {
        /// LaTeX source (default: paths.input from config)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Write a default cvparse.toml into the current directory
    Init,
}
