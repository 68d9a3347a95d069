// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::fn_params_excessive_bools,
    clippy::needless_pass_by_value
)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cvparse::cli::commands::{Cli, Command};
use cvparse::cli::output;
use cvparse::config::Config;
use cvparse::error::CvError;
use cvparse::extractor;
use cvparse::models::SchemaKind;
use cvparse::operations::{self, ExtractOutput};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries JSON.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cvparse=debug")
    } else {
        EnvFilter::try_from_env("CVPARSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> CmdResult {
    match cli.command {
        Command::Parse {
            input,
            output: output_path,
            schema,
            filter_grades,
            dry_run,
        } => cmd_parse(input, output_path, schema, filter_grades, dry_run),
        Command::Sections { input } => cmd_sections(input),
        Command::Init => cmd_init(),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config() -> Result<Config, Box<dyn std::fmt::Display>> {
    Config::from_cwd().map_err(map_err)
}

fn cmd_parse(
    input: Option<String>,
    output_path: Option<String>,
    schema: Option<SchemaKind>,
    filter_grades: bool,
    dry_run: bool,
) -> CmdResult {
    let mut config = get_config()?;
    if let Some(input) = input {
        config.settings.paths.input = input;
    }
    if let Some(path) = output_path {
        config.settings.paths.output = path;
    }
    if let Some(schema) = schema {
        config.settings.skills.schema = schema;
    }
    if filter_grades {
        config.settings.education.filter_grades = true;
    }

    let result = extractor::run_extract(&config, dry_run).map_err(map_err)?;
    if dry_run {
        print!("{}", result.json);
    } else {
        println!("{}", output::format_json(&ExtractOutput::from(&result)));
    }
    Ok(())
}

fn cmd_sections(input: Option<String>) -> CmdResult {
    let mut config = get_config()?;
    if let Some(input) = input {
        config.settings.paths.input = input;
    }

    let path = config.input_path();
    if !path.is_file() {
        return Err(map_err(CvError::InputNotFound {
            path: path.to_string_lossy().into_owned(),
        }));
    }
    let source = std::fs::read_to_string(&path).map_err(map_err)?;
    let result = operations::list_sections(&source, &config.settings.sections);
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_init() -> CmdResult {
    let config = get_config()?;
    config.save_settings().map_err(map_err)?;
    println!(
        "{}",
        output::format_json(&serde_json::json!({
            "created": config.config_path.to_string_lossy(),
        }))
    );
    Ok(())
}
