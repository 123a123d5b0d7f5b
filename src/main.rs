/// clip_insight - classify clipboard text and report on it
///
/// The main entry point. It reads the text from standard input (or a file),
/// runs the requested engine over it and prints the result to standard output.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, LevelFilter};
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use std::process;

use clip_insight::app;
use clip_insight::config::load_settings;
use clip_insight::utils::input::read_input;
use clip_insight::utils::output_formatter::{self, OutputFormat};
use clip_insight::{FormatLabel, Tool, ToolOutput};

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "clip_insight",
    version,
    about = "Classify clipboard text and report transformations or statistics",
    long_about = "Reads text from standard input and either:
- detects its format (json, csv, numbers, urls, emails, text_list, plain_text)
  and analyzes or transforms it (process)
- computes readability, vocabulary and content statistics (analyze)
- runs a single-purpose text tool (tool)"
)]
struct Args {
    /// Defaults to `process analyze`
    #[command(subcommand)]
    command: Option<Command>,

    /// Read the text from this file instead of standard input
    #[arg(long = "input", global = true)]
    input: Option<PathBuf>,

    /// Path to a JSON settings file
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    /// Wrap output in a markdown code block
    #[arg(long = "md", global = true)]
    md: bool,

    /// Set logging level
    #[arg(long = "log-level", default_value = "warn", global = true)]
    log_level: LevelFilter,

    /// Write logs to this file instead of standard error
    #[arg(long = "log-file", global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the format of the text and run an operation on it
    Process {
        /// analyze, prettify, minify, to_json, sum, sort, ... (unknown names return the parsed data)
        #[arg(default_value = "analyze")]
        operation: String,

        /// Skip detection and treat the text as this format
        #[arg(long = "as", value_enum)]
        as_format: Option<FormatLabel>,
    },
    /// Compute readability, vocabulary and content statistics
    Analyze,
    /// Print only the detected format
    Classify,
    /// Run a quick text tool
    Tool {
        #[arg(value_enum)]
        tool: Tool,
    },
}

/// Main entry point function
fn main() {
    let args = Args::parse();

    let _ = setup_logging(&args);

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        println!("{}", json!({ "error": e.to_string() }));
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = load_settings(args.config.as_deref());
    let text = read_input(args.input.as_deref())?;

    let default_command = Command::Process {
        operation: "analyze".to_string(),
        as_format: None,
    };
    let value = match args.command.as_ref().unwrap_or(&default_command) {
        Command::Process {
            operation,
            as_format,
        } => app::process_input(&text, operation, *as_format, &settings)?,
        Command::Analyze => app::analyze_input(&text, &settings)?,
        Command::Classify => app::classify_input(&text, &settings),
        Command::Tool { tool } => match app::run_tool(*tool, &text)? {
            ToolOutput::Text(output) => {
                println!("{}", output_formatter::render_text(&output, args.md));
                return Ok(());
            }
            ToolOutput::Report(value) => value,
        },
    };

    println!("{}", output_formatter::render_value(&value, args.format, args.md)?);
    Ok(())
}

/// Set up logging to standard error or a file
fn setup_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(args.log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(log_file) = &args.log_file {
        let file = File::create(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;

    Ok(())
}
