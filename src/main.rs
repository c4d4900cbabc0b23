// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value
)]

use std::io::Read;
use std::path::Path;

use clap::Parser;

use careerfmt::cli::commands::{Cli, Command, FormatFlags};
use careerfmt::cli::output;
use careerfmt::config::Config;
use careerfmt::converter::{self, ConvertRequest};
use careerfmt::format::formatter_for;
use careerfmt::models::EntryKind;
use careerfmt::table::normalize_newlines;
use careerfmt::warning_log::{self, WarningLog};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries formatted text and JSON results.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> CmdResult {
    let config = get_config(cli.config.as_deref())?;
    match cli.command {
        Command::Convert {
            input,
            experience_column,
            education_column,
            delimiter,
            output: output_file,
            warnings_log,
            flags,
        } => {
            let input_settings = &config.settings.input;
            let request = ConvertRequest {
                input,
                output: output_file,
                delimiter: delimiter.unwrap_or(input_settings.delimiter),
                experience_column: experience_column
                    .or_else(|| input_settings.experience_column.clone()),
                education_column: education_column
                    .or_else(|| input_settings.education_column.clone()),
                options: output::resolve_options(&config.settings, &flags),
            };
            cmd_convert(&request, warnings_log.as_deref())
        }
        Command::Experience { text, flags } => {
            cmd_format(EntryKind::Experience, text, &flags, &config)
        }
        Command::Education { text, flags } => {
            cmd_format(EntryKind::Education, text, &flags, &config)
        }
        Command::Warnings {
            log,
            summary,
            clear,
        } => cmd_warnings(&log, summary, clear),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config(path: Option<&Path>) -> Result<Config, Box<dyn std::fmt::Display>> {
    match path {
        Some(p) => Config::from_file(p).map_err(map_err),
        None => Config::from_cwd().map_err(map_err),
    }
}

fn cmd_convert(request: &ConvertRequest, warnings_log: Option<&Path>) -> CmdResult {
    let result = converter::run_convert(request).map_err(map_err)?;

    if let Some(log_path) = warnings_log {
        let file = request.input.to_string_lossy();
        WarningLog::new(log_path)
            .append(&file, &result.warnings)
            .map_err(map_err)?;
    }

    #[derive(serde::Serialize)]
    struct ConvertOutput {
        output: String,
        rows: usize,
        columns: Vec<EntryKind>,
        warnings: usize,
    }
    println!(
        "{}",
        output::format_json(&ConvertOutput {
            output: result.output,
            rows: result.rows,
            columns: result.columns,
            warnings: result.warnings.len(),
        })
    );
    Ok(())
}

fn cmd_format(
    kind: EntryKind,
    text: Option<String>,
    flags: &FormatFlags,
    config: &Config,
) -> CmdResult {
    let raw = match text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(map_err)?;
            buf
        }
    };
    let raw = normalize_newlines(&raw);
    let raw = raw.strip_suffix('\n').unwrap_or(&raw);

    let formatter = formatter_for(kind, output::resolve_options(&config.settings, flags));
    let formatted = formatter.format_cell(raw);
    for w in &formatted.warnings {
        converter::log_warning(w);
    }
    println!("{}", formatted.text);
    Ok(())
}

fn cmd_warnings(log: &Path, summary: bool, clear: bool) -> CmdResult {
    if clear {
        WarningLog::new(log).clear().map_err(map_err)?;
        println!("{{\"ok\":true}}");
        return Ok(());
    }

    let entries = warning_log::read_warning_log(log).map_err(map_err)?;
    if summary {
        println!("{}", output::format_json(&warning_log::summarize_warnings(&entries)));
    } else {
        println!("{}", output::format_json(&entries));
    }
    Ok(())
}
