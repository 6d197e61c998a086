//! Command-line interface for indentree
//! Builds a tree from an indentation-structured file and prints it in one of the registered formats.
//!
//! Usage:
//!   indentree `<path>` [--format `<format>`] [--config `<file>`] [--strict]   - Build and print a tree
//!   indentree - ...                                                         - Read the source from stdin
//!   indentree --list-formats                                                - List output formats
//!
//! Settings come from the built-in defaults, then `indentree.toml` in the working directory, then
//! `--config`, then flags.
//!
//! Exit codes: 0 on success, 1 when the input, configuration or format can't be used, 2 when
//! `--strict` is given and the document is malformed.

use clap::{Arg, ArgAction, ArgMatches, Command};
use indentree_config::{IndentreeConfig, Loader};
use indentree_parser::indentree::formats::FormatRegistry;
use indentree_parser::indentree::loader::{format_source_context, DocumentLoader};
use indentree_parser::indentree::IndentTreeBuilder;
use std::env;
use std::io::{self, Read};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: u8 = 1;
const EXIT_MALFORMED: u8 = 2;

fn cli() -> Command {
    Command::new("indentree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a node tree from indentation-structured text")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the source file, or '-' for stdin")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from config: tag)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the defaults and ./indentree.toml"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail with exit code 2 instead of printing a partial tree")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("line-numbers")
                .long("line-numbers")
                .help("Show source line numbers (treeviz)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log builder decisions to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let registry = FormatRegistry::with_defaults();
    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return ExitCode::SUCCESS;
    }

    match handle_build_command(&matches, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<IndentreeConfig, String> {
    let mut loader = Loader::new();
    if let Ok(dir) = env::current_dir() {
        loader = loader.with_project_file(dir);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("line-numbers") {
        loader = loader
            .set_override("output.show_line_numbers", true)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

fn read_source(path: &str) -> Result<DocumentLoader, String> {
    if path == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("cannot read stdin: {}", e))?;
        return Ok(DocumentLoader::from_string(source));
    }
    DocumentLoader::from_path(path).map_err(|e| e.to_string())
}

/// Build the document at `path` and print it. Errors are reported here; the caller only gets
/// the exit code.
fn handle_build_command(matches: &ArgMatches, registry: &FormatRegistry) -> Result<(), u8> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");

    let config = load_config(matches).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        EXIT_FAILURE
    })?;
    if !registry.has(&config.output.format) {
        eprintln!("Format '{}' not found", config.output.format);
        eprintln!("Available formats: {}", registry.list_formats().join(", "));
        return Err(EXIT_FAILURE);
    }
    let parser = config.elements.line_parser().map_err(|e| {
        eprintln!("Configuration error: invalid elements.raw_tags: {}", e);
        EXIT_FAILURE
    })?;

    let loader = read_source(path).map_err(|e| {
        eprintln!("Error: {}", e);
        EXIT_FAILURE
    })?;
    let builder = IndentTreeBuilder::new(config.building.clone());
    let output = loader.build(&builder, &parser);
    debug!(
        lines = output.report.lines_processed,
        nodes = output.tree.len(),
        "built {}",
        path
    );

    let strict = matches.get_flag("strict");
    if let Some(err) = output.report.error() {
        let label = if strict { "error" } else { "warning" };
        eprintln!("{}: {}: {}", label, path, err);
        eprint!("{}", format_source_context(loader.source(), err.line()));
    }
    if strict {
        if let Some(err) = output.report.strict_error() {
            if output.report.is_complete() {
                eprintln!("error: {}: {}", path, err);
            }
            return Err(EXIT_MALFORMED);
        }
    }

    let formatted = registry
        .serialize(
            &output.tree,
            output.report.root,
            &config.output.format,
            &config.output.format_options(),
        )
        .map_err(|e| {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        })?;
    print!("{}", formatted);
    Ok(())
}

fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available output formats:\n");
    for (name, description) in registry.describe() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
