use clap::{ArgAction, Parser};
use ifacemock_extract::{ContractDescription, Extractor};
use ifacemock_typechecker::LoaderConfig;
use miette::{MietteHandlerOpts, Result};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod error;
mod template;

use error::CliError;

#[derive(Parser, Debug)]
#[command(
    name = "ifacemock",
    version,
    about = "Generate a mock implementation of a Go interface",
    long_about = "Finds INTERFACE among the packages declared in DIR, flattens the interfaces it \
                  embeds and writes a mock with a stub function and a call counter per method."
)]
struct Cli {
    /// Directory to search for the interface in
    #[arg(short, long, env = "IFACEMOCK_DIR", default_value = ".", value_name = "DIR")]
    dir: PathBuf,

    /// Output file (default stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the extracted interface description as JSON instead of a mock
    #[arg(long)]
    json: bool,

    /// Directory containing go.mod, when it is not an ancestor of DIR
    #[arg(long, env = "IFACEMOCK_MODULE_ROOT", value_name = "DIR")]
    module_root: Option<PathBuf>,

    /// Treat fmt, io, context, sort and encoding as packages without source
    #[arg(long)]
    no_stdlib_stubs: bool,

    /// More log output (-v info, -vv debug, -vvv trace); IFACEMOCK_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Name of the interface to mock
    #[arg(value_name = "INTERFACE")]
    interface: String,
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(report) = run(&cli) {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

/// Configure miette with Go syntax highlighting for source snippets
fn setup_miette_handler() {
    use miette::highlighters::SyntectHighlighter;
    use syntect::highlighting::ThemeSet;
    use syntect::parsing::SyntaxSet;

    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let Some(theme) = theme_set.themes.get("base16-ocean.dark") else {
        return;
    };
    let highlighter = SyntectHighlighter::new(syntax_set, theme.clone(), true);
    let color = io::stderr().is_terminal();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(color)
                .unicode(color)
                .color(color)
                .tab_width(4)
                .with_cause_chain()
                .with_syntax_highlighting(highlighter.clone())
                .build(),
        )
    }))
    .ok();
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("IFACEMOCK_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let extractor = Extractor::new(LoaderConfig {
        module_root: cli.module_root.clone(),
        stdlib_stubs: !cli.no_stdlib_stubs,
    });
    let contract = extractor.extract(&cli.dir, &cli.interface)?;

    let output = if cli.json {
        let mut json = serde_json::to_string_pretty(&contract).map_err(|source| CliError::Json {
            interface: cli.interface.clone(),
            source,
        })?;
        json.push('\n');
        json
    } else {
        check_synthesized_imports(&contract)?;
        template::render_mock(&contract).map_err(|source| CliError::Render {
            interface: cli.interface.clone(),
            source,
        })?
    };

    write_output(cli.output.as_ref(), &output)?;
    Ok(())
}

/// Warn about every import the mock adds; a name clash makes the output uncompilable
fn check_synthesized_imports(contract: &ContractDescription) -> Result<(), CliError> {
    for synthesized in &contract.synthesized_imports {
        tracing::warn!("{synthesized}");
    }
    if !contract.has_import_collision() {
        return Ok(());
    }

    let details = contract
        .synthesized_imports
        .iter()
        .filter(|s| s.collision.is_some())
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    Err(CliError::ImportCollision {
        interface: contract.name.clone(),
        details,
    })
}

fn write_output(path: Option<&PathBuf>, contents: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "writing mock");
            fs::write(path, contents).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })
        }
        None => io::stdout()
            .lock()
            .write_all(contents.as_bytes())
            .map_err(|source| CliError::Write {
                path: "<stdout>".to_string(),
                source,
            }),
    }
}

#[cfg(test)]
mod tests;
