//! CLI command definitions, routing, and tracing setup.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use gqldoc_core::{format_graphql, format_markdown, parse_files};
use gqldoc_shared::{AppConfig, GqlDocError, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// gqldoc: render GraphQL schemas as Markdown reference documentation.
#[derive(Parser)]
#[command(
    name = "gqldoc",
    version,
    about = "Render GraphQL schema files as navigable Markdown documentation.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.gqldoc/gqldoc.toml.
    #[arg(long, global = true, env = "GQLDOC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for `render`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// The merged schema, reformatted as GraphQL SDL.
    Graphql,
    /// GitHub-flavoured Markdown documentation.
    Gfm,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render one or more schema files.
    Render {
        /// Output format.
        #[arg(short, long, value_enum)]
        format: OutputFormat,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Document title (overrides the config file).
        #[arg(long)]
        title: Option<String>,

        /// Omit the table of contents.
        #[arg(long)]
        no_toc: bool,

        /// Keep HTML tables indented.
        #[arg(long)]
        no_minify: bool,

        /// Schema files (.graphql or .gql).
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so that
/// rendered output on stdout stays clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "gqldoc=info",
        1 => "gqldoc=debug",
        _ => "gqldoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Render {
            format,
            out,
            title,
            no_toc,
            no_minify,
            files,
        } => {
            let mut config = resolve_config(config_path)?;
            if let Some(title) = title {
                config.render.title = title;
            }
            if no_toc {
                config.render.table_of_contents = false;
            }
            if no_minify {
                config.render.minify = false;
            }
            config.render.validate()?;
            cmd_render(format, out.as_deref(), &files, &config)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config named on the command line, or the default one.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_render(
    format: OutputFormat,
    out: Option<&Path>,
    files: &[PathBuf],
    config: &AppConfig,
) -> Result<()> {
    let parsed = parse_files(files)?;
    info!(
        files = files.len(),
        types = parsed.schema.types.len(),
        "schema loaded"
    );

    let mut sink: Box<dyn Write> = match out {
        Some(path) => {
            let file = File::create(path).map_err(|e| GqlDocError::io(path, e))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Graphql => format_graphql(sink.as_mut(), &parsed)?,
        OutputFormat::Gfm => format_markdown(sink.as_mut(), &parsed.schema, &config.render)?,
    }

    if let Some(path) = out {
        info!(path = %path.display(), "output written");
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
