//! constellation CLI - Constellation to composition mapper
//!
//! Thin wrapper over the library: resolve-and-map, search, list, or run as
//! an MCP server over stdio.
//!
//! Diagnostics go to stderr through `env_logger` (set `RUST_LOG=debug` to see
//! rule resolution); stdout only ever carries the rendered result.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use constellation_composer::core::{Config, ResponseFormat, SearchQuery};
use constellation_composer::server::McpServer;
use constellation_composer::{ComposeRequest, ConstellationService, SearchRequest};
use std::path::PathBuf;

/// Map constellations to deterministic image-composition parameters.
#[derive(Parser, Debug)]
#[command(name = "constellation")]
#[command(version = constellation_composer::VERSION)]
#[command(about = "Map constellations to deterministic image-composition parameters")]
#[command(after_help = "EXAMPLES:
  # Composition for Orion as JSON
  constellation orion

  # Markdown guidance for a 1920x1080 canvas, without mythology
  constellation UMa --width 1920 --height 1080 --no-mythology --format markdown

  # Find constellations by text, shape or brightness
  constellation --search hunter
  constellation --search --shape dipper --format json

  # Everything in the catalog
  constellation --list

  # Serve MCP over stdio
  constellation --server
")]
struct Cli {
    // ═══════════════════════════════════════════════════════════════════════════
    // COMPOSITION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Constellation name or abbreviation (case-insensitive)
    #[arg(value_name = "NAME", help_heading = "COMPOSITION")]
    name: Option<String>,

    /// Canvas width in pixels (default from config, normally 1024)
    #[arg(long = "width", value_name = "PX", help_heading = "COMPOSITION")]
    width: Option<u32>,

    /// Canvas height in pixels (default from config, normally 1024)
    #[arg(long = "height", value_name = "PX", help_heading = "COMPOSITION")]
    height: Option<u32>,

    /// Leave out mythology themes
    #[arg(long = "no-mythology", help_heading = "COMPOSITION")]
    no_mythology: bool,

    /// Fetch supplementary line geometry (never changes the result)
    #[arg(long = "fetch-geometry", help_heading = "COMPOSITION")]
    fetch_geometry: bool,

    // ═══════════════════════════════════════════════════════════════════════════
    // CATALOG
    // ═══════════════════════════════════════════════════════════════════════════

    /// Search the catalog; QUERY matches name, story, theme and visual character
    #[arg(long = "search", value_name = "QUERY", num_args = 0..=1, help_heading = "CATALOG")]
    search: Option<Option<String>>,

    /// Search filter on the shape tag (e.g. dipper, compact, cross)
    #[arg(long = "shape", value_name = "SHAPE", requires = "search", help_heading = "CATALOG")]
    shape: Option<String>,

    /// Search filter on the brightness tag (e.g. bright, extremely_bright)
    #[arg(long = "brightness", value_name = "LEVEL", requires = "search", help_heading = "CATALOG")]
    brightness: Option<String>,

    /// List every constellation, sorted by name
    #[arg(long = "list", conflicts_with = "search", help_heading = "CATALOG")]
    list: bool,

    // ═══════════════════════════════════════════════════════════════════════════
    // OUTPUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Output format (compositions default to json, search and list to markdown)
    #[arg(long = "format", value_enum, help_heading = "OUTPUT")]
    format: Option<FormatArg>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE", help_heading = "OUTPUT")]
    output: Option<PathBuf>,

    /// Config file path
    #[arg(short = 'c', long = "config", value_name = "FILE", help_heading = "OUTPUT")]
    config: Option<PathBuf>,

    // ═══════════════════════════════════════════════════════════════════════════
    // SPECIAL MODES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run as MCP server (JSON-RPC 2.0 over stdio)
    #[arg(long = "server", help_heading = "SPECIAL MODES")]
    server: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    #[value(alias = "md")]
    Markdown,
}

impl From<FormatArg> for ResponseFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ResponseFormat::Json,
            FormatArg::Markdown => ResponseFormat::Markdown,
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::discover(cli.config.as_deref())?;
    if cli.fetch_geometry {
        config.enrichment.enabled = true;
    }
    Ok(config)
}

fn format_or(cli: &Cli, default: ResponseFormat) -> ResponseFormat {
    cli.format.map(ResponseFormat::from).unwrap_or(default)
}

fn render(cli: &Cli, service: &ConstellationService) -> anyhow::Result<String> {
    if cli.list {
        return Ok(service.list(format_or(cli, ResponseFormat::Markdown))?);
    }

    if let Some(text) = &cli.search {
        let query = SearchQuery {
            text: text.clone(),
            shape: cli.shape.clone(),
            brightness: cli.brightness.clone(),
        };
        let request = SearchRequest::new(query).format(format_or(cli, ResponseFormat::Markdown));
        return Ok(service.search(&request)?);
    }

    let name = cli
        .name
        .as_deref()
        .context("no constellation given (try --list to see the catalog)")?;
    let request = ComposeRequest {
        name: name.to_string(),
        canvas_width: cli.width,
        canvas_height: cli.height,
        include_mythology: !cli.no_mythology,
        format: format_or(cli, ResponseFormat::Json),
    };
    Ok(service.compose(&request)?)
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let service = ConstellationService::with_config(load_config(cli)?);
    let mut output = render(cli, &service)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &cli.output {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", output),
    }
    Ok(())
}

/// Main entry point for the constellation CLI.
pub fn run() {
    // Reset SIGPIPE to default behavior (terminate quietly when piped to head)
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    init_logging();
    let cli = Cli::parse();

    if cli.server {
        // No startup output on stdout - MCP clients expect clean stdio
        let config = match load_config(&cli) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        };
        let mut server = McpServer::new(ConstellationService::with_config(config));
        if let Err(e) = server.run() {
            eprintln!("MCP server error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn main() {
    run();
}
