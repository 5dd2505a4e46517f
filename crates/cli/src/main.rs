mod echo;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use schemalens_core::{Document, FetchConfig, InspectConfig, Inspector, fetch_file, fetch_stdin, fetch_url, record_to_json};
use tracing_subscriber::EnvFilter;
use url::Url;

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inspect schema.org structured data (JSON-LD, microdata, RDFa) in web pages
#[derive(Parser, Debug)]
#[command(name = "schemalens")]
#[command(author = "SchemaLens Contributors")]
#[command(version)]
#[command(about = "Inspect schema.org structured data in web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print compact JSON instead of pretty JSON
    #[arg(long)]
    compact: bool,

    /// Only keep these types (repeatable)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Skip JSON-LD script blocks
    #[arg(long)]
    no_json_ld: bool,

    /// Skip microdata attributes
    #[arg(long)]
    no_microdata: bool,

    /// Skip RDFa attributes
    #[arg(long)]
    no_rdfa: bool,

    /// Do not report nested items as types of their own
    #[arg(long)]
    top_level_only: bool,

    /// Base URL for resolving relative links (defaults to INPUT when it is a URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<Url>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn is_remote(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }

    fn inspect_config(&self) -> InspectConfig {
        let mut builder = InspectConfig::builder()
            .linked_data(!self.no_json_ld)
            .microdata(!self.no_microdata)
            .rdfa(!self.no_rdfa)
            .nested_items(!self.top_level_only);
        if !self.types.is_empty() {
            builder = builder.types(self.types.clone());
        }
        builder.build()
    }

    fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig { timeout: self.timeout, ..Default::default() };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

async fn read_input(args: &Args) -> anyhow::Result<String> {
    if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 4, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")
    } else if args.is_remote() {
        if args.verbose {
            echo::print_step(1, 4, &format!("Fetching from {}", args.input.bright_white().underline()));
        }
        fetch_url(&args.input, &args.fetch_config())
            .await
            .with_context(|| format!("Failed to fetch URL: {}", args.input))
    } else {
        if args.verbose {
            echo::print_step(1, 4, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let started = Instant::now();
    let html = read_input(&args).await?;

    if args.verbose {
        echo::print_detail("Size", &echo::format_size(html.len()));
        eprintln!();
    }

    let base_url = match &args.base_url {
        Some(url) => Some(url.clone()),
        None if args.is_remote() => Some(Url::parse(&args.input).context("Invalid input URL")?),
        None => None,
    };

    if args.verbose {
        echo::print_step(2, 4, "Parsing HTML document");
    }

    let doc = Document::from_html(&html, base_url);

    if args.verbose {
        if let Some(title) = doc.title() {
            echo::print_detail("Title", title.trim());
        }
        if let Some(base) = doc.base_url() {
            echo::print_detail("Base URL", base.as_str());
        }
        eprintln!();
        echo::print_step(3, 4, "Inspecting structured data");
    }

    let record = Inspector::with_config(args.inspect_config()).inspect(&doc);

    if args.verbose {
        echo::print_record_summary(&record);
        if record.is_empty() {
            echo::print_warning("No structured data found");
        }
        echo::print_step(4, 4, "Writing output");
        echo::print_timing("Total", started.elapsed());
        eprintln!();
    }

    let json = record_to_json(&record, !args.compact).context("Failed to serialize record")?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", json),
    }

    Ok(())
}
