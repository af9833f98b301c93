//! MeshCore CLI scraper: writes the command registry consumed by the console.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use meshcore_cli_registry::{DEFAULT_LOOKAHEAD, DEFAULT_STRUCT_NAME};
use meshcore_cli_scraper::{
    COMMONCLI_HEADER_URL, COMMONCLI_URL, DEFAULT_OUTPUT, HttpFetcher, ScrapeConfig, Source, run,
    utc_date_stamp,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "meshcore_cli_scraper=info,meshcore_cli_registry=info";

#[derive(Parser, Debug)]
#[command(
    name = "meshcore-cli-parse",
    version,
    about = "Parse MeshCore CommonCLI.cpp into a JSON command registry"
)]
struct Cli {
    /// Output JSON file path.
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also generate TypeScript definitions next to the JSON file.
    #[arg(long, short)]
    typescript: bool,

    /// URL of CommonCLI.cpp.
    #[arg(long, env = "MESHCORE_CPP_URL", default_value = COMMONCLI_URL)]
    cpp_url: String,

    /// URL of CommonCLI.h.
    #[arg(
        long,
        env = "MESHCORE_HEADER_URL",
        default_value = COMMONCLI_HEADER_URL
    )]
    header_url: String,

    /// Read CommonCLI.cpp from a local file instead of fetching it.
    #[arg(long)]
    cpp_file: Option<PathBuf>,

    /// Read CommonCLI.h from a local file instead of fetching it.
    #[arg(long)]
    header_file: Option<PathBuf>,

    /// Lines scanned after each command match for replies and arguments.
    #[arg(long, default_value_t = DEFAULT_LOOKAHEAD)]
    lookahead: usize,

    /// Struct in the header whose members are listed under `node_prefs`.
    #[arg(long, default_value = DEFAULT_STRUCT_NAME)]
    struct_name: String,
}

impl Cli {
    fn into_config(self) -> ScrapeConfig {
        let pick = |file: Option<PathBuf>, url: String| match file {
            Some(path) => Source::File(path),
            None => Source::Url(url),
        };
        ScrapeConfig {
            upstream_url: self.cpp_url.clone(),
            cpp: pick(self.cpp_file, self.cpp_url),
            header: pick(self.header_file, self.header_url),
            output: self.output,
            typescript: self.typescript,
            lookahead: self.lookahead,
            struct_name: self.struct_name,
            version: utc_date_stamp(),
        }
    }
}

fn main() -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_LOG_FILTER),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = Cli::parse().into_config();
    let outcome = run(&config, &HttpFetcher::new())?;

    println!("Command Summary:");
    for (category, count) in outcome.registry.category_counts() {
        println!("  {category}: {count} commands");
    }
    Ok(())
}
