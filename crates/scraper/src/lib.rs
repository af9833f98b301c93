//! MeshCore CLI scraper. Fetches `CommonCLI.cpp` and `CommonCLI.h`, runs the
//! registry extractor over them, and writes the JSON (and optionally
//! TypeScript) command registry. This is a developer tool, run by hand when
//! MeshCore upstream changes.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use meshcore_cli_registry::{
    DEFAULT_LOOKAHEAD, DEFAULT_STRUCT_NAME, ExtractConfig, Extractor, Registry, RegistryInfo,
    parse_struct_fields, render_typescript,
};

/// Upstream command dispatcher.
pub const COMMONCLI_URL: &str =
    "https://raw.githubusercontent.com/meshcore-dev/MeshCore/main/src/helpers/CommonCLI.cpp";

/// Upstream header declaring `NodePrefs`.
pub const COMMONCLI_HEADER_URL: &str =
    "https://raw.githubusercontent.com/meshcore-dev/MeshCore/main/src/helpers/CommonCLI.h";

/// Default JSON output path.
pub const DEFAULT_OUTPUT: &str = "meshcore-commands.json";

/// Value of the registry's `generated_by` field.
pub const GENERATED_BY: &str = "meshcore-cli-parse";

/// Where a source file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fetched with an HTTP GET.
    Url(String),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Retrieves remote source text.
pub trait SourceFetcher {
    /// GET `url` and return the body as text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain blocking HTTP GET: no retries, no authentication.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// A fetcher with the default client settings.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SourceFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("failed to fetch {url}"))?
            .error_for_status()
            .with_context(|| format!("bad response from {url}"))?;
        response
            .text()
            .with_context(|| format!("failed to decode body of {url}"))
    }
}

/// Settings for one scraper run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// The command dispatcher source.
    pub cpp: Source,
    /// The header holding the preferences struct.
    pub header: Source,
    /// JSON output path.
    pub output: PathBuf,
    /// Also write `<output>.ts`.
    pub typescript: bool,
    /// Extractor lookahead window.
    pub lookahead: usize,
    /// Struct whose members become `node_prefs`.
    pub struct_name: String,
    /// Registry `version` stamp.
    pub version: String,
    /// Stamped as `source_url` when `cpp` is a local file.
    pub upstream_url: String,
}

impl ScrapeConfig {
    /// The registry's `source_url`: the fetched URL, or [`Self::upstream_url`]
    /// for a local copy.
    pub fn source_url(&self) -> &str {
        match &self.cpp {
            Source::Url(url) => url,
            Source::File(_) => &self.upstream_url,
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            cpp: Source::Url(COMMONCLI_URL.to_string()),
            header: Source::Url(COMMONCLI_HEADER_URL.to_string()),
            output: PathBuf::from(DEFAULT_OUTPUT),
            typescript: false,
            lookahead: DEFAULT_LOOKAHEAD,
            struct_name: DEFAULT_STRUCT_NAME.to_string(),
            version: utc_date_stamp(),
            upstream_url: COMMONCLI_URL.to_string(),
        }
    }
}

/// Today's date in UTC as `YYYY-MM-DD`.
pub fn utc_date_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Result of a completed run.
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// The registry that was written.
    pub registry: Registry,
    /// Where the JSON was written.
    pub json_path: PathBuf,
    /// Where the TypeScript was written, if requested.
    pub typescript_path: Option<PathBuf>,
}

/// Load the text of `source`.
pub fn load_source(source: &Source, fetcher: &dyn SourceFetcher) -> Result<String> {
    tracing::info!(%source, "loading source");
    match source {
        Source::Url(url) => fetcher.fetch(url),
        Source::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories as
/// needed.
pub fn write_json_pretty<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(value)?;
    write_text(path, &text)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Fetch, extract, assemble, and write.
pub fn run(config: &ScrapeConfig, fetcher: &dyn SourceFetcher) -> Result<ScrapeOutcome> {
    let cpp = load_source(&config.cpp, fetcher)?;
    let header = load_source(&config.header, fetcher)?;

    let extractor = Extractor::new(ExtractConfig {
        lookahead: config.lookahead,
        ..ExtractConfig::default()
    });
    let commands = extractor.extract(&cpp);
    tracing::info!(count = commands.len(), "parsed commands");

    let prefs = parse_struct_fields(&header, &config.struct_name);
    tracing::info!(
        count = prefs.len(),
        struct_name = %config.struct_name,
        "parsed preference fields"
    );

    let registry = Registry::assemble(
        commands,
        prefs,
        RegistryInfo {
            version: config.version.clone(),
            source_url: config.source_url().to_string(),
            generated_by: GENERATED_BY.to_string(),
        },
    );

    write_json_pretty(&config.output, &registry)?;
    tracing::info!(path = %config.output.display(), "wrote registry");

    let typescript_path = if config.typescript {
        let path = config.output.with_extension("ts");
        write_text(&path, &render_typescript(&registry))?;
        tracing::info!(path = %path.display(), "wrote typescript");
        Some(path)
    } else {
        None
    };

    Ok(ScrapeOutcome {
        registry,
        json_path: config.output.clone(),
        typescript_path,
    })
}
