//! Single-pass command extraction over `CommonCLI.cpp`.
//!
//! The scan is heuristic: unexpected source shapes produce fewer or
//! default-valued descriptors, never an error.

use std::collections::HashSet;

use crate::catalog::{Catalog, classify_category, normalize_response_format};
use crate::matchers::{self, CommandToken, CompareTarget};
use crate::model::{Category, CommandDescriptor, Param};

/// Lines inspected for reply templates and argument conversions, counting the
/// matched line itself.
pub const DEFAULT_LOOKAHEAD: usize = 15;

/// Extractor settings.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Lookahead window in lines, including the matched line.
    pub lookahead: usize,
    /// Description and serial-only tables.
    pub catalog: Catalog,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            catalog: Catalog::meshcore(),
        }
    }
}

/// The `get`/`set` sub-command block the scan is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Get,
    Set,
}

impl Block {
    fn prefix(self) -> &'static str {
        match self {
            Block::Get => "get ",
            Block::Set => "set ",
        }
    }

    fn category(self) -> Category {
        match self {
            Block::Get => Category::Get,
            Block::Set => Category::Set,
        }
    }
}

#[derive(Debug, Default)]
struct ScanState {
    block: Option<Block>,
    // Single flag, not a stack: nested conditionals can clear it early.
    serial_only: bool,
}

impl ScanState {
    fn observe(&mut self, line: &str) {
        if matchers::is_serial_only_marker(line) {
            self.serial_only = true;
        }

        if matchers::opens_get_block(line) {
            self.block = Some(Block::Get);
        } else if matchers::opens_set_block(line) {
            self.block = Some(Block::Set);
        } else if let Some(block) = self.block
            && matchers::leaves_block(line, block.prefix())
        {
            self.block = None;
        }
    }
}

/// Extracts command descriptors from source text.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// An extractor with the given settings.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Scan `source` and return its commands in first-seen order.
    ///
    /// A name matched twice keeps the descriptor from its first match.
    pub fn extract(&self, source: &str) -> Vec<CommandDescriptor> {
        let lines: Vec<&str> = source.split('\n').collect();
        let mut state = ScanState::default();
        let mut seen = HashSet::new();
        let mut commands = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            state.observe(line);

            if let Some(token) = matchers::command_token(line) {
                let end = lines.len().min(i.saturating_add(self.config.lookahead));
                let descriptor =
                    self.describe(&token, state.block, state.serial_only, &lines[i..end]);
                if seen.insert(descriptor.name.clone()) {
                    tracing::debug!(
                        name = %descriptor.name,
                        category = %descriptor.category,
                        line = i + 1,
                        "extracted command"
                    );
                    commands.push(descriptor);
                } else {
                    tracing::trace!(
                        name = %descriptor.name,
                        line = i + 1,
                        "duplicate command skipped"
                    );
                }
            }

            if matchers::starts_else_branch(line) {
                state.serial_only = false;
            }
        }

        commands
    }

    fn describe(
        &self,
        token: &CommandToken<'_>,
        block: Option<Block>,
        serial_context: bool,
        window: &[&str],
    ) -> CommandDescriptor {
        let keyword = token.literal.trim();
        let (name, category) = match (token.target, block) {
            (CompareTarget::Config, Some(block)) => {
                (format!("{}{keyword}", block.prefix()), block.category())
            }
            (CompareTarget::Config, None) => (keyword.to_string(), Category::Config),
            (CompareTarget::Command, _) => (keyword.to_string(), classify_category(keyword)),
        };

        let mut reply = None;
        let mut params = Vec::new();
        for line in window {
            if reply.is_none() {
                reply = matchers::reply_template(line);
            }
            if let Some(ty) = matchers::param_conversion(line) {
                params.push(Param::value(ty));
            }
        }

        let catalog = &self.config.catalog;
        CommandDescriptor {
            serial_only: serial_context || catalog.is_serial_only(&name),
            has_param: token.takes_argument() || !params.is_empty(),
            response_format: normalize_response_format(reply),
            description: catalog.describe(&name),
            params,
            category,
            name,
        }
    }
}

/// Extract with the default MeshCore settings.
pub fn extract_commands(source: &str) -> Vec<CommandDescriptor> {
    Extractor::default().extract(source)
}
