//! Assembly of the published command registry document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Category, CommandDescriptor, FieldMap};

/// Provenance fields stamped onto a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryInfo {
    /// Generation date, `YYYY-MM-DD` (UTC).
    pub version: String,
    /// URL the command source was fetched from.
    pub source_url: String,
    /// Name of the generating tool.
    pub generated_by: String,
}

/// The JSON registry document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registry {
    /// Generation date, `YYYY-MM-DD` (UTC).
    pub version: String,
    /// URL the command source was fetched from.
    pub source_url: String,
    /// Name of the generating tool.
    pub generated_by: String,
    /// Number of entries in `commands`.
    pub total_commands: usize,
    /// Distinct categories in `commands` order.
    pub categories: Vec<Category>,
    /// All commands, sorted by category label then name.
    pub commands: Vec<CommandDescriptor>,
    /// `commands` grouped by category, same order.
    pub commands_by_category: IndexMap<Category, Vec<CommandDescriptor>>,
    /// Members of the node preferences struct.
    pub node_prefs: FieldMap,
}

impl Registry {
    /// Sort and group `commands` and combine them with the struct fields.
    ///
    /// Sorting compares category labels as strings, so `bridge` sorts before
    /// `get` regardless of enum declaration order.
    pub fn assemble(
        mut commands: Vec<CommandDescriptor>,
        node_prefs: FieldMap,
        info: RegistryInfo,
    ) -> Self {
        commands.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        let mut commands_by_category: IndexMap<Category, Vec<CommandDescriptor>> = IndexMap::new();
        for cmd in &commands {
            commands_by_category
                .entry(cmd.category)
                .or_default()
                .push(cmd.clone());
        }

        Self {
            version: info.version,
            source_url: info.source_url,
            generated_by: info.generated_by,
            total_commands: commands.len(),
            categories: commands_by_category.keys().copied().collect(),
            commands,
            commands_by_category,
            node_prefs,
        }
    }

    /// `(category, command count)` pairs in registry order.
    pub fn category_counts(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.commands_by_category
            .iter()
            .map(|(category, cmds)| (*category, cmds.len()))
    }
}

fn sort_key(cmd: &CommandDescriptor) -> (&str, &str) {
    (cmd.category.as_str(), &cmd.name)
}
