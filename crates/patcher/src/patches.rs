//! The ordered patch catalogue and the engine that applies it.
//!
//! Every patch is a precondition plus a text edit. A patch whose precondition
//! does not hold is skipped, and a patch that leaves the text unchanged is not
//! reported, so applying the catalogue twice is a no-op the second time.

use crate::snippets::*;

/// A text edit with a built-in precondition.
#[derive(Debug, Clone, Copy)]
pub enum Edit {
    /// Replace every occurrence of `old` with `new`. Requires `old`.
    Replace {
        /// Text to find.
        old: &'static str,
        /// Replacement.
        new: &'static str,
    },
    /// [`Edit::Replace`], skipped while `marker` is present.
    ReplaceUnless {
        /// Text whose presence means the edit is already in place.
        marker: &'static str,
        /// Text to find.
        old: &'static str,
        /// Replacement.
        new: &'static str,
    },
    /// Replace `old` with `new` only in the text before the first `boundary`,
    /// skipped while `marker` is present anywhere. Requires `boundary` past the
    /// first byte.
    ReplaceBefore {
        /// Text whose presence means the edit is already in place.
        marker: &'static str,
        /// End of the region that is edited.
        boundary: &'static str,
        /// Text to find.
        old: &'static str,
        /// Replacement.
        new: &'static str,
    },
    /// Insert `text` right after every occurrence of `anchor`, skipped while
    /// `marker` is present.
    InsertAfter {
        /// Text whose presence means the edit is already in place.
        marker: &'static str,
        /// Text the insertion follows.
        anchor: &'static str,
        /// Inserted text.
        text: &'static str,
    },
    /// Insert `text` at the end of the line holding the last `anchor`, before
    /// its newline. Skipped while `marker` is present; requires `anchor` past
    /// the first byte and a newline after it.
    AppendAfterLastLine {
        /// Text whose presence means the edit is already in place.
        marker: &'static str,
        /// Text locating the line.
        anchor: &'static str,
        /// Inserted text.
        text: &'static str,
    },
}

impl Edit {
    /// Apply the edit, or `None` when its precondition fails.
    pub fn apply(&self, content: &str) -> Option<String> {
        match *self {
            Edit::Replace { old, new } => content.contains(old).then(|| content.replace(old, new)),
            Edit::ReplaceUnless { marker, old, new } => {
                if content.contains(marker) {
                    return None;
                }
                Edit::Replace { old, new }.apply(content)
            }
            Edit::ReplaceBefore {
                marker,
                boundary,
                old,
                new,
            } => {
                if content.contains(marker) {
                    return None;
                }
                let end = content.find(boundary).filter(|&pos| pos > 0)?;
                let (head, tail) = content.split_at(end);
                Some(head.replace(old, new) + tail)
            }
            Edit::InsertAfter {
                marker,
                anchor,
                text,
            } => {
                if content.contains(marker) {
                    return None;
                }
                Some(content.replace(anchor, &format!("{anchor}{text}")))
            }
            Edit::AppendAfterLastLine {
                marker,
                anchor,
                text,
            } => {
                if content.contains(marker) {
                    return None;
                }
                let start = content.rfind(anchor).filter(|&pos| pos > 0)?;
                let eol = start + content[start..].find('\n')?;
                let mut out = String::with_capacity(content.len() + text.len());
                out.push_str(&content[..eol]);
                out.push_str(text);
                out.push_str(&content[eol..]);
                Some(out)
            }
        }
    }
}

/// A named edit.
#[derive(Debug, Clone, Copy)]
pub struct Patch {
    /// Name reported when the patch changes the file.
    pub name: &'static str,
    /// The edit.
    pub edit: Edit,
}

/// The enhancements, in application order.
pub const PATCHES: &[Patch] = &[
    Patch {
        name: "imports",
        edit: Edit::ReplaceBefore {
            marker: "import subprocess",
            boundary: "\nlogger = ",
            old: "import time\n",
            new: "import time\nimport subprocess  # pymc_console: for systemctl commands\n",
        },
    },
    Patch {
        name: "tempradio_state",
        edit: Edit::InsertAfter {
            marker: "_tempradio_task",
            anchor: "self.repeater_config = config.get('repeater', {})",
            text: TEMPRADIO_STATE,
        },
    },
    Patch {
        name: "reboot",
        edit: Edit::Replace {
            old: OLD_REBOOT,
            new: NEW_REBOOT,
        },
    },
    Patch {
        name: "clear_stats",
        edit: Edit::Replace {
            old: OLD_CLEAR_STATS,
            new: NEW_CLEAR_STATS,
        },
    },
    Patch {
        name: "neighbor_remove",
        edit: Edit::Replace {
            old: OLD_NEIGHBOR_REMOVE,
            new: NEW_NEIGHBOR_REMOVE,
        },
    },
    Patch {
        name: "tempradio",
        edit: Edit::Replace {
            old: OLD_TEMPRADIO,
            new: NEW_TEMPRADIO,
        },
    },
    Patch {
        name: "stats_routing",
        edit: Edit::Replace {
            old: OLD_STATS_ROUTING,
            new: NEW_STATS_ROUTING,
        },
    },
    Patch {
        name: "board_routing",
        edit: Edit::ReplaceUnless {
            marker: r#"command == "board""#,
            old: OLD_VER_ROUTING,
            new: NEW_VER_ROUTING,
        },
    },
    // The routing patch already calls `_cmd_stats_packets`, so look for the def.
    Patch {
        name: "stats_methods",
        edit: Edit::AppendAfterLastLine {
            marker: "def _cmd_stats_packets",
            anchor: r#"return "Unknown log command""#,
            text: STATS_METHODS,
        },
    },
];

/// Patched text plus the names of the patches that changed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Text after every applicable patch.
    pub content: String,
    /// Patches that changed the text, in application order.
    pub applied: Vec<&'static str>,
}

impl PatchOutcome {
    /// Whether any patch changed the text.
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Run `patches` left to right over `content`.
pub fn apply_patches(content: &str, patches: &[Patch]) -> PatchOutcome {
    let mut current = content.to_string();
    let mut applied = Vec::new();
    for patch in patches {
        match patch.edit.apply(&current) {
            Some(next) if next != current => {
                tracing::debug!(patch = patch.name, "applied");
                applied.push(patch.name);
                current = next;
            }
            _ => tracing::debug!(patch = patch.name, "skipped"),
        }
    }
    PatchOutcome {
        content: current,
        applied,
    }
}
