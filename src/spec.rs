//! Structured description of a command-line interface.
//!
//! The renderer only ever sees this snapshot: a tree of parsers, argument
//! groups, and actions built once by whatever argument library produced it.
//! Nothing in here is mutated while a page is rendered.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Group titles that belong to the generic OPTIONS section.
pub const DEFAULT_GROUP_TITLES: [&str; 2] = ["positional arguments", "optional arguments"];

/// Title under which a subcommand dispatcher is listed as a subsection.
pub const POSITIONAL_GROUP_TITLE: &str = "positional arguments";

/// Root of a CLI description.
///
/// Carries the parser shared by every level of the tree plus the fields
/// that only make sense once per page (authors, epilog, extra sections).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CliSpec {
    #[serde(flatten)]
    pub parser: ParserSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// `None` and `Some("")` render differently: the latter still emits COMMENTS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epilog: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub extra_sections: Vec<ExtraSection>,
}

/// One parser in the tree: the root program or a subcommand.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParserSpec {
    #[serde(default)]
    pub program_name: String,
    /// Synopsis words as printed after `usage:`; the first is the command word.
    #[serde(default)]
    pub usage: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub groups: Vec<ArgumentGroup>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgumentGroup {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<GroupEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupEntry {
    Action(Action),
    Subcommands(SubcommandDispatch),
}

/// A flag or positional argument.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Action {
    /// Empty for positionals.
    #[serde(default)]
    pub option_strings: Vec<String>,
    pub dest: String,
    #[serde(default)]
    pub takes_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metavar: Option<String>,
    #[serde(default)]
    pub nargs: Nargs,
    #[serde(default)]
    pub suppressed: bool,
    #[serde(default)]
    pub help_flag: bool,
}

impl Action {
    /// Suppressed and help actions never reach formatting.
    pub fn is_hidden(&self) -> bool {
        self.suppressed || self.help_flag
    }

    pub fn is_positional(&self) -> bool {
        self.option_strings.is_empty()
    }
}

/// How many values follow a value-taking flag.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Nargs {
    #[default]
    Single,
    Optional,
    ZeroOrMore,
    OneOrMore,
    Exactly(usize),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SubcommandDispatch {
    #[serde(default)]
    pub choices: Vec<Subcommand>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Subcommand {
    pub name: String,
    /// One-line summary shown in the sub-commands listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default)]
    pub spec: ParserSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtraSection {
    pub heading: String,
    pub content: String,
}

impl ArgumentGroup {
    pub fn is_default(&self) -> bool {
        DEFAULT_GROUP_TITLES.contains(&self.title.as_str())
    }

    /// True when this group selects among subcommands.
    pub fn is_dispatcher(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, GroupEntry::Subcommands(_)))
    }
}

/// Shape of a parser tree, reported by `climan check`.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpecStats {
    pub groups: usize,
    pub actions: usize,
    pub subcommands: usize,
    pub max_depth: usize,
}

impl ParserSpec {
    pub fn stats(&self) -> SpecStats {
        let mut stats = SpecStats::default();
        collect_stats(self, 0, &mut stats);
        stats
    }
}

fn collect_stats(parser: &ParserSpec, depth: usize, stats: &mut SpecStats) {
    stats.max_depth = stats.max_depth.max(depth);
    for group in &parser.groups {
        stats.groups += 1;
        for entry in &group.entries {
            match entry {
                GroupEntry::Action(action) if !action.is_hidden() => stats.actions += 1,
                GroupEntry::Action(_) => {}
                GroupEntry::Subcommands(dispatch) => {
                    for choice in &dispatch.choices {
                        stats.subcommands += 1;
                        collect_stats(&choice.spec, depth + 1, stats);
                    }
                }
            }
        }
    }
}

/// Parse a CLI description from JSON text.
pub fn parse_spec(text: &str) -> Result<CliSpec> {
    if text.trim().is_empty() {
        return Err(anyhow!("CLI specification is empty"));
    }
    let spec: Option<CliSpec> =
        serde_json::from_str(text).context("parse CLI specification JSON")?;
    spec.ok_or_else(|| anyhow!("CLI specification is null"))
}

/// Load a CLI description from a JSON file.
pub fn load_spec(path: &Path) -> Result<CliSpec> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read spec {}", path.display()))?;
    parse_spec(&text).with_context(|| format!("load spec {}", path.display()))
}
