use super::escape::{bold, expand_prog, italic, TextFormatter};
use super::invocation::format_invocation;
use crate::spec::{
    Action, ArgumentGroup, GroupEntry, ParserSpec, SubcommandDispatch, POSITIONAL_GROUP_TITLE,
};
use anyhow::{bail, Result};

/// Walks argument groups and recurses into subcommand parsers.
pub(super) struct GroupRenderer<'a> {
    text: &'a TextFormatter,
    max_depth: usize,
}

impl<'a> GroupRenderer<'a> {
    pub(super) fn new(text: &'a TextFormatter, max_depth: usize) -> Self {
        Self { text, max_depth }
    }

    /// Definition-list entry for one action; empty for hidden actions.
    pub(super) fn render_action(&self, action: &Action, prog: &str) -> Vec<String> {
        if action.is_hidden() {
            return Vec::new();
        }
        let mut lines = vec![
            ".TP".to_string(),
            format_invocation(action, self.text.mode()),
        ];
        if let Some(help) = action.help.as_deref().filter(|help| !help.is_empty()) {
            lines.push(self.text.format_help(&expand_prog(help, prog)));
        }
        lines
    }

    /// Render every entry of `group`; `prog` labels nested subcommands.
    pub(super) fn render_group(
        &self,
        group: &ArgumentGroup,
        prog: &str,
        depth: usize,
    ) -> Result<String> {
        let mut lines = Vec::new();
        let visible = group.entries.iter().filter(|entry| match entry {
            GroupEntry::Action(action) => !action.is_hidden(),
            GroupEntry::Subcommands(_) => true,
        });
        for entry in visible {
            match entry {
                GroupEntry::Action(action) => lines.extend(self.render_action(action, prog)),
                GroupEntry::Subcommands(dispatch) => {
                    lines.extend(self.render_dispatch(group, dispatch, prog, depth)?);
                }
            }
        }
        Ok(lines.join("\n"))
    }

    fn render_dispatch(
        &self,
        group: &ArgumentGroup,
        dispatch: &SubcommandDispatch,
        prog: &str,
        depth: usize,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        if group.title == POSITIONAL_GROUP_TITLE {
            lines.push(format!(".SS {}", bold("Sub-commands")));
        } else {
            lines.push(format!(".SH {}", self.text.escape(&group.title.to_uppercase())));
        }

        for choice in &dispatch.choices {
            lines.push(".TP".to_string());
            lines.push(format!(
                "{} {}",
                bold(&self.text.escape(prog)),
                italic(&self.text.escape(&choice.name))
            ));
            if let Some(help) = choice.help.as_deref().filter(|help| !help.is_empty()) {
                lines.push(self.text.escape_line(help));
            }
        }

        for choice in &dispatch.choices {
            let path = format!("{prog} {}", choice.name);
            lines.extend(self.render_subparser(&choice.spec, &path, depth + 1)?);
        }
        Ok(lines)
    }

    /// Nested OPTIONS section for one subcommand, recursing through its groups.
    pub(super) fn render_subparser(
        &self,
        parser: &ParserSpec,
        prog_path: &str,
        depth: usize,
    ) -> Result<Vec<String>> {
        if depth > self.max_depth {
            bail!(
                "subcommand nesting exceeds {} levels at '{}'",
                self.max_depth,
                prog_path
            );
        }
        tracing::debug!(prog = prog_path, depth, "rendering subcommand");

        let mut lines = vec![format!(".SH OPTIONS '{}'", self.text.escape(prog_path))];
        if !parser.usage.is_empty() {
            lines.push(format!("usage: {}", self.text.escape(&parser.usage.join(" "))));
        }
        if let Some(description) = parser.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(self.text.format_text(&expand_prog(description, prog_path)));
        }
        for group in &parser.groups {
            let entry = self.render_group(group, prog_path, depth)?;
            if !entry.is_empty() {
                lines.push(entry);
            }
        }
        Ok(lines)
    }
}
