//! Deterministic man page renderer for structured CLI descriptions.
//!
//! Section order is fixed regardless of how the description lists its
//! groups: header, NAME, SYNOPSIS, DESCRIPTION, OPTIONS, sub-command
//! dispatchers, named groups, AUTHORS, COMMENTS, then extra sections.

use crate::config::RenderConfig;
use crate::spec::CliSpec;
use anyhow::Result;
use serde::Serialize;

mod escape;
mod format;
mod groups;
mod invocation;

use escape::TextFormatter;
use format::{
    append_authors_section, append_comments_section, append_description_section,
    append_dispatcher_sections, append_extra_sections, append_header, append_name_section,
    append_named_group_sections, append_options_section, append_synopsis_section,
    finish_document,
};
use groups::GroupRenderer;

pub use escape::{bold, escape_literal, italic};
pub use invocation::{dedup_aliases, format_invocation};

/// Rendering summary used by `climan check` and diagnostics.
#[derive(Serialize, Clone, Debug, Default)]
pub struct RenderSummary {
    pub schema_version: u32,
    pub option_groups: usize,
    pub dispatcher_groups: usize,
    pub named_groups: usize,
    pub entries: usize,
    pub authors: usize,
    pub extra_sections: usize,
    pub headings: Vec<String>,
}

/// Rendered man page content plus a summary of what was emitted.
pub struct RenderedManPage {
    pub man_page: String,
    pub summary: RenderSummary,
}

/// Render `spec` into ROFF using `config` for mode, layout, and the
/// authors/extra sections supplied outside the description.
pub fn render_man_page(spec: &CliSpec, config: &RenderConfig) -> Result<RenderedManPage> {
    let text = TextFormatter::new(config.markup_mode, config.wrap_width)?;
    let renderer = GroupRenderer::new(&text, config.max_depth);
    let parser = &spec.parser;
    let prog = parser.program_name.as_str();
    tracing::info!(prog, mode = ?config.markup_mode, "rendering man page");

    let authors = if config.authors.is_empty() {
        &spec.authors
    } else {
        &config.authors
    };
    let extra_sections = spec.extra_sections.iter().chain(&config.extra_sections);

    let mut out = Vec::new();
    append_header(&mut out, &text, prog, &config.section, &config.manual);
    append_name_section(&mut out, &text, prog, spec.short_description.as_deref());
    append_synopsis_section(&mut out, &text, &parser.usage);
    append_description_section(&mut out, &text, prog, parser.description.as_deref());
    let option_groups = append_options_section(&mut out, &renderer, &parser.groups, prog)?;
    let dispatcher_groups = append_dispatcher_sections(&mut out, &renderer, &parser.groups, prog)?;
    let named_groups =
        append_named_group_sections(&mut out, &text, &renderer, &parser.groups, prog)?;
    append_authors_section(&mut out, authors);
    append_comments_section(&mut out, &text, prog, spec.epilog.as_deref());
    append_extra_sections(&mut out, &text, extra_sections.clone());

    let man_page = finish_document(&out);
    let summary = build_render_summary(&man_page, option_groups, dispatcher_groups, named_groups)
        .with_counts(authors.len(), extra_sections.count());
    tracing::debug!(
        headings = summary.headings.len(),
        entries = summary.entries,
        "man page rendered"
    );

    Ok(RenderedManPage { man_page, summary })
}

/// Convenience wrapper returning only the document text.
pub fn render(spec: &CliSpec, config: &RenderConfig) -> Result<String> {
    render_man_page(spec, config).map(|rendered| rendered.man_page)
}

fn build_render_summary(
    man_page: &str,
    option_groups: usize,
    dispatcher_groups: usize,
    named_groups: usize,
) -> RenderSummary {
    let headings = man_page
        .lines()
        .filter_map(|line| line.strip_prefix(".SH "))
        .map(str::to_string)
        .collect();
    let entries = man_page.lines().filter(|line| *line == ".TP").count();
    RenderSummary {
        schema_version: 1,
        option_groups,
        dispatcher_groups,
        named_groups,
        entries,
        headings,
        ..RenderSummary::default()
    }
}

impl RenderSummary {
    fn with_counts(mut self, authors: usize, extra_sections: usize) -> Self {
        self.authors = authors;
        self.extra_sections = extra_sections;
        self
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
