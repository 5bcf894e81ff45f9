use crate::config::MarkupMode;
use anyhow::{Context, Result};
use regex::Regex;
use std::borrow::Cow;

const BOLD_START: &str = "\\fB";
const ITALIC_START: &str = "\\fI";
const FONT_END: &str = "\\fR";

/// Stand-in for a paragraph break while the wrap pass collapses whitespace.
const PARAGRAPH_SENTINEL: &str = "====MAN";

/// Escape free text for ROFF. Backslashes go first so the `\-` escapes
/// introduced afterwards are not doubled.
pub fn escape_literal(text: &str, mode: MarkupMode) -> String {
    match mode {
        MarkupMode::Raw => text.to_string(),
        MarkupMode::Escaped => text.replace('\\', "\\\\").replace('-', "\\-"),
    }
}

/// Prefix lines that roff would read as requests (`.` or `'` first) with
/// the zero-width `\&`.
fn guard_control_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.starts_with('.') || line.starts_with('\'') {
                format!("\\&{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitute `%(prog)s` the way argparse formats help and descriptions.
/// `%%` collapses to `%` only when a substitution happens.
pub(crate) fn expand_prog<'t>(text: &'t str, prog: &str) -> Cow<'t, str> {
    if !text.contains("%(prog)s") {
        return Cow::Borrowed(text);
    }
    let expanded = text
        .split("%%")
        .map(|piece| piece.replace("%(prog)s", prog))
        .collect::<Vec<_>>()
        .join("%");
    Cow::Owned(expanded)
}

/// Wrap in bold markup unless the markers are already present.
pub fn bold(text: &str) -> String {
    let mut out = text.to_string();
    if !out.trim().starts_with(BOLD_START) {
        out = format!("{BOLD_START}{out}");
    }
    if !out.trim().ends_with(FONT_END) {
        out.push_str(FONT_END);
    }
    out
}

/// Italic markup with italic corrections, used for metavariables.
pub fn italic(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with(ITALIC_START) && trimmed.ends_with(FONT_END) {
        return text.to_string();
    }
    format!("{ITALIC_START}\\,{text}\\/{FONT_END}")
}

/// Collapse whitespace and fill to `width`, the way argument help is
/// normally laid out.
pub(crate) fn fill(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let options = textwrap::Options::new(width)
        .break_words(false)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
        .word_splitter(textwrap::WordSplitter::NoHyphenation);
    textwrap::fill(&collapsed, options)
}

/// Free-text formatting shared by every section of one page.
pub(crate) struct TextFormatter {
    mode: MarkupMode,
    width: usize,
    paragraph_break: Regex,
}

impl TextFormatter {
    pub(crate) fn new(mode: MarkupMode, width: usize) -> Result<Self> {
        let paragraph_break =
            Regex::new(r" *\n\n *").context("compile paragraph break pattern")?;
        Ok(Self {
            mode,
            width,
            paragraph_break,
        })
    }

    pub(crate) fn mode(&self) -> MarkupMode {
        self.mode
    }

    pub(crate) fn escape(&self, text: &str) -> String {
        escape_literal(text, self.mode)
    }

    /// Escape text that lands at the start of an output line.
    pub(crate) fn escape_line(&self, text: &str) -> String {
        let escaped = self.escape(text);
        match self.mode {
            MarkupMode::Raw => escaped,
            MarkupMode::Escaped => guard_control_lines(&escaped),
        }
    }

    /// Run `wrap` over `text` while keeping blank-line paragraph breaks.
    pub(crate) fn wrap_paragraphs<F>(&self, text: &str, wrap: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let marked = self.paragraph_break.replace_all(text, PARAGRAPH_SENTINEL);
        wrap(&marked)
            .trim_matches('\n')
            .replace(PARAGRAPH_SENTINEL, "\n\n")
    }

    /// Wrap and escape a block of free text (descriptions, epilog, sections).
    pub(crate) fn format_text(&self, text: &str) -> String {
        let wrapped = self.wrap_paragraphs(text, |marked| fill(marked, self.width));
        self.escape_line(wrapped.trim_matches('\n'))
    }

    /// Help text under an option entry. Raw mode passes it through untouched.
    pub(crate) fn format_help(&self, help: &str) -> String {
        match self.mode {
            MarkupMode::Raw => help.to_string(),
            MarkupMode::Escaped => self.format_text(help),
        }
    }
}
