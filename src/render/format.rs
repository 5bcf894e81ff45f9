use super::escape::{expand_prog, TextFormatter};
use super::groups::GroupRenderer;
use crate::spec::{ArgumentGroup, ExtraSection};
use anyhow::Result;

pub(super) fn append_header(
    out: &mut Vec<String>,
    text: &TextFormatter,
    prog: &str,
    section: &str,
    manual: &str,
) {
    let manual = if manual.contains(char::is_whitespace) {
        format!("\"{manual}\"")
    } else {
        manual.to_string()
    };
    out.push(format!(".TH {} \"{}\" {}", text.escape(prog), section, manual));
}

pub(super) fn append_name_section(
    out: &mut Vec<String>,
    text: &TextFormatter,
    prog: &str,
    short_description: Option<&str>,
) {
    out.push(".SH NAME".to_string());
    match short_description.filter(|desc| !desc.is_empty()) {
        Some(desc) => out.push(format!("{} \\- {}", text.escape(prog), text.escape(desc))),
        None => out.push(text.escape(prog)),
    }
}

pub(super) fn append_synopsis_section(
    out: &mut Vec<String>,
    text: &TextFormatter,
    usage: &[String],
) {
    let Some((command, rest)) = usage.split_first() else {
        return;
    };
    out.push(".SH SYNOPSIS".to_string());
    out.push(format!(".B {}", text.escape(command)));
    if !rest.is_empty() {
        out.push(text.escape_line(&rest.join(" ")));
    }
}

pub(super) fn append_description_section(
    out: &mut Vec<String>,
    text: &TextFormatter,
    prog: &str,
    description: Option<&str>,
) {
    let Some(description) = description.filter(|desc| !desc.is_empty()) else {
        return;
    };
    out.push(".SH DESCRIPTION".to_string());
    out.push(text.format_text(&expand_prog(description, prog)));
}

/// OPTIONS collects the default-titled groups; the header is skipped when
/// none of them has a visible entry.
pub(super) fn append_options_section(
    out: &mut Vec<String>,
    renderer: &GroupRenderer<'_>,
    groups: &[ArgumentGroup],
    prog: &str,
) -> Result<usize> {
    let mut printed_header = false;
    let mut rendered = 0;
    for group in groups
        .iter()
        .filter(|group| group.is_default() && !group.is_dispatcher())
    {
        let entry = renderer.render_group(group, prog, 0)?;
        if entry.is_empty() {
            continue;
        }
        if !printed_header {
            out.push(".SH OPTIONS".to_string());
            printed_header = true;
        }
        out.push(entry);
        rendered += 1;
    }
    Ok(rendered)
}

pub(super) fn append_dispatcher_sections(
    out: &mut Vec<String>,
    renderer: &GroupRenderer<'_>,
    groups: &[ArgumentGroup],
    prog: &str,
) -> Result<usize> {
    let mut rendered = 0;
    for group in groups.iter().filter(|group| group.is_dispatcher()) {
        out.push(renderer.render_group(group, prog, 0)?);
        rendered += 1;
    }
    Ok(rendered)
}

pub(super) fn append_named_group_sections(
    out: &mut Vec<String>,
    text: &TextFormatter,
    renderer: &GroupRenderer<'_>,
    groups: &[ArgumentGroup],
    prog: &str,
) -> Result<usize> {
    let mut rendered = 0;
    for group in groups
        .iter()
        .filter(|group| !group.is_default() && !group.is_dispatcher())
    {
        out.push(format!(".SH {}", text.escape(&group.title.to_uppercase())));
        let entry = renderer.render_group(group, prog, 0)?;
        if !entry.is_empty() {
            out.push(entry);
        }
        rendered += 1;
    }
    Ok(rendered)
}

/// Authors are listed verbatim inside an indented no-fill block.
pub(super) fn append_authors_section(out: &mut Vec<String>, authors: &[String]) {
    if authors.is_empty() {
        return;
    }
    let heading = if authors.len() == 1 { "AUTHOR" } else { "AUTHORS" };
    out.push(format!(".SH {heading}"));
    out.push(init_list());
    out.extend(authors.iter().cloned());
    out.push(".fi".to_string());
    out.push(".RE".to_string());
}

pub(super) fn append_comments_section(
    out: &mut Vec<String>,
    text: &TextFormatter,
    prog: &str,
    epilog: Option<&str>,
) {
    let Some(epilog) = epilog else {
        return;
    };
    out.push(".SH COMMENTS".to_string());
    out.push(text.format_text(&expand_prog(epilog, prog)));
}

pub(super) fn append_extra_sections<'s, I>(
    out: &mut Vec<String>,
    text: &TextFormatter,
    sections: I,
) where
    I: IntoIterator<Item = &'s ExtraSection>,
{
    for section in sections {
        out.push(format!(".SH {}", text.escape(&section.heading.to_uppercase())));
        out.push(text.format_text(&section.content));
    }
}

fn init_list() -> String {
    ".P\n.RS 2\n.nf".to_string()
}

/// Join emitted blocks into the final document with one trailing newline.
pub(super) fn finish_document(blocks: &[String]) -> String {
    let mut doc = blocks.join("\n").trim().to_string();
    doc.push('\n');
    doc
}
