use super::*;
use crate::config::{default_config, MarkupMode};
use crate::spec::{
    Action, ArgumentGroup, ExtraSection, GroupEntry, ParserSpec, Subcommand, SubcommandDispatch,
};

fn help_flag() -> GroupEntry {
    GroupEntry::Action(Action {
        option_strings: vec!["-h".to_string(), "--help".to_string()],
        dest: "help".to_string(),
        help: Some("show this help message and exit".to_string()),
        help_flag: true,
        ..Action::default()
    })
}

fn option(options: &[&str], dest: &str, takes_value: bool, help: &str) -> GroupEntry {
    GroupEntry::Action(Action {
        option_strings: options.iter().map(|s| s.to_string()).collect(),
        dest: dest.to_string(),
        takes_value,
        help: Some(help.to_string()),
        ..Action::default()
    })
}

fn group(title: &str, entries: Vec<GroupEntry>) -> ArgumentGroup {
    ArgumentGroup {
        title: title.to_string(),
        entries,
    }
}

/// `duh` with the default groups, help flag included.
fn duh(optional: Vec<GroupEntry>) -> CliSpec {
    let mut entries = vec![help_flag()];
    entries.extend(optional);
    CliSpec {
        parser: ParserSpec {
            program_name: "duh".to_string(),
            usage: vec!["duh".to_string(), "[-h]".to_string()],
            description: None,
            groups: vec![
                group("positional arguments", Vec::new()),
                group("optional arguments", entries),
            ],
        },
        ..CliSpec::default()
    }
}

fn render_default(spec: &CliSpec) -> String {
    render(spec, &default_config()).expect("render man page")
}

fn lines(doc: &str) -> Vec<&str> {
    doc.split('\n').collect()
}

#[test]
fn renders_minimal_document_exactly() {
    let spec = duh(vec![option(&["--jej"], "jej", true, "c:\\something")]);
    let doc = render_default(&spec);
    let expected = [
        ".TH duh \"1\" Manual",
        ".SH NAME",
        "duh",
        ".SH SYNOPSIS",
        ".B duh",
        "[\\-h]",
        ".SH OPTIONS",
        ".TP",
        "\\fB\\-\\-jej\\fR \\fI\\,JEJ\\/\\fR",
        "c:\\\\something",
        "",
    ]
    .join("\n");
    assert_eq!(doc, expected);
}

#[test]
fn backslashes_in_help_are_doubled() {
    let spec = duh(vec![option(&["--jej"], "jej", false, "c:\\something")]);
    let doc = render_default(&spec);
    assert!(lines(&doc).contains(&"c:\\\\something"));
    assert!(lines(&doc).contains(&".SH OPTIONS"));
    assert!(!doc.replace("\\\\", "").contains("c:\\something"));
}

#[test]
fn named_groups_get_their_own_sections_and_no_options_header() {
    let mut spec = duh(Vec::new());
    spec.parser.groups.push(group(
        "g1",
        vec![option(&["--jej"], "jej", true, "c:\\something")],
    ));
    spec.parser.groups.push(group(
        "g2",
        vec![
            option(&["--jej2"], "jej2", true, "c:\\something"),
            option(&["--else"], "else", true, "c:\\something"),
        ],
    ));
    let doc = render_default(&spec);
    let doc_lines = lines(&doc);
    assert!(doc_lines.contains(&".SH G1"));
    assert!(doc_lines.contains(&".SH G2"));
    assert!(!doc_lines.contains(&".SH OPTIONS"));
}

#[test]
fn underscore_aliases_are_removed_from_the_document() {
    let spec = duh(vec![
        option(
            &["--arg-1", "-a", "--arg_1"],
            "arg_1",
            false,
            "argument with optional underscore or hyphen",
        ),
        option(
            &["--arg-2", "-b", "--arg_2"],
            "arg_2",
            true,
            "argument with optional underscore or hyphen",
        ),
    ]);
    let doc = render_default(&spec);
    let doc_lines = lines(&doc);
    assert!(doc_lines.contains(&"\\fB\\-\\-arg\\-1\\fR, \\fB\\-a\\fR"));
    assert!(doc_lines.contains(&"\\fB\\-\\-arg\\-2\\fR, \\fB\\-b\\fR \\fI\\,ARG_2\\/\\fR"));
    assert!(!doc.contains("--arg_1"));
    assert!(!doc.contains("arg_2"));
}

#[test]
fn raw_mode_keeps_hyphens_in_invocations() {
    let spec = duh(vec![option(
        &["--arg-1", "-a", "--arg_1"],
        "arg_1",
        false,
        "help",
    )]);
    let config = RenderConfig {
        markup_mode: MarkupMode::Raw,
        ..default_config()
    };
    let doc = render(&spec, &config).expect("render");
    assert!(lines(&doc).contains(&"\\fB--arg-1\\fR, \\fB-a\\fR"));
    assert!(!doc.contains("--arg_1"));
}

#[test]
fn double_newlines_in_help_survive_wrapping() {
    let spec = duh(vec![option(
        &["--arg-1", "-a", "--arg_1"],
        "arg_1",
        false,
        "argument with optional underscore or hyphen\n\nthen later another paragraph",
    )]);
    let doc = render_default(&spec);
    assert!(doc.contains(
        "argument with optional underscore or hyphen\n\nthen later another paragraph"
    ));
}

#[test]
fn long_help_is_wrapped_to_the_configured_width() {
    let spec = duh(vec![option(
        &["--long"],
        "long",
        false,
        "one two three four five six seven eight nine ten",
    )]);
    let config = RenderConfig {
        wrap_width: 20,
        ..default_config()
    };
    let doc = render(&spec, &config).expect("render");
    assert!(doc.contains("one two three four\nfive six seven eight\nnine ten"));
}

#[test]
fn author_section_heading_follows_cardinality() {
    let mut spec = duh(Vec::new());
    let doc = render_default(&spec);
    assert!(!doc.contains(".SH AUTHOR"));

    spec.authors = vec!["a1 <yes@no>".to_string()];
    let doc = render_default(&spec);
    assert!(doc.contains(".SH AUTHOR\n.P\n.RS 2\n.nf\na1 <yes@no>\n"));
    assert!(!doc.contains(".SH AUTHORS"));

    spec.authors.push("a3 and <fdassfd>".to_string());
    let doc = render_default(&spec);
    assert!(doc.contains(".SH AUTHORS\n.P\n.RS 2\n.nf\na1 <yes@no>\na3 and <fdassfd>"));
}

#[test]
fn config_authors_replace_spec_authors() {
    let mut spec = duh(Vec::new());
    spec.authors = vec!["from spec".to_string()];
    let config = RenderConfig {
        authors: vec!["from config".to_string(), "second".to_string()],
        ..default_config()
    };
    let rendered = render_man_page(&spec, &config).expect("render");
    assert!(rendered.man_page.contains(".SH AUTHORS"));
    assert!(!rendered.man_page.contains("from spec"));
    assert_eq!(rendered.summary.authors, 2);
}

#[test]
fn empty_epilog_still_emits_comments() {
    let mut spec = duh(Vec::new());
    assert!(!render_default(&spec).contains(".SH COMMENTS"));

    spec.epilog = Some(String::new());
    assert!(render_default(&spec).contains(".SH COMMENTS"));

    spec.epilog = Some("see --help-all".to_string());
    assert!(render_default(&spec).contains(".SH COMMENTS\nsee \\-\\-help\\-all"));
}

#[test]
fn sections_follow_fixed_order() {
    let mut spec = duh(vec![option(&["--verbose"], "verbose", false, "talk more")]);
    spec.short_description = Some("do useful things".to_string());
    spec.parser.description = Some("Longer description.".to_string());
    spec.epilog = Some("Epilog text.".to_string());
    spec.authors = vec!["Jo".to_string()];
    spec.extra_sections = vec![ExtraSection {
        heading: "see also".to_string(),
        content: "other(1)".to_string(),
    }];
    spec.parser.groups.insert(0, group("output", vec![option(&["-o"], "o", true, "file")]));
    spec.parser.groups.push(group(
        "commands",
        vec![GroupEntry::Subcommands(SubcommandDispatch {
            choices: vec![Subcommand {
                name: "run".to_string(),
                help: Some("run it".to_string()),
                spec: ParserSpec::default(),
            }],
        })],
    ));
    let config = RenderConfig {
        extra_sections: vec![ExtraSection {
            heading: "bugs".to_string(),
            content: "Report them.".to_string(),
        }],
        ..default_config()
    };

    let rendered = render_man_page(&spec, &config).expect("render");
    assert_eq!(
        rendered.summary.headings,
        vec![
            "NAME",
            "SYNOPSIS",
            "DESCRIPTION",
            "OPTIONS",
            "COMMANDS",
            "OPTIONS 'duh run'",
            "OUTPUT",
            "AUTHOR",
            "COMMENTS",
            "SEE ALSO",
            "BUGS",
        ]
    );
    assert!(rendered
        .man_page
        .contains(".SH NAME\nduh \\- do useful things\n"));
    assert_eq!(rendered.summary.option_groups, 1);
    assert_eq!(rendered.summary.dispatcher_groups, 1);
    assert_eq!(rendered.summary.named_groups, 1);
    assert_eq!(rendered.summary.extra_sections, 2);
}

#[test]
fn subcommands_under_positionals_use_a_subsection() {
    let mut spec = duh(Vec::new());
    spec.parser.groups[0] = group(
        "positional arguments",
        vec![GroupEntry::Subcommands(SubcommandDispatch {
            choices: vec![Subcommand {
                name: "sync".to_string(),
                help: Some("synchronise".to_string()),
                spec: ParserSpec {
                    program_name: "duh sync".to_string(),
                    usage: vec!["duh sync".to_string(), "[--dry-run]".to_string()],
                    description: Some("Sync everything.".to_string()),
                    groups: vec![group(
                        "optional arguments",
                        vec![
                            help_flag(),
                            option(&["--dry-run"], "dry_run", false, "do nothing"),
                        ],
                    )],
                },
            }],
        })],
    );
    let doc = render_default(&spec);
    let expected = [
        ".SS \\fBSub-commands\\fR",
        ".TP",
        "\\fBduh\\fR \\fI\\,sync\\/\\fR",
        "synchronise",
        ".SH OPTIONS 'duh sync'",
        "usage: duh sync [\\-\\-dry\\-run]",
        "Sync everything.",
        ".TP",
        "\\fB\\-\\-dry\\-run\\fR",
        "do nothing",
    ]
    .join("\n");
    assert!(doc.contains(&expected), "{doc}");
    assert!(!doc.contains(".SH OPTIONS\n"));
    assert!(!doc.contains("show this help"));
}

#[test]
fn empty_options_header_is_omitted() {
    let doc = render_default(&duh(Vec::new()));
    assert!(!doc.contains(".SH OPTIONS"));
    assert!(doc.ends_with("[\\-h]\n"));
}

#[test]
fn degenerate_spec_still_renders() {
    let doc = render_default(&CliSpec::default());
    assert_eq!(doc, ".TH  \"1\" Manual\n.SH NAME\n");
}

#[test]
fn header_uses_configured_section_and_manual() {
    let config = RenderConfig {
        section: "8".to_string(),
        manual: "System Administration".to_string(),
        ..default_config()
    };
    let doc = render(&duh(Vec::new()), &config).expect("render");
    assert!(doc.starts_with(".TH duh \"8\" \"System Administration\"\n"));
}

#[test]
fn excessive_nesting_is_a_structural_error() {
    let mut parser = ParserSpec::default();
    for level in 0..5 {
        parser = ParserSpec {
            groups: vec![group(
                "commands",
                vec![GroupEntry::Subcommands(SubcommandDispatch {
                    choices: vec![Subcommand {
                        name: format!("c{level}"),
                        help: None,
                        spec: parser,
                    }],
                })],
            )],
            ..ParserSpec::default()
        };
    }
    let spec = CliSpec {
        parser: ParserSpec {
            program_name: "duh".to_string(),
            ..parser
        },
        ..CliSpec::default()
    };
    let config = RenderConfig {
        max_depth: 3,
        ..default_config()
    };
    let err = render(&spec, &config).expect_err("nesting cap");
    assert!(err.to_string().contains("exceeds 3 levels"));
    assert!(render(&spec, &default_config()).is_ok());
}

#[test]
fn rendering_does_not_touch_the_input() {
    let spec = duh(vec![option(&["--x"], "x", false, "x")]);
    let before = spec.clone();
    let first = render_default(&spec);
    let second = render_default(&spec);
    assert_eq!(spec, before);
    assert_eq!(first, second);
}

#[test]
fn help_lines_starting_with_dot_or_quote_stay_text() {
    let spec = duh(vec![option(
        &["--rc"],
        "rc",
        false,
        "reads\n\n.climanrc then\n\n'quoted' too",
    )]);
    let doc = render_default(&spec);
    assert!(!doc.lines().any(|line| line == ".climanrc then"));
    assert!(!doc.lines().any(|line| line == "'quoted' too"));
    assert!(doc.contains("\\fB\\-\\-rc\\fR\nreads\n\n\\&.climanrc then\n\n\\&'quoted' too\n"));
}

#[test]
fn raw_mode_wraps_free_text_without_escaping() {
    let mut spec = duh(Vec::new());
    spec.parser.description =
        Some("use --flag to turn \\fBx\\fR on and keep going past the edge".to_string());
    spec.epilog = Some("see --help-all".to_string());
    spec.extra_sections = vec![ExtraSection {
        heading: "see also".to_string(),
        content: "\\fBrsync\\fR(1)".to_string(),
    }];
    let config = RenderConfig {
        markup_mode: MarkupMode::Raw,
        wrap_width: 20,
        ..default_config()
    };
    let doc = render(&spec, &config).expect("render");
    assert!(doc.contains(
        ".SH DESCRIPTION\nuse --flag to turn\n\\fBx\\fR on and keep\ngoing past the edge\n"
    ));
    assert!(doc.contains(".SH COMMENTS\nsee --help-all\n"));
    assert!(doc.ends_with(".SH SEE ALSO\n\\fBrsync\\fR(1)\n"));
    assert!(!doc.contains("\\\\"));
    assert!(!doc.contains("\\-"));
}

#[test]
fn prog_placeholder_expands_to_the_program_path() {
    let mut spec = duh(vec![option(&["--fast"], "fast", false, "make %(prog)s fast")]);
    spec.parser.description = Some("%(prog)s is 100%% useful".to_string());
    spec.epilog = Some("run %(prog)s --help".to_string());
    spec.parser.groups[0] = group(
        "positional arguments",
        vec![GroupEntry::Subcommands(SubcommandDispatch {
            choices: vec![Subcommand {
                name: "sync".to_string(),
                help: None,
                spec: ParserSpec {
                    description: Some("%(prog)s copies files".to_string()),
                    ..ParserSpec::default()
                },
            }],
        })],
    );
    let doc = render_default(&spec);
    assert!(doc.contains("\\fB\\-\\-fast\\fR\nmake duh fast\n"));
    assert!(doc.contains(".SH DESCRIPTION\nduh is 100% useful\n"));
    assert!(doc.contains(".SH OPTIONS 'duh sync'\nduh sync copies files\n"));
    assert!(doc.contains(".SH COMMENTS\nrun duh \\-\\-help\n"));
    assert!(!doc.contains("%(prog)s"));
}
