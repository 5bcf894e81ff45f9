use super::escape::{bold, escape_literal, italic};
use crate::config::MarkupMode;
use crate::spec::{Action, Nargs};

/// One-line invocation for an action: bold names plus an italic metavariable
/// when the flag takes a value.
pub fn format_invocation(action: &Action, mode: MarkupMode) -> String {
    if action.is_positional() {
        let name = action.metavar.as_deref().unwrap_or(&action.dest);
        return bold(&escape_literal(name, mode));
    }

    let names = dedup_aliases(&action.option_strings)
        .into_iter()
        .map(|name| bold(&escape_literal(name, mode)))
        .collect::<Vec<_>>()
        .join(", ");
    if !action.takes_value {
        return names;
    }

    let metavar = match action.metavar.as_deref() {
        Some(metavar) => metavar.to_string(),
        None => action.dest.to_uppercase(),
    };
    let metavar = italic(&escape_literal(&metavar, mode));
    let args = format_args_for(&metavar, action.nargs);
    if args.is_empty() {
        return names;
    }
    format!("{names} {args}")
}

/// Drop `--a_b` when `--a-b` is also declared; order is otherwise kept.
pub fn dedup_aliases(option_strings: &[String]) -> Vec<&str> {
    option_strings
        .iter()
        .filter(|option| {
            !(option.contains('_') && option_strings.contains(&option.replace('_', "-")))
        })
        .map(String::as_str)
        .collect()
}

fn format_args_for(metavar: &str, nargs: Nargs) -> String {
    match nargs {
        Nargs::Single => metavar.to_string(),
        Nargs::Optional => format!("[{metavar}]"),
        Nargs::ZeroOrMore => format!("[{metavar} ...]"),
        Nargs::OneOrMore => format!("{metavar} [{metavar} ...]"),
        Nargs::Exactly(count) => vec![metavar; count].join(" "),
    }
}
