//! Shell quoting for display.
//!
//! Commands are always executed with argument arrays; these helpers only
//! render a copy-pasteable form for logs, dry runs and error details.

const NEEDS_QUOTING: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}', '<',
    '>', '|', '&', ';', '#', '~',
];

/// Body of a single-quoted word: each `'` becomes `'\''`.
pub fn escape_single_quote_content(value: &str) -> String {
    value.replace('\'', "'\\''")
}

/// One argument as a POSIX shell would need to see it. Plain words
/// (variable names, targets, `1:234:web:abc` ids) pass through unchanged.
pub fn quote_arg(arg: &str) -> String {
    match arg {
        "" => "''".to_string(),
        plain if !plain.contains(NEEDS_QUOTING) => plain.to_string(),
        _ => format!("'{}'", escape_single_quote_content(arg)),
    }
}

pub fn quote_args(args: &[String]) -> String {
    args.iter()
        .map(|a| quote_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}
