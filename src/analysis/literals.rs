//! Literal extraction.
//!
//! Pulls the identifying string literals (package name, version, module
//! path) out of a classified call's arguments and attaches them to the
//! record. Only string-literal arguments participate; an identifier or
//! expression at an expected position changes nothing.

use tree_sitter::Node;

use super::classify::{string_literal_value, CallKind};
use crate::stats::StatsRecord;

/// Dispatches literal extraction for one classified call.
pub(crate) fn extract_literals(
    record: &mut StatsRecord,
    kind: CallKind,
    args: &[Node],
    source: &str,
) {
    match kind {
        CallKind::Installed | CallKind::Builtin => extract_from_installed(record, args, source),
        CallKind::Def => extract_from_def(record, args.first(), source),
        CallKind::Main | CallKind::Remap => extract_from_main(record, args.first(), source),
        _ => {}
    }
}

/// `installed`/`builtin` calls carry a package name first, then some mix of
/// version and path literals. The first literal is the package name; after
/// that, the first path-like literal (contains `/`) supplies `path`, and the
/// first plain literal supplies `fileName`. First value wins throughout.
fn extract_from_installed(record: &mut StatsRecord, args: &[Node], source: &str) {
    let mut literals = args
        .iter()
        .filter_map(|node| string_literal_value(node, source));

    let Some(package) = literals.next() else {
        return;
    };
    record.package_name = Some(package);

    for literal in literals {
        if literal.contains('/') {
            if record.path.is_none() {
                if record.file_name.is_none() {
                    let name = file_name_of(&literal);
                    if !name.is_empty() {
                        record.file_name = Some(name.to_string());
                    }
                }
                record.path = Some(literal);
            }
        } else if record.file_name.is_none() {
            record.file_name = Some(literal);
        }
    }
}

/// `def` calls declare the module path as their first argument.
fn extract_from_def(record: &mut StatsRecord, arg: Option<&Node>, source: &str) {
    let Some(value) = arg.and_then(|node| string_literal_value(node, source)) else {
        return;
    };
    let name = file_name_of(&value);
    if !name.is_empty() {
        record.file_name = Some(name.to_string());
    }
    record.path = Some(value);
}

/// `main`/`remap` calls reference a target module specifier first.
fn extract_from_main(record: &mut StatsRecord, arg: Option<&Node>, source: &str) {
    if let Some(value) = arg.and_then(|node| string_literal_value(node, source)) {
        record.path = Some(value);
    }
}

/// Final path segment of a module specifier.
fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_of_plain_path() {
        assert_eq!(file_name_of("/foo/bar.js"), "bar.js");
    }

    #[test]
    fn test_file_name_of_versioned_path() {
        assert_eq!(file_name_of("/lodash$4.17.21/lodash.js"), "lodash.js");
    }

    #[test]
    fn test_file_name_of_bare_name() {
        assert_eq!(file_name_of("index.js"), "index.js");
    }

    #[test]
    fn test_file_name_of_trailing_slash_is_empty() {
        assert_eq!(file_name_of("/foo/"), "");
    }
}
