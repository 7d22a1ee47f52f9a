//! Factory-body extraction for module definitions.
//!
//! A `def` call's second argument is the module's factory function; its
//! source text is the module's actual code, so it gets its own raw and
//! compressed size metrics. The compression window is padded by one byte on
//! each side of the argument span so the enclosing call-argument delimiters
//! count toward the estimate; the padding is part of the size contract and
//! changing it changes every reported compressed size.

use std::io;

use tree_sitter::Node;

use super::classify::{is_function_expression, node_text};
use crate::compress;
use crate::stats::StatsRecord;

const SPAN_PADDING: usize = 1;

/// Attaches factory-body size metrics and source text to a `def` record.
///
/// A no-op unless at least two arguments are present and the second is a
/// recognized function expression.
pub(crate) fn extract_factory_content(
    source: &str,
    record: &mut StatsRecord,
    args: &[Node],
) -> io::Result<()> {
    if args.len() < 2 {
        return Ok(());
    }
    let factory = args[1];
    if !is_function_expression(&factory) {
        return Ok(());
    }

    let start = args[0].start_byte();
    let end = factory.end_byte();

    let (lo, hi) = padded_range(start, end, source.len());
    let padded = &source.as_bytes()[lo..hi];
    let gzip = compress::gzip_size(padded)?;
    let brotli = compress::brotli_size(padded)?;

    record.size = end.saturating_sub(start) + 2 * SPAN_PADDING;
    record.set_compressed_sizes(gzip, brotli);
    record.content = node_text(&factory, source).map(str::to_string);
    Ok(())
}

/// Widens `[start, end)` by one byte on each side, clamped to the text
/// bounds.
fn padded_range(start: usize, end: usize, len: usize) -> (usize, usize) {
    let lo = start.saturating_sub(SPAN_PADDING);
    let hi = (end + SPAN_PADDING).min(len);
    (lo, hi.max(lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range_widens_both_sides() {
        assert_eq!(padded_range(10, 20, 100), (9, 21));
    }

    #[test]
    fn test_padded_range_clamps_at_start() {
        assert_eq!(padded_range(0, 5, 100), (0, 6));
    }

    #[test]
    fn test_padded_range_clamps_at_end() {
        assert_eq!(padded_range(10, 20, 20), (9, 20));
    }

    #[test]
    fn test_padded_range_empty_text() {
        assert_eq!(padded_range(0, 0, 0), (0, 0));
    }
}
