//! Per-unit statistics records.
//!
//! This module defines [`StatsRecord`], the unit of output for bundle
//! analysis. One record describes one module-like unit found in a bundle
//! (a module definition, an installed dependency, a remap, ...) together
//! with its size metrics. The first record of every analysis describes the
//! bundle as a whole.

use serde::{Deserialize, Serialize};

/// Package name carried by the whole-bundle record.
pub const BUNDLE_PACKAGE_NAME: &str = "BundleSize";

/// One entry in the analysis output.
///
/// Fields are populated incrementally during the traversal pass:
/// classification first, then literal extraction, then (for module
/// definitions) factory-body extraction. Unpopulated fields are omitted
/// from the serialized JSON.
///
/// # Example
///
/// ```
/// use lassoscope::stats::StatsRecord;
///
/// let mut record = StatsRecord::new();
/// record.kind = Some("def".to_string());
/// record.size = 42;
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["type"], "def");
/// assert!(json.get("packageName").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    /// Logical package or module group this unit belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    /// File-level name within the package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Module path/specifier as declared in the bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Classification tag: the loader method name this call invokes
    /// (`installed`, `def`, `main`, `remap`, `builtin`, `run`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Raw byte length of the corresponding source span.
    pub size: usize,

    /// Compressed size under gzip, when computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gzip_size: Option<usize>,

    /// Compressed size under brotli, when computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brotli_size: Option<usize>,

    /// Verbatim source text of a module's factory function, only present
    /// for `def` records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StatsRecord {
    /// Creates an empty record with `size = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches both compressed-size metrics at once.
    ///
    /// The two fields always travel together: they are computed from the
    /// same byte span in the same step.
    pub fn set_compressed_sizes(&mut self, gzip: usize, brotli: usize) {
        self.gzip_size = Some(gzip);
        self.brotli_size = Some(brotli);
    }

    /// Returns true if this record describes the bundle as a whole.
    pub fn is_bundle_total(&self) -> bool {
        self.package_name.as_deref() == Some(BUNDLE_PACKAGE_NAME)
    }
}

/// Format a byte size as a human-readable string.
///
/// # Example
///
/// ```
/// use lassoscope::stats::format_size;
///
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1048576), "1.00 MB");
/// ```
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
