//! Manifest output.
//!
//! Serializes an analysis record collection as a pretty-printed JSON array,
//! either to an arbitrary writer or to a destination file. The destination
//! is always an explicit parameter; the conventional manifest name lives
//! here so the CLI and tests agree on it.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::stats::StatsRecord;

/// Conventional manifest file name, resolved against the working directory
/// unless the caller picks another destination.
pub const MANIFEST_FILE_NAME: &str = "lasso-stats.json";

/// Returns `<cwd>/lasso-stats.json`.
pub fn default_manifest_path() -> io::Result<PathBuf> {
    Ok(env::current_dir()?.join(MANIFEST_FILE_NAME))
}

/// Write the record collection as pretty-printed JSON.
pub fn write_manifest<W: Write>(records: &[StatsRecord], writer: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Write the manifest to `path`, overwriting any existing file.
pub fn write_manifest_file(records: &[StatsRecord], path: &Path) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    write_manifest(records, &mut file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<StatsRecord> {
        let mut bundle = StatsRecord::new();
        bundle.package_name = Some("BundleSize".to_string());
        bundle.file_name = Some("program".to_string());
        bundle.size = 120;
        bundle.set_compressed_sizes(80, 70);

        let mut def = StatsRecord::new();
        def.kind = Some("def".to_string());
        def.path = Some("/foo/bar.js".to_string());
        def.size = 57;

        vec![bundle, def]
    }

    #[test]
    fn test_manifest_is_a_json_array_in_order() {
        let mut output = Vec::new();
        write_manifest(&sample_records(), &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["packageName"], "BundleSize");
        assert_eq!(array[1]["type"], "def");
    }

    #[test]
    fn test_manifest_is_pretty_printed() {
        let mut output = Vec::new();
        write_manifest(&sample_records(), &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        assert!(json_str.contains('\n'));
        assert!(json_str.contains("  \"packageName\""));
    }

    #[test]
    fn test_write_manifest_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join(MANIFEST_FILE_NAME);

        fs::write(&dest, "stale contents").unwrap();
        write_manifest_file(&sample_records(), &dest).unwrap();

        let written = fs::read_to_string(&dest).unwrap();
        let parsed: Vec<StatsRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample_records());
    }

    #[test]
    fn test_default_manifest_path_uses_cwd() {
        let path = default_manifest_path().unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(MANIFEST_FILE_NAME)
        );
    }
}
