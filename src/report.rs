/// JSON run reports.
///
/// A report records where a run read from and wrote to, each copied file and
/// each entry that failed, so a collection can be audited afterwards.
use crate::collector::CollectReport;
use crate::error::CollectError;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Builds the JSON document describing a finished run.
pub fn to_json(source: &Path, destination: &Path, dry_run: bool, report: &CollectReport) -> Value {
    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "source": source.to_string_lossy(),
        "destination": destination.to_string_lossy(),
        "dry_run": dry_run,
        "skipped": report.skipped,
        "copied": report.copied.iter().map(|record| {
            json!({
                "source": record.source.to_string_lossy(),
                "destination": record.destination.to_string_lossy(),
                "kind": record.kind.to_string(),
                "bytes": record.bytes,
            })
        }).collect::<Vec<_>>(),
        "errors": report.errors.iter().map(|error| {
            json!({
                "path": error.path().to_string_lossy(),
                "stage": error.stage(),
                "error": error.to_string(),
            })
        }).collect::<Vec<_>>(),
    })
}

/// Writes the report for a finished run to `path`.
pub fn write_report(
    path: &Path,
    source: &Path,
    destination: &Path,
    dry_run: bool,
    report: &CollectReport,
) -> Result<(), CollectError> {
    let document = to_json(source, destination, dry_run, report);
    let json_string = serde_json::to_string_pretty(&document).map_err(|e| {
        CollectError::ReportWrite {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            ),
        }
    })?;

    fs::write(path, json_string).map_err(|source| CollectError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::CopyRecord;
    use crate::error::EntryError;
    use crate::signature::ImageKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_report() -> CollectReport {
        CollectReport {
            copied: vec![CopyRecord {
                source: PathBuf::from("/src/b.dat"),
                destination: PathBuf::from("/dst/b.png"),
                kind: ImageKind::Png,
                bytes: 8,
            }],
            errors: vec![EntryError::Read {
                path: PathBuf::from("/src/locked"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }],
            skipped: 3,
        }
    }

    #[test]
    fn test_report_contents() {
        let value = to_json(Path::new("/src"), Path::new("/dst"), false, &sample_report());

        assert_eq!(value["source"], "/src");
        assert_eq!(value["dry_run"], false);
        assert_eq!(value["skipped"], 3);
        assert_eq!(value["copied"][0]["destination"], "/dst/b.png");
        assert_eq!(value["copied"][0]["kind"], "PNG");
        assert_eq!(value["errors"][0]["path"], "/src/locked");
        assert_eq!(value["errors"][0]["stage"], "read");
        assert!(value["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_write_report() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("report.json");

        write_report(&path, Path::new("/src"), Path::new("/dst"), true, &sample_report())
            .expect("Failed to write report");

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["dry_run"], true);
        assert_eq!(parsed["copied"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_write_report_into_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing").join("report.json");

        let result = write_report(&path, Path::new("/src"), Path::new("/dst"), false, &sample_report());
        assert!(matches!(result, Err(CollectError::ReportWrite { .. })));
    }
}
