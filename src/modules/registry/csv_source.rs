use std::path::Path;

use super::domain::RegistryRow;
use crate::log_info;
use crate::shared::errors::{AppError, AppResult};

/// Reads registry rows from a CSV export with WGS84 coordinate columns.
/// Column headers must match the `RegistryRow` field names. Rows that do
/// not even deserialize are dropped here with a count; semantic
/// validation happens later in the import service.
pub struct CsvRegistrySource;

impl CsvRegistrySource {
    pub fn load(path: &Path) -> AppResult<Vec<RegistryRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| {
                AppError::InvalidInput(format!("Cannot open {}: {}", path.display(), e))
            })?;

        let mut rows = Vec::new();
        let mut dropped = 0usize;

        for record in reader.deserialize::<RegistryRow>() {
            match record {
                Ok(row) => rows.push(row),
                Err(_) => dropped += 1,
            }
        }

        log_info!(
            "Loaded {} registry rows from {} ({} undecodable dropped)",
            rows.len(),
            path.display(),
            dropped
        );

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_rows_with_optional_fields() {
        let path = write_temp_csv(
            "placelink_csv_source_test.csv",
            "natural_key,name,latitude,longitude,opened_at\n\
             k-1,Blue Bottle Coffee,37.544,127.055,20240115\n\
             k-2,Onion,,,\n",
        );

        let rows = CsvRegistrySource::load(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].natural_key.as_deref(), Some("k-1"));
        assert_eq!(rows[0].latitude, Some(37.544));
        assert_eq!(rows[1].latitude, None);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let result = CsvRegistrySource::load(Path::new("/nonexistent/registry.csv"));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
