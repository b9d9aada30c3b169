//! Lyrics file export.

use std::path::PathBuf;

use sur_core::error::Result;
use sur_core::export::export_file_name;

use crate::storage::write_atomic;

/// Writes lyrics as plain-text files into a directory.
#[derive(Debug, Clone)]
pub struct LyricsExporter {
    directory: PathBuf,
}

impl LyricsExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Writes `lyrics` to `<directory>/<Title>_Lyrics.txt`, replacing any
    /// previous export of the same title.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn export(&self, title: &str, lyrics: &str) -> Result<PathBuf> {
        let path = self.directory.join(export_file_name(title));
        write_atomic(&path, lyrics.as_bytes())?;
        tracing::info!(path = %path.display(), "Exported lyrics");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = LyricsExporter::new(temp_dir.path());

        let path = exporter.export("Mo Prema", "ଗୀତ\n[Chorus]").unwrap();

        assert_eq!(path, temp_dir.path().join("Mo_Prema_Lyrics.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ଗୀତ\n[Chorus]");
    }

    #[test]
    fn test_export_stays_inside_directory() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = LyricsExporter::new(temp_dir.path().join("out"));

        let path = exporter.export("../../escape", "x").unwrap();

        assert!(path.starts_with(temp_dir.path().join("out")));
    }
}
