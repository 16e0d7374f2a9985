use crate::materialize::error::ExportError;
use log::info;
use std::io;
use std::path::Path;

pub async fn ensure_output_dir_exists(path: &Path) -> Result<(), ExportError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ExportError::OutputDirNotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| ExportError::OutputDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ExportError::OutputDirMetadata(path.to_path_buf(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[tokio::test]
    async fn test_creates_missing_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let nested = dir.path().join("exports").join("oahu");
        ensure_output_dir_exists(&nested).await?;
        assert!(nested.is_dir());
        // Second call is a no-op.
        ensure_output_dir_exists(&nested).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_file_in_place_of_directory() -> Result<(), Box<dyn std::error::Error>> {
        let file = NamedTempFile::new()?;
        let err = ensure_output_dir_exists(file.path()).await.unwrap_err();
        assert!(matches!(err, ExportError::OutputDirNotADirectory(_)));
        Ok(())
    }
}
