//! Streaming engine script asset.
//!
//! The GRBL streaming engine is a Python script compiled into the binary
//! and materialized to a well-known temp path before the first launch.
//! Later passes reuse the extracted file if it still exists.

use penstream_core::constants::STREAM_SCRIPT_FILE_NAME;
use penstream_core::{PlotError, Result};
use std::path::PathBuf;

/// The embedded streaming engine.
pub(crate) const STREAM_SCRIPT: &str = include_str!("../assets/stream.py");

/// Well-known location the script is extracted to.
pub fn stream_script_path() -> PathBuf {
    std::env::temp_dir().join(STREAM_SCRIPT_FILE_NAME)
}

/// Materialize the streaming script, reusing a prior extraction.
pub fn materialize_stream_script() -> Result<PathBuf> {
    let path = stream_script_path();
    if path.exists() {
        return Ok(path);
    }

    std::fs::write(&path, STREAM_SCRIPT).map_err(|e| PlotError::AssetExtraction {
        reason: e.to_string(),
    })?;
    tracing::debug!("Stream script extracted to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Both tests touch the same well-known temp path.
    static EXTRACTION: Mutex<()> = Mutex::new(());

    #[test]
    fn test_materialize_writes_the_engine() {
        let _guard = EXTRACTION.lock().unwrap();

        let path = materialize_stream_script().unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("RX_BUFFER_SIZE"));
    }

    #[test]
    fn test_existing_extraction_is_reused() {
        let _guard = EXTRACTION.lock().unwrap();

        let path = materialize_stream_script().unwrap();
        std::fs::write(&path, "# marker").unwrap();

        let again = materialize_stream_script().unwrap();
        assert_eq!(again, path);
        assert_eq!(std::fs::read_to_string(&again).unwrap(), "# marker");

        // Restore the real engine for anything else using the temp path.
        std::fs::write(&path, STREAM_SCRIPT).unwrap();
    }
}
