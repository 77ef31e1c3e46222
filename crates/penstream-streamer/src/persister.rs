//! G-code artifact persistence.
//!
//! One artifact per successful run, named by the local timestamp at
//! second granularity. The first line is the provenance comment; every
//! command follows verbatim on its own line, in input order, with no
//! trimming, reordering, or deduplication.

use chrono::Local;
use penstream_core::constants::{GCODE_EXTENSION, PROVENANCE_COMMENT};
use penstream_core::{GcodeArtifact, PlotError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `commands` to a fresh timestamped file under `directory`.
///
/// Two runs in the same clock second produce two files: the second gets a
/// numeric suffix instead of overwriting the first.
pub fn persist(commands: &[String], directory: &Path) -> Result<GcodeArtifact> {
    let created_at = Local::now();
    let stamp = created_at.format("%Y%m%d%H%M%S").to_string();

    let (mut file, file_path) = open_unique(directory, &stamp)
        .map_err(|e| PlotError::Persistence {
            reason: e.to_string(),
        })?;

    write_lines(&mut file, commands).map_err(|e| PlotError::Persistence {
        reason: e.to_string(),
    })?;

    tracing::info!("G-code written to {}", file_path.display());
    Ok(GcodeArtifact {
        file_path,
        created_at,
    })
}

fn write_lines(file: &mut File, commands: &[String]) -> io::Result<()> {
    writeln!(file, "{}", PROVENANCE_COMMENT)?;
    for command in commands {
        writeln!(file, "{}", command)?;
    }
    file.flush()
}

/// Create the first of `<stamp>.gcode`, `<stamp>-1.gcode`, ... that does
/// not already exist.
fn open_unique(directory: &Path, stamp: &str) -> io::Result<(File, PathBuf)> {
    let mut attempt: u32 = 0;
    loop {
        let name = if attempt == 0 {
            format!("{}.{}", stamp, GCODE_EXTENSION)
        } else {
            format!("{}-{}.{}", stamp, attempt, GCODE_EXTENSION)
        };
        let path = directory.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}
