//! # Common Utilities
//!
//! Line-oriented file helpers shared by every `LinePersist` implementation.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Open `path` for line-by-line reading.
pub fn read_lines(path: &Path) -> Result<LineReader> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open file {}", path.display()), e))?;
    Ok(LineReader {
        path: path.to_path_buf(),
        lines: BufReader::new(file).lines(),
        line_number: 0,
    })
}

/// Iterator over the lines of a file with line terminators stripped.
pub struct LineReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_number: usize,
}

impl LineReader {
    /// One-based number of the last line returned
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Iterator for LineReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line.map_err(|e| {
            Error::io(
                format!("Failed to read line {} of {}", self.line_number, self.path.display()),
                e,
            )
        }))
    }
}

/// Create or truncate `path` and write each item on its own line.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create file {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);

    let write_failed = |e| Error::io(format!("Failed to write file {}", path.display()), e);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).map_err(write_failed)?;
        writer.write_all(b"\n").map_err(write_failed)?;
    }
    writer.flush().map_err(write_failed)?;
    Ok(())
}
