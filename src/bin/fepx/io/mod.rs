use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Destination of the DDG table.
pub enum TableSink<'a> {
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
    Stdout(&'a mut dyn Write),
}

impl<'a> TableSink<'a> {
    /// Creates the output file, or writes to `stdout` when `path` is `None`.
    ///
    /// Called only once all rows are computed, so a failed run never leaves a
    /// truncated table behind.
    pub fn open(path: Option<&Path>, stdout: &'a mut dyn Write) -> Result<Self> {
        match path {
            Some(p) => {
                let file = File::create(p)
                    .with_context(|| format!("Failed to create output file: {}", p.display()))?;
                Ok(Self::File {
                    path: p.to_path_buf(),
                    writer: BufWriter::new(file),
                })
            }
            None => Ok(Self::Stdout(stdout)),
        }
    }

    /// Short label for progress output.
    pub fn label(&self) -> String {
        match self {
            Self::File { path, .. } => path
                .file_name()
                .unwrap_or(path.as_os_str())
                .to_string_lossy()
                .into_owned(),
            Self::Stdout(_) => "stdout".to_string(),
        }
    }
}

impl Write for TableSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File { writer, .. } => writer.write(buf),
            Self::Stdout(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File { writer, .. } => writer.flush(),
            Self::Stdout(writer) => writer.flush(),
        }
    }
}
