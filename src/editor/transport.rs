//! Named-pipe transport for Audacity's `mod-script-pipe`.
//!
//! Framing: every command is one line terminated by the platform EOL; the
//! editor answers with zero or more lines followed by an empty line. The last
//! response line is a `BatchCommand finished: OK|Failed!` trailer.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::EditorError;

#[cfg(windows)]
const EOL: &str = "\r\n\0";
#[cfg(not(windows))]
const EOL: &str = "\n";

const FAILED_TRAILER: &str = "Failed!";

/// Request/response channel to the editor.
pub trait CommandTransport {
    /// Send one command line and wait for the editor's reply.
    fn send(&mut self, command: &str) -> Result<Option<String>, EditorError>;

    /// Release the channel. Called once when the session closes.
    fn shutdown(&mut self) -> Result<(), EditorError> {
        Ok(())
    }
}

/// Locations of the command (to-editor) and reply (from-editor) pipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipePaths {
    pub to_editor: PathBuf,
    pub from_editor: PathBuf,
}

impl PipePaths {
    /// The pipe names `mod-script-pipe` creates for the current user.
    #[cfg(windows)]
    pub fn platform_default() -> Option<Self> {
        Some(Self {
            to_editor: PathBuf::from(r"\\.\pipe\ToSrvPipe"),
            from_editor: PathBuf::from(r"\\.\pipe\FromSrvPipe"),
        })
    }

    /// The pipe names `mod-script-pipe` creates for the current user.
    #[cfg(unix)]
    pub fn platform_default() -> Option<Self> {
        let uid = current_uid()?;
        Some(Self {
            to_editor: PathBuf::from(format!("/tmp/audacity_script_pipe.to.{uid}")),
            from_editor: PathBuf::from(format!("/tmp/audacity_script_pipe.from.{uid}")),
        })
    }

    #[cfg(not(any(unix, windows)))]
    pub fn platform_default() -> Option<Self> {
        None
    }
}

/// Owner uid of this process, read from `/proc/self` or, where that does not
/// exist, from the home directory.
#[cfg(unix)]
fn current_uid() -> Option<u32> {
    use std::os::unix::fs::MetadataExt;

    std::fs::metadata("/proc/self")
        .ok()
        .or_else(|| std::env::var_os("HOME").and_then(|home| std::fs::metadata(home).ok()))
        .map(|meta| meta.uid())
}

pub struct PipeTransport<W, R> {
    writer: W,
    reader: R,
}

impl PipeTransport<File, BufReader<File>> {
    /// Open both pipes. The command pipe is opened first, as the editor expects.
    pub fn connect(paths: &PipePaths) -> Result<Self, EditorError> {
        let writer = open_pipe(&paths.to_editor, true)?;
        let reader = open_pipe(&paths.from_editor, false)?;
        debug!(
            to = %paths.to_editor.display(),
            from = %paths.from_editor.display(),
            "connected to editor pipes"
        );
        Ok(Self::new(writer, BufReader::new(reader)))
    }
}

fn open_pipe(path: &Path, write: bool) -> Result<File, EditorError> {
    OpenOptions::new()
        .read(!write)
        .write(write)
        .open(path)
        .map_err(|source| EditorError::Unavailable {
            path: path.to_path_buf(),
            source,
        })
}

impl<W: Write, R: BufRead> PipeTransport<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }

    fn read_response(&mut self) -> Result<Option<String>, EditorError> {
        let mut lines: Vec<String> = Vec::new();
        let mut buf = String::new();

        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                if lines.is_empty() {
                    return Err(EditorError::Closed);
                }
                break;
            }

            let line = buf.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }

        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines.join("\n")))
        }
    }
}

impl<W: Write, R: BufRead> CommandTransport for PipeTransport<W, R> {
    fn send(&mut self, command: &str) -> Result<Option<String>, EditorError> {
        self.writer.write_all(command.as_bytes())?;
        self.writer.write_all(EOL.as_bytes())?;
        self.writer.flush()?;

        let response = self.read_response()?;
        if let Some(text) = response.as_deref() {
            if text.ends_with(FAILED_TRAILER) {
                warn!(command, response = text, "editor reported a failed command");
            }
        }
        Ok(response)
    }

    fn shutdown(&mut self) -> Result<(), EditorError> {
        self.writer.flush()?;
        Ok(())
    }
}
