use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use super::operator::Operator;
use super::transport::CommandTransport;
use super::types::{Confirmation, EditorCommand, EditorError};

/// One exclusive editing session.
///
/// Every operation blocks until the editor answers. The session is driven by a
/// single owner through `&mut self`; nothing here is meant to be shared.
pub struct EditorSession<T: CommandTransport, O: Operator> {
    transport: T,
    operator: O,
    imported: bool,
    closed: bool,
}

impl<T: CommandTransport, O: Operator> EditorSession<T, O> {
    pub fn new(transport: T, operator: O) -> Self {
        Self {
            transport,
            operator,
            imported: false,
            closed: false,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[cfg(test)]
    pub fn operator(&self) -> &O {
        &self.operator
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn send(&mut self, command: EditorCommand) -> Result<Option<String>, EditorError> {
        if self.closed {
            return Err(EditorError::Closed);
        }
        let line = command.to_string();
        debug!(command = %line, "editor <-");
        let response = self.transport.send(&line)?;
        if let Some(text) = response.as_deref() {
            debug!(response = text, "editor ->");
        }
        Ok(response)
    }

    fn send_track_command(&mut self, command: EditorCommand) -> Result<(), EditorError> {
        if !self.imported {
            return Err(EditorError::NotImported);
        }
        self.send(command).map(|_| ())
    }

    /// Load the recording as the working project.
    ///
    /// Closes whatever project is open, waits `settle` for the editor to catch
    /// up, imports (by dialog when `recording` is `None`) and then blocks until
    /// the operator reports the recording is loaded.
    pub fn import_audio(
        &mut self,
        recording: Option<&Path>,
        settle: Duration,
    ) -> Result<Confirmation, EditorError> {
        if self.imported {
            return Err(EditorError::AlreadyImported);
        }

        self.send(EditorCommand::CloseProject)?;
        if !settle.is_zero() {
            thread::sleep(settle);
        }
        self.send(EditorCommand::Import(recording.map(Path::to_path_buf)))?;
        self.imported = true;

        let prompt = match recording {
            Some(path) => format!(
                "Importing {} into the editor, hit Enter once loaded: ",
                path.display()
            ),
            None => {
                "Please select the audio recording to import, hit Enter once loaded: ".to_string()
            }
        };
        let answer = self.prompt(&prompt)?;
        info!(?answer, "recording import acknowledged");
        Ok(answer)
    }

    pub fn select_range(&mut self, start_secs: u64, end_secs: u64) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::SelectRange {
            start_secs,
            end_secs,
        })
    }

    pub fn zoom_to_selection(&mut self) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::ZoomToSelection)
    }

    pub fn zoom_in(&mut self, count: u32) -> Result<(), EditorError> {
        for _ in 0..count {
            self.send_track_command(EditorCommand::ZoomIn)?;
        }
        Ok(())
    }

    pub fn move_cursor_to_selection_end(&mut self) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::CursorToSelectionEnd)
    }

    /// Block until the operator has placed the boundary (or asked to stop the run).
    pub fn await_human_boundary_confirmation(
        &mut self,
        prompt: &str,
    ) -> Result<Confirmation, EditorError> {
        if self.closed {
            return Err(EditorError::Closed);
        }
        self.prompt(prompt)
    }

    pub fn snap_selection_start_to_previous_boundary(&mut self) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::SnapToPreviousBoundary)
    }

    pub fn split_at_selection(&mut self) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::Split)
    }

    /// Ask the editor to write the selection to `path`.
    ///
    /// The editor does not report export failures reliably; callers check the
    /// file on disk afterwards.
    pub fn export_selection_as_audio(
        &mut self,
        path: &Path,
        channels: u16,
    ) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::Export {
            path: path.to_path_buf(),
            channels,
        })
    }

    pub fn delete_selection(&mut self) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::DeleteSelection)
    }

    pub fn realign_timeline_start(&mut self) -> Result<(), EditorError> {
        self.send_track_command(EditorCommand::AlignStartToZero)
    }

    /// Release the session. Safe to call more than once.
    pub fn close(&mut self) -> Result<(), EditorError> {
        if self.is_closed() {
            return Ok(());
        }
        self.closed = true;
        debug!("closing editor session");
        self.transport.shutdown()
    }

    fn prompt(&mut self, prompt: &str) -> Result<Confirmation, EditorError> {
        self.operator
            .acknowledge(prompt)
            .map_err(EditorError::Operator)
    }
}

impl<T: CommandTransport, O: Operator> Drop for EditorSession<T, O> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
