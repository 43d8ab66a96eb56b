//! In-memory stand-ins for the editor and the operator.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;

use super::operator::Operator;
use super::transport::CommandTransport;
use super::types::{Confirmation, EditorError};

const EXPORT_PREFIX: &str = "Export2: Filename=\"";

/// Records every command. When `materialize_exports` is on, it also writes the
/// file named by each export command, like the real editor would.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub commands: Vec<String>,
    pub materialize_exports: bool,
    /// Exports whose path contains one of these are silently dropped.
    pub failing_exports: Vec<String>,
    /// Bytes written for each materialized export.
    pub export_contents: Vec<u8>,
    pub shutdowns: usize,
}

impl RecordingTransport {
    pub fn materializing() -> Self {
        Self {
            materialize_exports: true,
            export_contents: b"exported".to_vec(),
            ..Self::default()
        }
    }

    pub fn writing(mut self, contents: Vec<u8>) -> Self {
        self.export_contents = contents;
        self
    }

    pub fn failing(mut self, fragment: &str) -> Self {
        self.failing_exports.push(fragment.to_string());
        self
    }

    pub fn exported_paths(&self) -> Vec<PathBuf> {
        self.commands
            .iter()
            .filter_map(|c| export_path(c))
            .collect()
    }
}

fn export_path(command: &str) -> Option<PathBuf> {
    let rest = command.strip_prefix(EXPORT_PREFIX)?;
    let end = rest.find('"')?;
    Some(PathBuf::from(&rest[..end]))
}

impl CommandTransport for RecordingTransport {
    fn send(&mut self, command: &str) -> Result<Option<String>, EditorError> {
        self.commands.push(command.to_string());

        if self.materialize_exports {
            if let Some(path) = export_path(command) {
                let path_str = path.display().to_string();
                let fails = self.failing_exports.iter().any(|f| path_str.contains(f));
                if !fails {
                    fs::write(&path, &self.export_contents)?;
                }
            }
        }

        Ok(Some("BatchCommand finished: OK".to_string()))
    }

    fn shutdown(&mut self) -> Result<(), EditorError> {
        self.shutdowns += 1;
        Ok(())
    }
}

/// Replays canned answers; confirms once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<Confirmation>,
    pub prompts: Vec<String>,
}

impl ScriptedOperator {
    pub fn new(answers: impl IntoIterator<Item = Confirmation>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    pub fn confirming() -> Self {
        Self::default()
    }
}

impl Operator for ScriptedOperator {
    fn acknowledge(&mut self, prompt: &str) -> io::Result<Confirmation> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or(Confirmation::Confirmed))
    }
}
