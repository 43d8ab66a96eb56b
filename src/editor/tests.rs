use super::fake::{RecordingTransport, ScriptedOperator};
use super::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn imported_session() -> EditorSession<RecordingTransport, ScriptedOperator> {
    let mut session = EditorSession::new(
        RecordingTransport::default(),
        ScriptedOperator::confirming(),
    );
    session.import_audio(None, Duration::ZERO).unwrap();
    session
}

#[test]
fn commands_render_as_scripting_lines() {
    assert_eq!(EditorCommand::CloseProject.to_string(), "Close:");
    assert_eq!(EditorCommand::Import(None).to_string(), "ImportAudio:");
    assert_eq!(
        EditorCommand::Import(Some(PathBuf::from("/rec/mix.flac"))).to_string(),
        "Import2: Filename=\"/rec/mix.flac\""
    );
    assert_eq!(
        EditorCommand::SelectRange {
            start_secs: 0,
            end_secs: 185
        }
        .to_string(),
        "Select: Start=0 End=185"
    );
    assert_eq!(EditorCommand::ZoomToSelection.to_string(), "ZoomSel:");
    assert_eq!(EditorCommand::ZoomIn.to_string(), "ZoomIn:");
    assert_eq!(
        EditorCommand::CursorToSelectionEnd.to_string(),
        "SkipSelEnd:"
    );
    assert_eq!(
        EditorCommand::SnapToPreviousBoundary.to_string(),
        "SelPrevClipBoundaryToCursor:"
    );
    assert_eq!(EditorCommand::Split.to_string(), "Split:");
    assert_eq!(
        EditorCommand::Export {
            path: PathBuf::from("/out/my dir/song_one.wav"),
            channels: 2
        }
        .to_string(),
        "Export2: Filename=\"/out/my dir/song_one.wav\" NumChannels=2"
    );
    assert_eq!(EditorCommand::DeleteSelection.to_string(), "Delete:");
    assert_eq!(
        EditorCommand::AlignStartToZero.to_string(),
        "Align_StartToZero:"
    );
}

#[test]
fn quotes_inside_paths_are_escaped() {
    let cmd = EditorCommand::Import(Some(PathBuf::from("/rec/\"live\".wav")));
    assert_eq!(
        cmd.to_string(),
        "Import2: Filename=\"/rec/\\\"live\\\".wav\""
    );
}

#[test]
fn pipe_transport_frames_commands_and_reads_until_blank_line() {
    let reply = "Some detail\nBatchCommand finished: OK\n\nnext reply\n\n";
    let mut out: Vec<u8> = Vec::new();
    {
        let mut transport = PipeTransport::new(&mut out, Cursor::new(reply));
        let first = transport.send("ZoomSel:").unwrap();
        assert_eq!(
            first.as_deref(),
            Some("Some detail\nBatchCommand finished: OK")
        );
        let second = transport.send("Split:").unwrap();
        assert_eq!(second.as_deref(), Some("next reply"));
    }

    let written = String::from_utf8(out).unwrap();
    assert!(written.starts_with("ZoomSel:"));
    assert!(written.contains("Split:"));
    #[cfg(not(windows))]
    assert_eq!(written, "ZoomSel:\nSplit:\n");
}

#[test]
fn pipe_transport_returns_none_for_an_empty_reply() {
    let mut out: Vec<u8> = Vec::new();
    let mut transport = PipeTransport::new(&mut out, Cursor::new("\n"));
    assert_eq!(transport.send("Delete:").unwrap(), None);
}

#[test]
fn pipe_transport_failed_trailer_is_not_an_error() {
    let mut out: Vec<u8> = Vec::new();
    let mut transport =
        PipeTransport::new(&mut out, Cursor::new("BatchCommand finished: Failed!\n\n"));
    let reply = transport.send("Export2: Filename=\"/nope/x.wav\"").unwrap();
    assert_eq!(reply.as_deref(), Some("BatchCommand finished: Failed!"));
}

#[test]
fn pipe_transport_reports_closed_pipe_at_eof() {
    let mut out: Vec<u8> = Vec::new();
    let mut transport = PipeTransport::new(&mut out, Cursor::new(""));
    assert!(matches!(transport.send("Split:"), Err(EditorError::Closed)));
}

#[test]
fn connect_reports_missing_pipes_as_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let paths = PipePaths {
        to_editor: dir.path().join("to"),
        from_editor: dir.path().join("from"),
    };
    match PipeTransport::connect(&paths) {
        Err(EditorError::Unavailable { path, .. }) => assert_eq!(path, paths.to_editor),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("connecting to missing pipes should fail"),
    }
}

#[test]
fn console_operator_confirms_on_enter_and_aborts_on_token() {
    let mut output: Vec<u8> = Vec::new();
    let mut operator = ConsoleOperator::new(Cursor::new("\n q \nanything\n"), &mut output, "q");

    assert_eq!(
        operator.acknowledge("first? ").unwrap(),
        Confirmation::Confirmed
    );
    assert_eq!(
        operator.acknowledge("second? ").unwrap(),
        Confirmation::Abort
    );
    assert_eq!(
        operator.acknowledge("third? ").unwrap(),
        Confirmation::Confirmed
    );
    // Input exhausted.
    assert_eq!(
        operator.acknowledge("fourth? ").unwrap(),
        Confirmation::Abort
    );

    drop(operator);
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("first? "));
    assert!(shown.contains("fourth? "));
}

#[test]
fn console_operator_matches_a_padded_abort_token() {
    let mut output: Vec<u8> = Vec::new();
    let mut operator = ConsoleOperator::new(Cursor::new("stop\n"), &mut output, " stop \n");

    assert_eq!(
        operator.acknowledge("again? ").unwrap(),
        Confirmation::Abort
    );
}

#[test]
fn import_closes_project_then_imports_and_waits_for_operator() {
    let mut session = EditorSession::new(
        RecordingTransport::default(),
        ScriptedOperator::confirming(),
    );
    let answer = session
        .import_audio(Some(Path::new("/rec/mix.wav")), Duration::ZERO)
        .unwrap();

    assert_eq!(answer, Confirmation::Confirmed);
    assert_eq!(
        session.transport().commands,
        vec!["Close:", "Import2: Filename=\"/rec/mix.wav\""]
    );
    assert_eq!(session.operator().prompts.len(), 1);
    assert!(session.operator().prompts[0].contains("/rec/mix.wav"));
}

#[test]
fn import_is_allowed_only_once() {
    let mut session = imported_session();
    assert!(matches!(
        session.import_audio(None, Duration::ZERO),
        Err(EditorError::AlreadyImported)
    ));
}

#[test]
fn track_commands_require_an_imported_recording() {
    let mut session = EditorSession::new(
        RecordingTransport::default(),
        ScriptedOperator::confirming(),
    );
    assert!(matches!(session.select_range(0, 10), Err(EditorError::NotImported)));
    assert!(session.transport().commands.is_empty());
}

#[test]
fn zoom_in_repeats_the_command() {
    let mut session = imported_session();
    session.zoom_in(3).unwrap();
    let zooms = session
        .transport()
        .commands
        .iter()
        .filter(|c| *c == "ZoomIn:")
        .count();
    assert_eq!(zooms, 3);
}

#[test]
fn close_is_idempotent_and_blocks_further_commands() {
    let mut session = imported_session();
    session.close().unwrap();
    session.close().unwrap();
    assert!(session.is_closed());
    assert_eq!(session.transport().shutdowns, 1);
    assert!(matches!(session.split_at_selection(), Err(EditorError::Closed)));
    assert!(matches!(
        session.await_human_boundary_confirmation("?"),
        Err(EditorError::Closed)
    ));
}
