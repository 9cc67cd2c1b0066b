//! A decode source that reads already-decoded payloads, one per line.
//!
//! This is how rollcall attaches to a real camera: an external QR decoder
//! (for example `zbarcam --raw`) writes each decoded payload on its own line,
//! and rollcall reads them from stdin or from a file.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use super::{DecodeEvent, DecoderAdapter};
use crate::error::{Error, Result};

const ADAPTER_NAME: &str = "lines";

/// Where a [`LineDecoder`] reads payloads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSource {
    /// Standard input.
    Stdin,
    /// A file (or named pipe) on disk.
    File(PathBuf),
}

impl std::fmt::Display for LineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdin => write!(f, "<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads decoded payloads line by line and forwards them as decode events.
#[derive(Debug)]
pub struct LineDecoder {
    source: LineSource,
    skip_blank_lines: bool,
    task: Option<JoinHandle<()>>,
}

impl LineDecoder {
    /// Create a decoder for the given source.
    #[must_use]
    pub fn new(source: LineSource) -> Self {
        Self {
            source,
            skip_blank_lines: true,
            task: None,
        }
    }

    /// Set whether blank lines are dropped instead of forwarded.
    #[must_use]
    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// The configured source.
    #[must_use]
    pub fn source(&self) -> &LineSource {
        &self.source
    }

    /// Check if the reader task is still forwarding lines.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    async fn open(&self) -> Result<Box<dyn AsyncBufRead + Send + Unpin>> {
        match &self.source {
            LineSource::Stdin => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
            LineSource::File(path) => {
                let file = tokio::fs::File::open(path).await.map_err(|e| {
                    Error::camera_access(ADAPTER_NAME, format!("{}: {e}", path.display()))
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

#[async_trait::async_trait]
impl DecoderAdapter for LineDecoder {
    fn name(&self) -> &'static str {
        ADAPTER_NAME
    }

    async fn start(&mut self, tx: mpsc::Sender<DecodeEvent>) -> Result<()> {
        let reader = self.open().await?;
        debug!(source = %self.source, "Reading payloads");
        self.task = Some(tokio::spawn(forward_lines(
            reader,
            tx,
            self.skip_blank_lines,
        )));
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for LineDecoder {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn forward_lines(
    reader: Box<dyn AsyncBufRead + Send + Unpin>,
    tx: mpsc::Sender<DecodeEvent>,
    skip_blank_lines: bool,
) {
    let mut lines = reader.lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) if skip_blank_lines && line.trim().is_empty() => continue,
            Ok(Some(line)) => DecodeEvent::Decoded { data: line },
            Ok(None) => break,
            // The offending bytes are consumed; later lines are still readable.
            Err(e) if e.kind() == ErrorKind::InvalidData => DecodeEvent::Failed {
                message: e.to_string(),
            },
            Err(e) => {
                warn!(error = %e, "Payload source failed");
                break;
            }
        };

        if tx.send(event).await.is_err() {
            trace!("Scanner stopped, discarding remaining payloads");
            break;
        }
    }
    debug!("Payload source finished");
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    async fn collect(decoder: &mut LineDecoder) -> Vec<DecodeEvent> {
        let (tx, mut rx) = mpsc::channel(8);
        decoder.start(tx).await.unwrap();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    fn payload_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_lines_in_order() {
        let file = payload_file(b"first\nsecond\r\nthird");
        let mut decoder = LineDecoder::new(LineSource::File(file.path().to_path_buf()));

        let events = collect(&mut decoder).await;
        assert_eq!(
            events,
            vec![
                DecodeEvent::decoded("first"),
                DecodeEvent::decoded("second"),
                DecodeEvent::decoded("third"),
            ]
        );
    }

    #[tokio::test]
    async fn test_skips_blank_lines() {
        let file = payload_file(b"a\n\n   \nb\n");
        let mut decoder = LineDecoder::new(LineSource::File(file.path().to_path_buf()));

        let events = collect(&mut decoder).await;
        assert_eq!(
            events,
            vec![DecodeEvent::decoded("a"), DecodeEvent::decoded("b")]
        );
    }

    #[tokio::test]
    async fn test_keeps_blank_lines_when_configured() {
        let file = payload_file(b"a\n\nb\n");
        let mut decoder =
            LineDecoder::new(LineSource::File(file.path().to_path_buf())).skip_blank_lines(false);

        let events = collect(&mut decoder).await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], DecodeEvent::decoded(""));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_fails_and_reading_continues() {
        let file = payload_file(b"ok\n\xff\xfe\nafter\n");
        let mut decoder = LineDecoder::new(LineSource::File(file.path().to_path_buf()));

        let events = collect(&mut decoder).await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], DecodeEvent::decoded("ok"));
        assert!(matches!(events[1], DecodeEvent::Failed { .. }));
        assert_eq!(events[2], DecodeEvent::decoded("after"));
    }

    #[tokio::test]
    async fn test_missing_file_is_camera_access_error() {
        let mut decoder = LineDecoder::new(LineSource::File(PathBuf::from(
            "/nonexistent/rollcall/payloads.txt",
        )));
        let (tx, _rx) = mpsc::channel(1);

        let err = decoder.start(tx).await.unwrap_err();
        assert!(err.is_camera_access_error());
        assert!(!decoder.is_running());
    }

    #[tokio::test]
    async fn test_stop_aborts_reader() {
        let file = payload_file(b"a\nb\nc\n");
        let mut decoder = LineDecoder::new(LineSource::File(file.path().to_path_buf()));
        let (tx, _rx) = mpsc::channel(1);

        decoder.start(tx).await.unwrap();
        decoder.stop();
        assert!(!decoder.is_running());
    }

    #[test]
    fn test_line_source_display() {
        assert_eq!(LineSource::Stdin.to_string(), "<stdin>");
        assert_eq!(
            LineSource::File(PathBuf::from("/tmp/codes.txt")).to_string(),
            "/tmp/codes.txt"
        );
    }
}
