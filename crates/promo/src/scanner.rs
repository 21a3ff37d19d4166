//! Line-oriented coupon file scanning.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio_stream::StreamExt;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tokio_util::sync::CancellationToken;

use crate::error::ScanError;

/// How many lines a scan reads between checks of its cancellation token.
pub const CANCEL_CHECK_INTERVAL: usize = 10_000;

/// Longest line a coupon file may contain. A longer line fails the scan.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Bytes a scan may consume before checking its token, however few lines that is.
const CANCEL_CHECK_BYTES: usize = MAX_LINE_BYTES;

const READ_BUFFER_BYTES: usize = 64 * 1024;

/// Searches one coupon source for an exact code.
#[async_trait]
pub trait CodeScanner: Send + Sync + 'static {
    /// `Ok(true)` when some line of `path`, trimmed, equals `code`.
    ///
    /// Implementations must return as soon as a match is found and must honor
    /// `cancel` at bounded intervals, returning [`ScanError::Cancelled`].
    async fn scan(
        &self,
        path: &Path,
        code: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, ScanError>;
}

/// Scans coupon files on disk, reopening the file on every call.
#[derive(Debug, Clone)]
pub struct FileScanner {
    check_interval: usize,
}

impl FileScanner {
    pub fn new() -> Self {
        Self {
            check_interval: CANCEL_CHECK_INTERVAL,
        }
    }

    /// Check the cancellation token every `lines` lines (minimum 1).
    pub fn with_check_interval(mut self, lines: usize) -> Self {
        self.check_interval = lines.max(1);
        self
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeScanner for FileScanner {
    async fn scan(
        &self,
        path: &Path,
        code: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, ScanError> {
        let file = File::open(path)
            .await
            .map_err(|e| ScanError::io(path, e))?;
        let mut lines = FramedRead::with_capacity(
            file,
            LinesCodec::new_with_max_length(MAX_LINE_BYTES),
            READ_BUFFER_BYTES,
        );

        let mut line_no: usize = 0;
        let mut unchecked_bytes: usize = 0;
        loop {
            if line_no % self.check_interval == 0 || unchecked_bytes >= CANCEL_CHECK_BYTES {
                unchecked_bytes = 0;
                if cancel.is_cancelled() {
                    tracing::debug!(path = %path.display(), line_no, "coupon scan cancelled");
                    return Err(ScanError::Cancelled {
                        path: path.to_path_buf(),
                    });
                }
            }

            // Invalid UTF-8 surfaces here as `InvalidData`, which is a hard error.
            let line = match lines.next().await {
                Some(Ok(line)) => line,
                None => return Ok(false),
                Some(Err(e)) => return Err(ScanError::io(path, line_error(e))),
            };

            if line.trim() == code {
                tracing::debug!(path = %path.display(), line_no, "coupon code found");
                return Ok(true);
            }

            unchecked_bytes += line.len() + 1;
            line_no += 1;
        }
    }
}

fn line_error(err: LinesCodecError) -> std::io::Error {
    match err {
        LinesCodecError::MaxLineLengthExceeded => std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("line longer than {MAX_LINE_BYTES} bytes"),
        ),
        LinesCodecError::Io(e) => e,
    }
}
