//! Quorum validation across independent coupon files.
//!
//! Every configured file is scanned concurrently. The first two "found" votes
//! decide the code is valid and the remaining scans are cancelled rather than
//! awaited, so latency is bounded by the two fastest files. A file that cannot
//! be read simply loses its vote.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::{PromoError, ScanError};
use crate::scanner::{CodeScanner, FileScanner};

/// Number of coupon files that must contain a code for it to be valid.
pub const QUORUM: usize = 2;

/// Decides whether a (well-formed) coupon code exists.
#[async_trait]
pub trait PromoValidator: Send + Sync {
    async fn validate(&self, code: &str, cancel: &CancellationToken) -> Result<bool, PromoError>;
}

#[async_trait]
impl<V> PromoValidator for Arc<V>
where
    V: PromoValidator + ?Sized,
{
    async fn validate(&self, code: &str, cancel: &CancellationToken) -> Result<bool, PromoError> {
        (**self).validate(code, cancel).await
    }
}

/// Fan-out validator over a fixed set of coupon files.
///
/// The path list is set at construction and never changes, so concurrent
/// validations share it without locking. Nothing is cached between calls.
#[derive(Debug)]
pub struct QuorumPromoValidator<S = FileScanner> {
    scanner: Arc<S>,
    files: Arc<[PathBuf]>,
    timeout: Option<Duration>,
}

impl<S> Clone for QuorumPromoValidator<S> {
    fn clone(&self) -> Self {
        Self {
            scanner: Arc::clone(&self.scanner),
            files: Arc::clone(&self.files),
            timeout: self.timeout,
        }
    }
}

impl QuorumPromoValidator<FileScanner> {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_scanner(files, FileScanner::new())
    }
}

impl<S: CodeScanner> QuorumPromoValidator<S> {
    pub fn with_scanner<I, P>(files: I, scanner: S) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            scanner: Arc::new(scanner),
            files: files.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    /// Fail with [`PromoError::DeadlineExceeded`] if no decision is reached in
    /// `timeout`. `None` waits for as long as the scans take.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Check that each coupon file can be stat'ed, logging the outcome.
    ///
    /// Returns the number of accessible files. Inaccessible files are not an
    /// error here; they just lose their vote when scanned.
    pub async fn probe_sources(&self) -> usize {
        let mut ready = 0;
        for (index, path) in self.files.iter().enumerate() {
            match tokio::fs::metadata(path).await {
                Ok(meta) => {
                    ready += 1;
                    tracing::info!(
                        file = index + 1,
                        path = %path.display(),
                        bytes = meta.len(),
                        "coupon file ready"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        file = index + 1,
                        path = %path.display(),
                        error = %e,
                        "coupon file not accessible"
                    );
                }
            }
        }
        if ready < QUORUM {
            tracing::warn!(
                ready,
                required = QUORUM,
                "not enough coupon files accessible to ever reach quorum"
            );
        }
        ready
    }

    /// Scan every file for `code` and apply the quorum rule.
    ///
    /// Cancelling `cancel` (or dropping the returned future) cancels all
    /// in-flight scans.
    pub async fn validate_code(
        &self,
        code: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, PromoError> {
        if self.files.len() < QUORUM {
            return Err(PromoError::Config {
                required: QUORUM,
                configured: self.files.len(),
            });
        }

        let scans = cancel.child_token();
        let _cancel_scans_on_drop = scans.clone().drop_guard();

        let code: Arc<str> = Arc::from(code);
        let mut tasks = JoinSet::new();
        for (index, path) in self.files.iter().enumerate() {
            let scanner = Arc::clone(&self.scanner);
            let path = path.clone();
            let code = Arc::clone(&code);
            let token = scans.clone();
            tasks.spawn(async move {
                let result = scanner.scan(&path, &code, &token).await;
                (index, path, result)
            });
        }

        let timeout = self.timeout;
        let deadline = async move {
            match timeout {
                Some(limit) => {
                    tokio::time::sleep(limit).await;
                    limit
                }
                None => std::future::pending().await,
            }
        };
        tokio::pin!(deadline);

        let mut pending = self.files.len();
        let mut votes = 0usize;
        let outcome = loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break Err(PromoError::Cancelled),

                limit = &mut deadline => break Err(PromoError::DeadlineExceeded { timeout: limit }),

                joined = tasks.join_next() => {
                    let Some(joined) = joined else {
                        break Ok(votes >= QUORUM);
                    };
                    pending -= 1;

                    match joined {
                        Ok((index, path, Ok(true))) => {
                            votes += 1;
                            tracing::debug!(
                                file = index + 1,
                                path = %path.display(),
                                votes,
                                "coupon vote"
                            );
                        }
                        Ok((_, _, Ok(false))) => {}
                        Ok((_, _, Err(e @ ScanError::Cancelled { .. }))) => {
                            tracing::debug!(error = %e, "coupon scan stopped");
                        }
                        Ok((index, _, Err(e))) => {
                            tracing::warn!(
                                file = index + 1,
                                error = %e,
                                "coupon file scan failed; counting as no vote"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                "coupon scan task failed; counting as no vote"
                            );
                        }
                    }

                    if votes >= QUORUM {
                        break Ok(true);
                    }
                    if votes + pending < QUORUM {
                        // The remaining files cannot reach quorum any more.
                        break Ok(false);
                    }
                }
            }
        };

        // Stragglers observe the token and stop on their own; nobody waits for them.
        scans.cancel();
        tasks.detach_all();

        match &outcome {
            Ok(valid) => tracing::debug!(valid, votes, "promo code quorum decided"),
            Err(e) => tracing::debug!(error = %e, votes, "promo code quorum undecided"),
        }
        outcome
    }
}

#[async_trait]
impl<S: CodeScanner> PromoValidator for QuorumPromoValidator<S> {
    async fn validate(&self, code: &str, cancel: &CancellationToken) -> Result<bool, PromoError> {
        self.validate_code(code, cancel).await
    }
}
