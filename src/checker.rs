//! Validation engine - orchestrates ingestion, scanning, and lifecycle
//!
//! A [`SyntaxChecker`] owns one source, one scan buffer, and one background
//! worker task. `validate` runs synchronously on the calling task: it refills
//! the buffer from the source, scans it with a fresh delegate per configured
//! policy, aggregates the results in configuration order, and clears the
//! buffer. The worker performs no productive work in this baseline: it idles
//! parked on a stop channel as an extension point for incremental ingestion,
//! and exits when `stop` signals it (or when the checker is dropped).

use std::path::PathBuf;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::io::AsyncRead;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;

use crate::buffer::ScanBuffer;
use crate::error::{CheckError, Result};
use crate::policy::{PolicyFactory, PolicyRegistry, PolicyTag};
use crate::result::RunResult;
use crate::source::{CharSource, SourceMode};

/// Lifecycle state of a checker instance
///
/// `Initializing` doubles as the idle state between runs: `Processing` means a
/// run is in flight right now, and the instance returns to `Initializing` when
/// the run completes. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed and ready to accept a validation run
    Initializing,
    /// A validation run is in flight
    Processing,
    /// Stopped by an explicit stop request; terminal
    Stopped,
}

impl State {
    const fn as_u8(self) -> u8 {
        match self {
            State::Initializing => 0,
            State::Processing => 1,
            State::Stopped => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => State::Initializing,
            1 => State::Processing,
            _ => State::Stopped,
        }
    }
}

/// The shared mutable pair guarded as one unit: ingestion appends to the
/// buffer, scans iterate it, and the engine clears it, all under one lock.
struct Inner {
    source: CharSource,
    buffer: ScanBuffer,
}

/// Validates a character source against its configured policies
///
/// Each instance is independent: the buffer, source, lifecycle state, and
/// worker task are all per-instance. `validate` calls on the same instance are
/// serialized by the buffer lock; overlapping calls are rejected rather than
/// queued.
pub struct SyntaxChecker {
    inner: Mutex<Inner>,
    policies: Vec<(PolicyTag, PolicyFactory)>,
    state: AtomicU8,
    stop_tx: StdMutex<Option<oneshot::Sender<()>>>,
    worker: JoinHandle<()>,
}

impl SyntaxChecker {
    /// Create a checker over a literal string or a file path.
    ///
    /// `source` is the literal text in [`SourceMode::Literal`] mode, or the
    /// file path in [`SourceMode::File`] mode. Must be called within a tokio
    /// runtime; construction spawns the background worker.
    ///
    /// Fails with [`CheckError::InvalidArgument`] if `source` is empty, if
    /// `mode` is [`SourceMode::Pipe`] (use [`SyntaxChecker::from_pipe`]), or
    /// if `tags` is empty.
    pub fn new(mode: SourceMode, tags: &[PolicyTag], source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        if source.is_empty() {
            return Err(CheckError::InvalidArgument(
                "source cannot be empty".to_string(),
            ));
        }
        let source = match mode {
            SourceMode::Literal => CharSource::Literal(source),
            SourceMode::File => CharSource::Path(PathBuf::from(source)),
            SourceMode::Pipe => {
                return Err(CheckError::InvalidArgument(
                    "pipe mode requires a reader; use SyntaxChecker::from_pipe".to_string(),
                ));
            }
        };
        Self::build(source, tags)
    }

    /// Create a checker over a piped reader ([`SourceMode::Pipe`]).
    ///
    /// The reader is drained to end-of-stream on the first `validate` and is
    /// not rewindable: subsequent runs see an empty ingest (a valid empty
    /// scan, not an error). Must be called within a tokio runtime.
    ///
    /// Fails with [`CheckError::InvalidArgument`] if `tags` is empty.
    pub fn from_pipe(
        tags: &[PolicyTag],
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Result<Self> {
        Self::build(CharSource::Pipe(Box::new(reader)), tags)
    }

    fn build(source: CharSource, tags: &[PolicyTag]) -> Result<Self> {
        if tags.is_empty() {
            return Err(CheckError::InvalidArgument(
                "at least one validation policy is required".to_string(),
            ));
        }

        // fail fast: resolve every tag before any run can start
        let registry = PolicyRegistry::default();
        let mut policies = Vec::with_capacity(tags.len());
        for &tag in tags {
            policies.push((tag, registry.resolve(tag)?));
        }

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let worker = tokio::spawn(async move {
            // parked, not spinning; a dropped sender also wakes us
            let _ = stop_rx.await;
            tracing::debug!("background worker exiting");
        });

        Ok(Self {
            inner: Mutex::new(Inner {
                source,
                buffer: ScanBuffer::new(),
            }),
            policies,
            state: AtomicU8::new(State::Initializing.as_u8()),
            stop_tx: StdMutex::new(Some(stop_tx)),
            worker,
        })
    }

    /// Run one validation: refill the buffer from the source, scan it with a
    /// fresh delegate per configured policy, and aggregate the results in
    /// configuration order. The buffer is cleared before returning, so the
    /// scanned text cannot be inspected afterwards.
    ///
    /// Fails with [`CheckError::Stopped`] after [`SyntaxChecker::stop`], with
    /// [`CheckError::InProgress`] while another caller's run is mid-flight,
    /// and with [`CheckError::Io`] when reading the source fails.
    pub async fn validate(&self) -> Result<RunResult> {
        if self.state() == State::Stopped {
            return Err(CheckError::Stopped);
        }

        // the buffer lock is the reentrancy guard: holding it means a run is
        // genuinely in flight on another caller
        let mut inner = self.inner.try_lock().map_err(|_| CheckError::InProgress)?;

        // enter by CAS: `Processing` is only ever set under the lock, so a
        // failure here means a stop landed after the check above and the
        // instance must stay terminal
        if self
            .state
            .compare_exchange(
                State::Initializing.as_u8(),
                State::Processing.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            return Err(CheckError::Stopped);
        }
        tracing::debug!(mode = %inner.source.mode(), "validation run started");

        let outcome = Self::run(&self.policies, &mut inner).await;

        // a stop that landed mid-run stays terminal
        let _ = self.state.compare_exchange(
            State::Processing.as_u8(),
            State::Initializing.as_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        outcome
    }

    async fn run(policies: &[(PolicyTag, PolicyFactory)], inner: &mut Inner) -> Result<RunResult> {
        let Inner { source, buffer } = inner;
        if let Err(err) = source.fill(buffer).await {
            // a partial ingest must not leak into the next run
            buffer.clear();
            return Err(err);
        }

        let mode = source.mode();
        let mut result = RunResult::new();
        for &(tag, factory) in policies {
            let mut delegate = factory();
            let policy_result = delegate.scan(buffer, mode);
            tracing::debug!(
                %tag,
                verdict = %policy_result.verdict(),
                chars = policy_result.chars_scanned(),
                "policy scan complete"
            );
            result.push(policy_result);
        }

        buffer.clear();
        Ok(result)
    }

    /// Signal the background worker to exit and mark the instance stopped.
    ///
    /// Does not abort a run already in flight; it only rejects future calls.
    /// Fails with [`CheckError::Stopped`] if the instance is already stopped.
    pub fn stop(&self) -> Result<()> {
        let previous = self.state.swap(State::Stopped.as_u8(), Ordering::SeqCst);
        if previous == State::Stopped.as_u8() {
            return Err(CheckError::Stopped);
        }

        let sender = self
            .stop_tx
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(tx) = sender {
            let _ = tx.send(());
        }
        tracing::debug!("checker stopped");
        Ok(())
    }

    /// Current lifecycle state; never blocks, never fails
    pub fn state(&self) -> State {
        State::from_u8(self.state.load(Ordering::SeqCst))
    }
}

impl Drop for SyntaxChecker {
    fn drop(&mut self) {
        // dropping the sender wakes a parked worker; abort covers one that
        // has not been polled yet
        self.worker.abort();
    }
}
