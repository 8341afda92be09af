//! Submission lifecycle for a single analysis request.
//!
//! A `SubmissionController` owns one observable `SubmissionState`. Each
//! accepted `submit` moves the state to `Loading` immediately and hands back a
//! `PendingSubmission` that performs the network exchange when resolved.
//!
//! Submissions are numbered. When a pending submission resolves, its outcome
//! is applied only if it is still the latest one issued, so a slow earlier
//! request can never overwrite a later submission's result. Once the
//! controller is dropped, outstanding submissions resolve without touching
//! state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, InvalidInputError};
use crate::http_client::AnalysisTransport;
use crate::models::{AnalysisInput, AnalysisResult};
use crate::services::normalize::normalize;

/// Observable lifecycle of the controller's current submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Succeeded(Arc<AnalysisResult>),
    Failed(AnalysisError),
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// What happened to a pending submission's outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The outcome became the controller's state.
    Applied(SubmissionState),
    /// A later submission was issued first; the outcome was discarded.
    Superseded,
    /// The controller was disposed; the outcome was discarded.
    Disposed,
}

struct Shared {
    state: watch::Sender<SubmissionState>,
    latest: AtomicU64,
}

/// Drives analysis submissions and exposes their state.
pub struct SubmissionController<T: ?Sized> {
    shared: Arc<Shared>,
    transport: Arc<T>,
}

impl<T: AnalysisTransport + ?Sized> SubmissionController<T> {
    pub fn new(transport: Arc<T>) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            shared: Arc::new(Shared {
                state,
                latest: AtomicU64::new(0),
            }),
            transport,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.shared.state.borrow().clone()
    }

    /// Watch state transitions. Each observed value is a complete state.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.state.subscribe()
    }

    /// Sequence number of the most recently accepted submission (0 if none).
    pub fn latest_sequence(&self) -> u64 {
        self.shared.latest.load(Ordering::SeqCst)
    }

    /// Accept a submission and move to `Loading`.
    ///
    /// Empty input is rejected without touching state. Any submission still
    /// in flight is superseded.
    pub fn submit(&self, input: AnalysisInput) -> Result<PendingSubmission<T>, InvalidInputError> {
        if let Err(err) = input.validate() {
            debug!("Rejected submission: {}", err);
            return Err(err);
        }

        let mut sequence = 0;
        self.shared.state.send_modify(|state| {
            sequence = self.shared.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SubmissionState::Loading;
        });
        info!("Submission #{} accepted: {}", sequence, input.describe());

        Ok(PendingSubmission {
            sequence,
            input,
            transport: Arc::clone(&self.transport),
            shared: Arc::downgrade(&self.shared),
        })
    }

    /// Submit and resolve in one step, returning the state afterwards.
    pub async fn submit_and_wait(
        &self,
        input: AnalysisInput,
    ) -> Result<SubmissionState, InvalidInputError> {
        let pending = self.submit(input)?;
        pending.resolve().await;
        Ok(self.state())
    }

    /// Dispose of the controller. Outstanding submissions resolve as `Disposed`.
    pub fn dispose(self) {}
}

impl<T: ?Sized> Drop for SubmissionController<T> {
    fn drop(&mut self) {
        debug!(
            "Submission controller disposed after #{}",
            self.shared.latest.load(Ordering::SeqCst)
        );
    }
}

/// An accepted submission whose request has not completed yet.
#[must_use = "a pending submission sends nothing until resolved"]
pub struct PendingSubmission<T: ?Sized> {
    sequence: u64,
    input: AnalysisInput,
    transport: Arc<T>,
    shared: Weak<Shared>,
}

impl<T: AnalysisTransport + ?Sized> PendingSubmission<T> {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn input(&self) -> &AnalysisInput {
        &self.input
    }

    /// Send the request, normalize the response, and apply the outcome if
    /// this is still the latest submission.
    pub async fn resolve(self) -> Resolution {
        let outcome = match self.transport.analyze(&self.input).await {
            Ok(raw) => normalize(&raw)
                .map(Arc::new)
                .map_err(AnalysisError::from),
            Err(err) => Err(AnalysisError::from(err)),
        };

        let Some(shared) = self.shared.upgrade() else {
            debug!(
                "Submission #{} resolved after controller disposal, ignoring",
                self.sequence
            );
            return Resolution::Disposed;
        };

        let next = match outcome {
            Ok(result) => SubmissionState::Succeeded(result),
            Err(err) => SubmissionState::Failed(err),
        };

        let applied = shared.state.send_if_modified(|state| {
            if shared.latest.load(Ordering::SeqCst) != self.sequence {
                return false;
            }
            *state = next.clone();
            true
        });

        if !applied {
            debug!(
                "Submission #{} superseded by #{}, discarding outcome",
                self.sequence,
                shared.latest.load(Ordering::SeqCst)
            );
            return Resolution::Superseded;
        }

        match &next {
            SubmissionState::Failed(err) => {
                warn!("Submission #{} failed: {}", self.sequence, err)
            }
            _ => info!("Submission #{} succeeded", self.sequence),
        }
        Resolution::Applied(next)
    }
}
