//! Chat turn controller.
//!
//! Owns the [`Transcript`] and mediates between user input, the answer
//! service and a [`ChatView`]. A turn moves `Idle -> AwaitingAnswer -> Idle`;
//! while a turn is outstanding further submissions are rejected, so at most
//! one placeholder entry is unresolved at any time.
//!
//! `submit` spawns the answer request on the tokio runtime, so it must be
//! called from within one. A [`PendingTurn`] dropped before its completion
//! was applied marks the turn abandoned; the controller then resolves the
//! placeholder with the error text on the next `submit`, or when
//! [`ChatController::recover_abandoned_turn`] is called.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use chatbox_core::WidgetConfig;
//! # use chatbox_providers::MockAnswerService;
//! # use chatbox_ui::{ChatController, SubmitOutcome, TerminalView};
//! # async fn demo() -> chatbox_core::Result<()> {
//! let service = Arc::new(MockAnswerService::new(None));
//! let mut controller = ChatController::new(service, TerminalView::new(), &WidgetConfig::default());
//!
//! if let SubmitOutcome::Sent(pending) = controller.submit("Hi") {
//!     let completion = pending.resolve().await;
//!     controller.complete(completion)?;
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chatbox_core::logging::redact_message;
use chatbox_core::{Entry, EntryIndex, PrivacyConfig, Result, Transcript, TranscriptError, WidgetConfig};
use chatbox_providers::{AnswerRequestFailed, AnswerService};
use tokio::task::JoinHandle;

use crate::render::RenderedTranscript;
use crate::view::ChatView;

/// Where the controller is in the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingAnswer { placeholder: EntryIndex },
}

/// Answer request already in flight, bound to the placeholder it will resolve.
///
/// Dropping it before [`PendingTurn::resolve`] finishes marks the turn
/// abandoned.
#[must_use = "the placeholder stays unresolved until the turn is completed"]
pub struct PendingTurn {
    placeholder: EntryIndex,
    request: JoinHandle<std::result::Result<String, AnswerRequestFailed>>,
    abandoned: Arc<AtomicBool>,
    delivered: bool,
}

impl PendingTurn {
    pub fn placeholder(&self) -> EntryIndex {
        self.placeholder
    }

    /// Wait for the request to finish. A request task that panicked or was
    /// cancelled counts as a failed round trip.
    pub async fn resolve(mut self) -> TurnCompletion {
        let outcome = match (&mut self.request).await {
            Ok(outcome) => outcome,
            Err(e) => Err(AnswerRequestFailed::new(format!("request task failed: {}", e))),
        };
        self.delivered = true;
        TurnCompletion { placeholder: self.placeholder, outcome }
    }
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        if !self.delivered {
            self.abandoned.store(true, Ordering::SeqCst);
        }
    }
}

impl fmt::Debug for PendingTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTurn").field("placeholder", &self.placeholder).finish_non_exhaustive()
    }
}

/// Result of a round trip, carrying the placeholder captured at submission
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "hand the completion to `ChatController::complete`"]
pub struct TurnCompletion {
    pub placeholder: EntryIndex,
    pub outcome: std::result::Result<String, AnswerRequestFailed>,
}

/// What [`ChatController::submit`] did with the input
#[derive(Debug)]
#[must_use]
pub enum SubmitOutcome {
    /// Two entries appended and the request sent; its completion must be applied
    Sent(PendingTurn),
    /// Input was empty after trimming. Nothing happened.
    Empty,
    /// A turn is already outstanding. Nothing happened.
    Busy,
}

pub struct ChatController<V: ChatView> {
    transcript: Transcript,
    service: Arc<dyn AnswerService>,
    view: V,
    state: TurnState,
    abandoned: Option<Arc<AtomicBool>>,
    widget: WidgetConfig,
    privacy: PrivacyConfig,
}

impl<V: ChatView> ChatController<V> {
    /// Seed the transcript with the welcome entry and render it
    pub fn new(service: Arc<dyn AnswerService>, view: V, widget: &WidgetConfig) -> Self {
        let mut controller = Self {
            transcript: Transcript::with_welcome(widget.welcome_message.clone()),
            service,
            view,
            state: TurnState::Idle,
            abandoned: None,
            widget: widget.clone(),
            privacy: PrivacyConfig::default(),
        };
        controller.refresh();
        controller
    }

    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    /// Start a turn for `text`.
    ///
    /// Appends the trimmed user entry and the placeholder, rendering after
    /// each, then issues the request and hands back its handle.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SubmitOutcome::Empty;
        }

        self.recover_abandoned_turn();

        if let TurnState::AwaitingAnswer { placeholder } = self.state {
            tracing::debug!(%placeholder, "submission rejected while awaiting an answer");
            return SubmitOutcome::Busy;
        }

        let user = self.transcript.append(Entry::user(message));
        self.refresh();

        let placeholder = self.transcript.append(Entry::assistant(self.widget.placeholder_text.clone()));
        self.refresh();

        self.state = TurnState::AwaitingAnswer { placeholder };
        tracing::info!(
            %user,
            %placeholder,
            message = %redact_message(message, &self.privacy),
            "message submitted"
        );

        let service = Arc::clone(&self.service);
        let message = message.to_string();
        let request = tokio::spawn(async move { service.ask(&message).await });

        let abandoned = Arc::new(AtomicBool::new(false));
        self.abandoned = Some(Arc::clone(&abandoned));

        SubmitOutcome::Sent(PendingTurn { placeholder, request, abandoned, delivered: false })
    }

    /// Resolve the outstanding placeholder with the error text if its
    /// [`PendingTurn`] was dropped. Returns whether a turn was recovered.
    pub fn recover_abandoned_turn(&mut self) -> bool {
        let TurnState::AwaitingAnswer { placeholder } = self.state else {
            return false;
        };
        if !self.abandoned.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            return false;
        }

        let completion = TurnCompletion {
            placeholder,
            outcome: Err(AnswerRequestFailed::new("turn abandoned before its answer was applied")),
        };
        match self.complete(completion) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(%placeholder, error = %e, "failed to recover abandoned turn");
                false
            }
        }
    }

    /// Resolve the placeholder captured at submission with the answer, or
    /// with the error text when the round trip failed
    pub fn complete(&mut self, completion: TurnCompletion) -> Result<()> {
        let TurnCompletion { placeholder, outcome } = completion;

        match self.state {
            TurnState::AwaitingAnswer { placeholder: expected } if expected == placeholder => {}
            _ => {
                tracing::warn!(%placeholder, "completion does not match the outstanding turn");
                return Err(TranscriptError::NoOutstandingTurn { index: placeholder.get() }.into());
            }
        }

        self.state = TurnState::Idle;
        self.abandoned = None;

        let text = match outcome {
            Ok(answer) => {
                tracing::info!(%placeholder, answer = %redact_message(&answer, &self.privacy), "answer received");
                answer
            }
            Err(e) => {
                tracing::warn!(%placeholder, reason = e.reason(), "answer request failed");
                self.widget.error_text.clone()
            }
        };

        self.transcript.update_at(placeholder, text)?;
        self.refresh();
        Ok(())
    }

    /// Submit and await a whole turn inline. Returns the resolved
    /// placeholder, or `None` when the input was empty or a turn was busy.
    pub async fn converse(&mut self, text: &str) -> Result<Option<EntryIndex>> {
        match self.submit(text) {
            SubmitOutcome::Sent(pending) => {
                let completion = pending.resolve().await;
                let placeholder = completion.placeholder;
                self.complete(completion)?;
                Ok(Some(placeholder))
            }
            SubmitOutcome::Empty | SubmitOutcome::Busy => Ok(None),
        }
    }

    /// Rebuild the rendered transcript and hand it to the view
    pub fn refresh(&mut self) {
        let rendered = self.rendered();
        self.view.render(&rendered);
    }

    pub fn rendered(&self) -> RenderedTranscript {
        RenderedTranscript::from_entries(self.transcript.entries())
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, TurnState::AwaitingAnswer { .. })
    }

    pub fn widget(&self) -> &WidgetConfig {
        &self.widget
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
