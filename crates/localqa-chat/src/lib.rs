//! localqa-chat
//!
//! Streamed answer delivery. One cooperative task runs the
//! retrieve → classify → synthesize pipeline per query turn and feeds
//! fragments through a bounded channel, so a slow consumer backpressures
//! the producer instead of piling up memory.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use localqa_answer::{classify, synthesize};
use localqa_core::cancel::CancelToken;
use localqa_core::types::{AnswerEvent, EscalationRequest};
use localqa_hybrid::HybridRetriever;
use localqa_text::split_fragments;

/// Pacing and channel knobs for streamed delivery.
///
/// The inter-fragment delay simulates incremental generation; it is a UX
/// parameter, not a correctness one, and tests run it at zero.
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    pub fragment_delay: Duration,
    pub channel_capacity: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            fragment_delay: Duration::from_millis(40),
            channel_capacity: 8,
        }
    }
}

/// Turns queries into finite, cancellable streams of [`AnswerEvent`]s.
///
/// When no local answer exists the stream's only event is
/// `NeedsExternalSearch`, preceded by an [`EscalationRequest`] on the
/// escalation channel if one is registered. A storage-level failure ends
/// the stream with no events at all; it is the only turn-level failure.
pub struct StreamingResponder {
    retriever: Arc<HybridRetriever>,
    config: ResponderConfig,
    escalation_tx: Option<mpsc::UnboundedSender<EscalationRequest>>,
}

impl StreamingResponder {
    pub fn new(retriever: Arc<HybridRetriever>) -> Self {
        Self::with_config(retriever, ResponderConfig::default())
    }

    pub fn with_config(retriever: Arc<HybridRetriever>, config: ResponderConfig) -> Self {
        Self {
            retriever,
            config,
            escalation_tx: None,
        }
    }

    /// Register the channel that receives the "no local data" signal.
    /// The web-search collaborator listens on the other end.
    pub fn with_escalation_channel(mut self, tx: mpsc::UnboundedSender<EscalationRequest>) -> Self {
        self.escalation_tx = Some(tx);
        self
    }

    /// Produce the answer for `query` as a lazy event sequence.
    ///
    /// The stream is finite and not restartable; call again for a new
    /// turn. Independent turns may run concurrently against the same
    /// retriever.
    pub fn stream(&self, query: &str, cancel: CancelToken) -> AnswerStream {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let retriever = Arc::clone(&self.retriever);
        let config = self.config.clone();
        let escalation_tx = self.escalation_tx.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            run_turn(retriever, config, escalation_tx, query, cancel, tx).await;
        });
        AnswerStream { rx }
    }
}

async fn run_turn(
    retriever: Arc<HybridRetriever>,
    config: ResponderConfig,
    escalation_tx: Option<mpsc::UnboundedSender<EscalationRequest>>,
    query: String,
    cancel: CancelToken,
    tx: mpsc::Sender<AnswerEvent>,
) {
    // Empty queries never reach retrieval; scoring garbage input helps
    // nobody.
    if query.trim().is_empty() {
        escalate(&escalation_tx, &query);
        let _ = tx.send(AnswerEvent::NeedsExternalSearch).await;
        return;
    }

    let candidates = match retriever.retrieve(&query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            error!(error = %e, "retrieval failed; turn aborted");
            return;
        }
    };
    if cancel.is_cancelled() {
        let _ = tx.send(AnswerEvent::Cancelled).await;
        return;
    }

    let intent = classify(&query);
    let answer = synthesize(&query, &candidates, intent);
    if candidates.is_empty() || answer.trim().is_empty() {
        debug!(%query, "no local answer; escalating to external search");
        escalate(&escalation_tx, &query);
        let _ = tx.send(AnswerEvent::NeedsExternalSearch).await;
        return;
    }

    let fragments = split_fragments(&answer);
    debug!(%query, ?intent, fragments = fragments.len(), "streaming answer");
    for fragment in fragments {
        if cancel.is_cancelled() {
            let _ = tx.send(AnswerEvent::Cancelled).await;
            return;
        }
        if tx.send(AnswerEvent::Fragment(fragment)).await.is_err() {
            // Receiver dropped; nothing left to deliver.
            return;
        }
        if !config.fragment_delay.is_zero() {
            tokio::time::sleep(config.fragment_delay).await;
        }
    }
}

fn escalate(tx: &Option<mpsc::UnboundedSender<EscalationRequest>>, query: &str) {
    if let Some(tx) = tx {
        if tx
            .send(EscalationRequest {
                query: query.to_string(),
            })
            .is_err()
        {
            warn!("escalation receiver dropped; external search signal lost");
        }
    }
}

/// Finite sequence of [`AnswerEvent`]s for one query turn.
pub struct AnswerStream {
    rx: mpsc::Receiver<AnswerEvent>,
}

impl AnswerStream {
    /// Receive the next event, or `None` once the turn is complete.
    pub async fn next_event(&mut self) -> Option<AnswerEvent> {
        self.rx.recv().await
    }
}

impl Stream for AnswerStream {
    type Item = AnswerEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
