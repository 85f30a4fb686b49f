//! Chat session use case
//!
//! A [`ChatSession`] owns one conversation: the transcript, the outbound
//! buffer, and the slot for the presentation channel currently bound to it.
//!
//! Every submission records the user entry immediately, awaits one inference
//! call, then records and delivers the assistant (or error) entry. Outbound
//! messages always join the [`Outbox`] first and are drained in FIFO order
//! into the bound channel; with no channel bound they wait for the next
//! [`ChatSession::bind_channel`].
//!
//! The state lock is never held while a channel is sending, so a channel may
//! call back into its session from `send`.
//!
//! Submissions are independent. Two submissions in flight at once may
//! complete, and therefore be recorded and delivered, in either order unless
//! the session was built with serialized submissions.

mod outbox;

pub use outbox::Outbox;

use crate::config::BehaviorConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::presentation_channel::PresentationChannel;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::document_registry::DocumentRegistry;
use crate::use_cases::inference_client::InferenceClient;
use crate::use_cases::ingest_document::DocumentIngestor;
use buddy_domain::util::preview;
use buddy_domain::{
    ChatMessage, ChatRole, DomainError, InboundMessage, InferenceRequest, OutboundMessage,
    TaskKind,
};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Mutable session state. Guarded by a synchronous mutex that is never held
/// across an `.await` or a channel send.
#[derive(Default)]
struct SessionState {
    transcript: Vec<ChatMessage>,
    outbox: Outbox,
    channel: Option<Arc<dyn PresentationChannel>>,
    closed: bool,
    /// A drain is sending outside the lock; everyone else leaves the outbox
    /// to it.
    draining: bool,
}

impl SessionState {
    /// Unbind `failed` if it is still the bound channel. Returns whether it
    /// was.
    fn unbind_failed(&mut self, failed: &Arc<dyn PresentationChannel>) -> bool {
        let still_bound = self
            .channel
            .as_ref()
            .is_some_and(|bound| Arc::ptr_eq(bound, failed));
        if still_bound {
            self.channel = None;
        }
        still_bound
    }
}

/// One conversation between a user and the model.
///
/// All methods take `&self`; a session can be shared behind an `Arc` and
/// driven from several tasks.
pub struct ChatSession {
    client: InferenceClient,
    documents: DocumentRegistry,
    ingestor: Arc<DocumentIngestor>,
    state: Mutex<SessionState>,
    submission_lock: Option<tokio::sync::Mutex<()>>,
    progress: Arc<dyn ProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatSession {
    /// Create a session over a shared document registry.
    ///
    /// The session starts with no channel bound and an ingestor that has no
    /// extractors; use [`with_ingestor`](Self::with_ingestor) to enable
    /// uploads.
    pub fn new(client: InferenceClient, documents: DocumentRegistry) -> Self {
        Self {
            client,
            ingestor: Arc::new(DocumentIngestor::new(documents.clone())),
            documents,
            state: Mutex::new(SessionState::default()),
            submission_lock: None,
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Use `ingestor` for uploads. Its registry becomes the session's
    /// registry.
    pub fn with_ingestor(mut self, ingestor: Arc<DocumentIngestor>) -> Self {
        self.documents = ingestor.registry().clone();
        self.ingestor = ingestor;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Hold a per-session lock across each inference call so completions
    /// follow submission order.
    pub fn serialized(mut self, serialize: bool) -> Self {
        self.submission_lock = serialize.then(|| tokio::sync::Mutex::new(()));
        self
    }

    pub fn with_behavior(self, behavior: &BehaviorConfig) -> Self {
        self.serialized(behavior.serialize_submissions)
    }

    pub fn client(&self) -> &InferenceClient {
        &self.client
    }

    pub fn documents(&self) -> &DocumentRegistry {
        &self.documents
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ==================== Channel ====================

    /// Bind `channel`, replacing any channel already bound, and flush the
    /// outbox into it.
    ///
    /// Returns the number of buffered messages delivered. Binding a closed
    /// session does nothing.
    pub fn bind_channel(&self, channel: Arc<dyn PresentationChannel>) -> usize {
        let mut state = self.state();
        if state.closed {
            debug!("Ignoring bind of {} on closed session", channel.name());
            return 0;
        }

        debug!("Binding channel {}", channel.name());
        state.channel = Some(channel);
        drop(state);

        let flushed = self.drain();
        if flushed > 0 {
            info!("Flushed {} buffered messages", flushed);
        }
        flushed
    }

    /// Detach the bound channel. Later messages are buffered.
    pub fn unbind_channel(&self) {
        if let Some(channel) = self.state().channel.take() {
            debug!("Unbound channel {}", channel.name());
        }
    }

    pub fn is_bound(&self) -> bool {
        self.state().channel.is_some()
    }

    /// Number of messages waiting for a channel.
    pub fn pending_outbound(&self) -> usize {
        self.state().outbox.len()
    }

    // ==================== Submissions ====================

    /// Dispatch a message received from the presentation channel.
    pub async fn handle_inbound(&self, message: InboundMessage) {
        match message {
            InboundMessage::UserMessage { content } => self.submit_user_message(&content).await,
        }
    }

    /// Send free text to the model.
    pub async fn submit_user_message(&self, text: &str) {
        let request = InferenceRequest::new(TaskKind::Complete, text, self.client.model().clone());
        self.submit(text, request).await;
    }

    /// Run a code task (explain, debug, or generate tests) on `code`.
    ///
    /// Fails without touching the session if `task` does not take a code
    /// selection.
    pub async fn submit_task(&self, task: TaskKind, code: &str) -> Result<(), DomainError> {
        if !task.is_code_task() {
            return Err(DomainError::NotACodeTask(task.to_string()));
        }
        let request = InferenceRequest::new(task, code, self.client.model().clone());
        self.submit(code, request).await;
        Ok(())
    }

    /// Ask `question` about the registered document `name`.
    ///
    /// An unknown document is reported as an error message without calling
    /// the model.
    pub async fn query_document(&self, name: &str, question: &str) {
        let Some(content) = self.documents.get(name) else {
            if self.record(ChatMessage::user(question)) {
                let cause = format!("document '{}' not found", name);
                self.finish(ChatMessage::error(format!(
                    "{}{}",
                    TaskKind::QueryDocument.error_prefix(),
                    cause
                )));
            }
            return;
        };

        let request = InferenceRequest::for_document(question, &content, self.client.model().clone());
        self.submit(question, request).await;
    }

    /// Extract and register the file at `path`.
    ///
    /// The outcome is delivered as a message but is not a conversation turn,
    /// so the transcript is left alone. Returns the registered name on
    /// success.
    pub async fn upload_document(&self, path: &Path) -> Option<String> {
        match self.ingestor.ingest(path).await {
            Ok(entry) => {
                let name = entry.name().to_string();
                self.notify(OutboundMessage::assistant(format!(
                    "Document {} processed successfully",
                    name
                )));
                Some(name)
            }
            Err(e) => {
                self.notify(OutboundMessage::error(format!(
                    "Error processing document: {}",
                    e
                )));
                None
            }
        }
    }

    async fn submit(&self, user_content: &str, request: InferenceRequest) {
        if !self.record(ChatMessage::user(user_content)) {
            return;
        }

        let _turn = match &self.submission_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let task = request.task;
        self.progress.on_inference_start(task, &request.model);
        let result = self.client.send(&request).await;
        self.progress.on_inference_complete(task, result.is_ok());

        let reply = match result {
            Ok(response) => ChatMessage::assistant(task.decorate(&response)),
            Err(e) => ChatMessage::error(format!("{}{}", task.error_prefix(), e)),
        };
        self.finish(reply);
    }

    /// Append a user entry. Returns `false` if the session is closed.
    fn record(&self, message: ChatMessage) -> bool {
        {
            let mut state = self.state();
            if state.closed {
                debug!("Session closed, ignoring submission");
                return false;
            }
            state.transcript.push(message.clone());
        }
        self.log_message(&message);
        true
    }

    /// Append and deliver a reply, unless the session closed meanwhile.
    fn finish(&self, message: ChatMessage) {
        {
            let mut state = self.state();
            if state.closed {
                debug!(
                    "Dropping {} after close: {}",
                    message.role(),
                    preview(message.content(), 60)
                );
                return;
            }
            state.transcript.push(message.clone());
            state.outbox.push(OutboundMessage::from(&message));
        }
        self.drain();
        self.log_message(&message);
    }

    /// Deliver a message that is not part of the transcript.
    fn notify(&self, message: OutboundMessage) {
        {
            let mut state = self.state();
            if state.closed {
                debug!("Dropping notification after close");
                return;
            }
            state.outbox.push(message);
        }
        self.drain();
    }

    /// Send queued messages through the bound channel, oldest first.
    ///
    /// Each message is taken off the outbox under the lock and sent after
    /// the lock is released. Only one drain runs at a time; messages queued
    /// meanwhile, including by the channel itself, are picked up by the
    /// running drain. A failed send puts the message back at the front and
    /// unbinds the failing channel. Returns how many messages this call
    /// delivered.
    fn drain(&self) -> usize {
        let mut delivered = 0;
        loop {
            let (channel, message) = {
                let mut state = self.state();
                if state.draining {
                    return delivered;
                }
                let Some(channel) = state.channel.clone() else {
                    return delivered;
                };
                let Some(message) = state.outbox.pop_front() else {
                    return delivered;
                };
                state.draining = true;
                (channel, message)
            };

            let result = channel.send(&message);

            let mut state = self.state();
            state.draining = false;
            match result {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(
                        "Channel {} failed after {} delivered messages, buffering: {}",
                        channel.name(),
                        delivered,
                        e
                    );
                    if !state.closed {
                        state.outbox.push_front(message);
                    }
                    // A channel bound while this send was failing gets the rest.
                    if state.unbind_failed(&channel) {
                        return delivered;
                    }
                }
            }
        }
    }

    fn log_message(&self, message: &ChatMessage) {
        let event_type = match message.role() {
            ChatRole::User => "user_message",
            ChatRole::Assistant => "assistant_message",
            ChatRole::Error => "error_message",
        };
        self.conversation_logger.log(ConversationEvent::new(
            event_type,
            serde_json::json!({
                "role": message.role().as_str(),
                "content": message.content(),
            }),
        ));
    }

    // ==================== Transcript & lifecycle ====================

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state().transcript.clone()
    }

    /// Re-send every transcript entry through the bound channel.
    ///
    /// Returns how many entries were sent. Stops, and unbinds the channel,
    /// at the first send failure. Nothing is buffered.
    pub fn replay_transcript(&self) -> usize {
        let (channel, transcript) = {
            let state = self.state();
            let Some(channel) = state.channel.clone() else {
                return 0;
            };
            (channel, state.transcript.clone())
        };

        let mut sent = 0;
        for message in &transcript {
            if let Err(e) = channel.send(&OutboundMessage::from(message)) {
                warn!("Replay to {} stopped: {}", channel.name(), e);
                self.state().unbind_failed(&channel);
                break;
            }
            sent += 1;
        }
        sent
    }

    /// Tear the session down: unbind the channel and discard the outbox.
    /// Replies still in flight are dropped when they complete.
    pub fn close(&self) {
        let mut state = self.state();
        if state.closed {
            return;
        }
        state.closed = true;
        state.channel = None;
        let dropped = state.outbox.clear();
        debug!("Session closed, {} undelivered messages dropped", dropped);
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }
}
