//! The companion: review playback, chat, and cancellation.
//!
//! Every review or chat reply starts a new turn. Starting a turn aborts the
//! playback task of the previous one, and a response that arrives after its
//! turn was superseded (or after the learner left the problem) is never
//! shown. At most one playback task exists at any time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use codequest_core::clock::Clock;
use codequest_core::dialogue::DialogueService;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::domain::chat::{ChatLog, Speaker};
use crate::domain::emotion::Emotion;
use crate::domain::playback::{AUTO_HIDE_AFTER, CompanionView, PlaybackState, utterance_duration};
use crate::domain::transcript::{Utterance, build_transcript, canned_critique};

/// Reply used when the dialogue service cannot answer a chat message.
pub const CHAT_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try asking again in a moment.";

struct Playback {
    task: JoinHandle<()>,
    advance: Arc<Notify>,
}

/// Animated helper that reviews code and answers questions.
pub struct Companion {
    dialogue: Option<Arc<dyn DialogueService>>,
    clock: Arc<dyn Clock>,
    view: Arc<watch::Sender<CompanionView>>,
    turn: Arc<AtomicU64>,
    epoch: AtomicU64,
    playback: Mutex<Option<Playback>>,
    chat_log: Mutex<ChatLog>,
}

impl fmt::Debug for Companion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Companion")
            .field("has_dialogue", &self.dialogue.is_some())
            .field("view", &*self.view.borrow())
            .finish_non_exhaustive()
    }
}

impl Companion {
    /// Creates a companion. Without a dialogue service every review uses
    /// the canned critique and every chat gets the apology.
    #[must_use]
    pub fn new(dialogue: Option<Arc<dyn DialogueService>>, clock: Arc<dyn Clock>) -> Self {
        let (view, _) = watch::channel(CompanionView::default());
        Self {
            dialogue,
            clock,
            view: Arc::new(view),
            turn: Arc::new(AtomicU64::new(0)),
            epoch: AtomicU64::new(0),
            playback: Mutex::new(None),
            chat_log: Mutex::new(ChatLog::new()),
        }
    }

    /// Receiver notified on every display change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CompanionView> {
        self.view.subscribe()
    }

    #[must_use]
    pub fn view(&self) -> CompanionView {
        self.view.borrow().clone()
    }

    #[must_use]
    pub fn chat_log(&self) -> ChatLog {
        self.log().clone()
    }

    /// Critiques a failed submission and starts playing the critique.
    ///
    /// Always returns a non-empty transcript: the canned critique stands in
    /// when there is no dialogue service, it fails, or it answers with
    /// nothing speakable.
    #[instrument(skip(self, code))]
    pub async fn review(&self, code: &str, language: &str) -> Vec<Utterance> {
        let turn = self.begin_turn();

        let transcript = match self.request_review(code, language).await {
            Some(text) => {
                let transcript = build_transcript(&text);
                if transcript.is_empty() {
                    canned_critique()
                } else {
                    transcript
                }
            }
            None => canned_critique(),
        };

        if self.is_current(turn) {
            self.play(turn, transcript.clone());
        } else {
            debug!("review superseded, discarding response");
        }
        transcript
    }

    /// Answers one chat message and logs both sides of the exchange.
    ///
    /// Failure never surfaces: the reply becomes [`CHAT_APOLOGY`] tagged
    /// [`Emotion::Sad`]. A successful reply is tagged [`Emotion::Happy`].
    ///
    /// "Failure" is wider than a transport error here. A missing dialogue
    /// service and a blank reply also get the sad apology, since neither
    /// leaves anything happy to show.
    #[instrument(skip(self, message))]
    pub async fn chat(&self, message: &str) -> Utterance {
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.log().push(Speaker::User, message, self.clock.now());
        let turn = self.begin_turn();

        let reply = match self.request_chat(message).await {
            Some(text) => Utterance::with_emotion(text, Emotion::Happy),
            None => Utterance::with_emotion(CHAT_APOLOGY, Emotion::Sad),
        };

        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!("problem left during chat, discarding reply");
            return reply;
        }
        self.log()
            .push(Speaker::Companion, reply.text.clone(), self.clock.now());
        if self.is_current(turn) {
            self.play(turn, vec![reply.clone()]);
        }
        reply
    }

    /// Skips to the next utterance. Later utterances keep their full
    /// duration.
    pub fn advance(&self) {
        if let Some(playback) = self.playback_slot().as_ref() {
            playback.advance.notify_one();
        }
    }

    /// Stops playback, hides the companion, drops in-flight responses, and
    /// clears the chat log.
    pub fn leave(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.turn.fetch_add(1, Ordering::SeqCst);
        self.stop_playback();
        self.view.send_replace(CompanionView::default());
        self.log().clear();
    }

    async fn request_review(&self, code: &str, language: &str) -> Option<String> {
        let Some(dialogue) = &self.dialogue else {
            info!("no dialogue credential, using canned critique");
            return None;
        };
        match dialogue.review(code, language).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!("dialogue service returned an empty review, using canned critique");
                None
            }
            Err(err) => {
                warn!(error = %err, "dialogue review failed, using canned critique");
                None
            }
        }
    }

    async fn request_chat(&self, message: &str) -> Option<String> {
        let Some(dialogue) = &self.dialogue else {
            info!("no dialogue credential, apologising");
            return None;
        };
        match dialogue.chat(message).await {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
            Ok(_) => {
                warn!("dialogue service returned an empty reply");
                None
            }
            Err(err) => {
                warn!(error = %err, "dialogue chat failed");
                None
            }
        }
    }

    fn begin_turn(&self) -> u64 {
        let turn = self.turn.fetch_add(1, Ordering::SeqCst) + 1;
        self.stop_playback();
        self.view.send_replace(CompanionView::thinking());
        turn
    }

    fn is_current(&self, turn: u64) -> bool {
        self.turn.load(Ordering::SeqCst) == turn
    }

    fn stop_playback(&self) {
        if let Some(playback) = self.playback_slot().take() {
            playback.task.abort();
        }
    }

    fn play(&self, turn: u64, utterances: Vec<Utterance>) {
        let Some(first) = utterances.first().cloned() else {
            self.view.send_replace(CompanionView::default());
            return;
        };
        self.view.send_replace(CompanionView::speaking(0, first));

        let view = Arc::clone(&self.view);
        let current = Arc::clone(&self.turn);
        let advance = Arc::new(Notify::new());
        let skip = Arc::clone(&advance);
        let still_current = move || current.load(Ordering::SeqCst) == turn;

        let task = tokio::spawn(async move {
            for (index, utterance) in utterances.iter().enumerate() {
                if index > 0 {
                    if !still_current() {
                        return;
                    }
                    view.send_replace(CompanionView::speaking(index, utterance.clone()));
                }
                debug!(index, emotion = %utterance.emotion, "speaking");
                tokio::select! {
                    () = tokio::time::sleep(utterance_duration(&utterance.text)) => {}
                    () = skip.notified() => debug!(index, "advanced manually"),
                }
            }
            if !still_current() {
                return;
            }
            view.send_modify(|v| v.state = PlaybackState::Idle);
            tokio::time::sleep(AUTO_HIDE_AFTER).await;
            if still_current() {
                view.send_modify(|v| v.visible = false);
            }
        });

        *self.playback_slot() = Some(Playback { task, advance });
    }

    fn playback_slot(&self) -> MutexGuard<'_, Option<Playback>> {
        self.playback.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn log(&self) -> MutexGuard<'_, ChatLog> {
        self.chat_log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Companion {
    fn drop(&mut self) {
        self.stop_playback();
    }
}
