//! The two-phase conversational session controller.
//!
//! Owns the single active session: creation, resume/hydration, phase-routed
//! sends, and the one-shot yasmine -> qa transition. The phase is only ever
//! updated from the remote response; the controller never infers it locally.
//! All other components observe the session read-only through the phase and
//! message log published here.

use std::sync::Arc;
use std::time::Duration;

use chachia_common::{ChatMessage, HintDelivered, HintRequested, Phase, Role};
use chachia_engine::{schedule_once, OneShot};
use chouchane_client::{AssistantTurn, ChouchaneError, HistoryEntry};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::api::ChouchaneApi;
use crate::bridge::HintBridge;

/// Reading window between the closing message and auto-navigation.
pub const NAVIGATION_DELAY: Duration = Duration::from_secs(6);

const QA_WELCOME: &str = "Hello again! Your personalized journey is set. You can now ask me \
     anything related to Tunisia \u{2014} destinations, culture, food, or tips \u{2014} I'm here \
     to help.";

const RESUME_FALLBACK: &str = "Continue the conversation below.";

const CLOSING_MESSAGE: &str = "Your personalized Tunisian journey is ready! You can explore the \
     map, collect Chachias, and ask me anything in the chatbot. Enjoy! \u{2728}";

#[derive(Debug, Error)]
pub enum SessionError {
    /// A send is already outstanding for this session.
    #[error("a message is already in flight")]
    Busy,

    #[error(transparent)]
    Api(#[from] ChouchaneError),
}

/// Signals the controller publishes for the surrounding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// The recommendation phase finished and the reading window elapsed.
    NavigateToMain,
}

#[derive(Default)]
struct SessionState {
    session_id: Option<String>,
    phase: Phase,
    messages: Vec<ChatMessage>,
    hydrated: bool,
    sending: bool,
    transitioned: bool,
    nav_timer: Option<OneShot>,
}

pub struct SessionPhaseController<A: ChouchaneApi> {
    api: A,
    bridge: Arc<HintBridge>,
    state: Mutex<SessionState>,
    signal_tx: mpsc::UnboundedSender<SessionSignal>,
}

impl<A: ChouchaneApi> SessionPhaseController<A> {
    pub fn new(
        api: A,
        bridge: Arc<HintBridge>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionSignal>) {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let controller = Self {
            api,
            bridge,
            state: Mutex::new(SessionState::default()),
            signal_tx,
        };
        (controller, signal_rx)
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase
    }

    pub async fn session_id(&self) -> Option<String> {
        self.state.lock().await.session_id.clone()
    }

    /// Snapshot of the visible message log.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().await.messages.clone()
    }

    /// Adopt a session id issued earlier (e.g. carried over from another UI
    /// surface). History hydration happens lazily on the next
    /// `ensure_session` in this context.
    pub async fn resume_session(&self, session_id: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.session_id = Some(session_id.into());
        state.hydrated = false;
    }

    /// Return the cached session id, starting a remote session or hydrating
    /// history as needed. Serialized behind the state lock, so concurrent
    /// callers share a single start call and a single hydration.
    pub async fn ensure_session(&self) -> Result<String, SessionError> {
        let mut state = self.state.lock().await;

        if let Some(sid) = state.session_id.clone() {
            if !state.hydrated {
                self.hydrate(&mut state, &sid).await;
            }
            return Ok(sid);
        }

        match self.api.start_session().await {
            Ok(turn) => {
                let sid = turn.session_id.clone();
                info!(session_id = %sid, phase = %turn.phase, "session started");
                state.session_id = Some(sid.clone());
                state.phase = turn.phase;
                state.messages = vec![ChatMessage::assistant(turn.reply)];
                state.hydrated = true;
                Ok(sid)
            }
            Err(e) => {
                warn!(error = %e, "session start failed");
                state.messages = vec![ChatMessage::assistant(format!(
                    "Could not start the travel assistant: {e}. Is the Chouchane API running \
                     at the configured URL?"
                ))];
                Err(e.into())
            }
        }
    }

    /// Send a user message through the endpoint matching the cached phase.
    /// Refuses while another send is outstanding; an empty message is not a
    /// submission. Transport failures degrade to an inline assistant-style
    /// message and keep the session id for retry.
    pub async fn send(&self, text: &str) -> Result<(), SessionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let sid = self.ensure_session().await?;

        let phase = {
            let mut state = self.state.lock().await;
            if state.sending {
                debug!("send refused: another message is in flight");
                return Err(SessionError::Busy);
            }
            state.sending = true;
            state.messages.push(ChatMessage::user(trimmed));
            state.phase
        };

        let result = match phase {
            Phase::Yasmine => self.api.yasmine_turn(&sid, trimmed).await,
            Phase::Qa => self.api.qa_turn(&sid, trimmed).await,
        };

        let mut state = self.state.lock().await;
        state.sending = false;
        match result {
            Ok(turn) => {
                self.apply_turn(&mut state, turn.into_turn());
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, phase = %phase, "turn failed");
                state.messages.push(ChatMessage::assistant(format!(
                    "Sorry, something went wrong: {e}. Please try again or check that the \
                     Chouchane API is running."
                )));
                Ok(())
            }
        }
    }

    /// Explicitly reset the remote session back to the recommendation
    /// phase and reseed the log with the fresh greeting.
    pub async fn reset(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let Some(sid) = state.session_id.clone() else {
            return Ok(());
        };
        let turn = self.api.reset_session(&sid).await?;
        info!(session_id = %turn.session_id, "session reset");
        state.session_id = Some(turn.session_id.clone());
        state.phase = turn.phase;
        state.messages = vec![ChatMessage::assistant(turn.reply)];
        state.hydrated = true;
        state.transitioned = false;
        state.nav_timer = None;
        Ok(())
    }

    /// Consume hint requests from the bridge until it closes. Intended to
    /// run as a background task next to the UI loop.
    pub async fn run_hint_loop(&self) {
        let Some(mut requests) = self.bridge.take_requests() else {
            warn!("hint request stream already claimed");
            return;
        };
        while let Some(request) = requests.recv().await {
            self.handle_hint_request(request).await;
        }
    }

    /// Ask the assistant for a hint on behalf of an open challenge and
    /// publish the reply back over the bridge.
    pub async fn handle_hint_request(&self, request: HintRequested) {
        let prompt = format!(
            "I need a hint for the Harissa challenge at {}.",
            request.spot_name
        );

        let Ok(sid) = self.ensure_session().await else {
            return;
        };

        let phase = {
            let mut state = self.state.lock().await;
            if state.sending {
                debug!(spot_id = request.spot_id, "hint request dropped: send in flight");
                return;
            }
            state.sending = true;
            state.messages.push(ChatMessage::user(prompt.clone()));
            state.phase
        };

        let result = match phase {
            Phase::Yasmine => self.api.yasmine_turn(&sid, &prompt).await,
            Phase::Qa => self.api.qa_turn(&sid, &prompt).await,
        };

        let mut state = self.state.lock().await;
        state.sending = false;
        match result {
            Ok(turn) => {
                let turn = turn.into_turn();
                let hint_text = turn.reply().to_string();
                self.apply_turn(&mut state, turn);
                drop(state);
                self.bridge.deliver(HintDelivered {
                    spot_id: request.spot_id,
                    hint_text,
                });
            }
            Err(e) => {
                warn!(error = %e, spot_id = request.spot_id, "hint fetch failed");
                state.messages.push(ChatMessage::assistant(format!(
                    "Sorry, something went wrong: {e}. Please try again or check that the \
                     Chouchane API is running."
                )));
            }
        }
    }

    /// Apply one assistant turn: update the cached phase from the wire,
    /// append the reply and any non-empty partners block, and run the
    /// edge-triggered yasmine -> qa transition exactly once.
    fn apply_turn(&self, state: &mut SessionState, turn: AssistantTurn) {
        let was = state.phase;
        let now = turn.phase();
        state.phase = now;

        state.messages.push(ChatMessage::assistant(turn.reply()));
        if let Some(partners) = turn.partners() {
            state.messages.push(ChatMessage::assistant(partners));
        }

        if was == Phase::Yasmine && now == Phase::Qa && !state.transitioned {
            state.transitioned = true;
            state.messages.push(ChatMessage::assistant(CLOSING_MESSAGE));
            info!("recommendation phase complete; navigation armed");
            let tx = self.signal_tx.clone();
            state.nav_timer = Some(schedule_once(NAVIGATION_DELAY, move || {
                let _ = tx.send(SessionSignal::NavigateToMain);
            }));
        }
    }

    async fn hydrate(&self, state: &mut SessionState, sid: &str) {
        match self.api.fetch_session(sid).await {
            Ok(snapshot) => {
                state.phase = snapshot.phase;
                // Resuming straight into Q&A with nothing said yet: greet
                // instead of replaying the whole recommendation transcript.
                if snapshot.phase == Phase::Qa && snapshot.qa_history.is_empty() {
                    state.messages = vec![ChatMessage::assistant(QA_WELCOME)];
                } else {
                    let mut messages = Vec::new();
                    if snapshot.phase == Phase::Yasmine {
                        messages.extend(snapshot.yasmine_history.iter().map(history_message));
                    }
                    messages.extend(snapshot.qa_history.iter().map(history_message));
                    state.messages = messages;
                }
                debug!(session_id = %sid, phase = %snapshot.phase, "session hydrated");
            }
            Err(e) => {
                // Degrade gracefully: keep the session id so a later retry
                // can still resume.
                warn!(error = %e, session_id = %sid, "session hydration failed");
                state.messages = vec![ChatMessage::assistant(RESUME_FALLBACK)];
            }
        }
        state.hydrated = true;
    }
}

fn history_message(entry: &HistoryEntry) -> ChatMessage {
    match entry.role() {
        Role::Assistant => ChatMessage::assistant(entry.text.clone()),
        Role::User => ChatMessage::user(entry.text.clone()),
    }
}
