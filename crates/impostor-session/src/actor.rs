//! Session actor: an isolated Tokio task that owns one [`Engine`].
//!
//! The presentation layer never touches the engine directly. It holds a
//! [`SessionHandle`], which sends commands over an mpsc channel; the actor
//! processes them one at a time, alongside countdown ticks and the
//! readiness deadline, inside a single `tokio::select!` loop. Every state
//! replacement is published on a `watch` channel.

use impostor_tick::{Countdown, TickConfig, next_tick};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant};

use crate::engine::{Engine, TimerLease};
use crate::setup::RoundRequest;
use crate::state::{GamePhase, GameState, Player};
use crate::SessionError;

/// A state mutation that always succeeds.
#[derive(Debug, Clone)]
pub(crate) enum Operation {
    ProceedToNextRoleReveal,
    SetGamePhase(GamePhase),
    StartGameTimer,
    StopGameTimer,
    SetTimerValue(u32),
    GoToResolutionPhase { reason_key: Option<String> },
    ChangeSecretWord(String),
    EndGame,
    ResetGame,
}

/// Commands sent to a session actor through its channel.
///
/// The `oneshot::Sender` in each variant is the reply channel; mutations
/// reply with the state they installed.
pub(crate) enum SessionCommand {
    Initialize {
        request: RoundRequest,
        reply: oneshot::Sender<Result<GameState, SessionError>>,
    },
    Apply {
        op: Operation,
        reply: oneshot::Sender<GameState>,
    },
    GetImposter {
        reply: oneshot::Sender<Option<Player>>,
    },
    WordsForCategory {
        category: String,
        reply: oneshot::Sender<Vec<String>>,
    },
    CategoryNames {
        reply: oneshot::Sender<Vec<String>>,
    },
    Shutdown,
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

/// Handle to a running session actor.
///
/// Cheap to clone. When the last handle is dropped the actor stops and its
/// countdown is cancelled.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<GameState>,
}

impl SessionHandle {
    /// The latest published state.
    pub fn snapshot(&self) -> GameState {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified after every state replacement.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.snapshots.clone()
    }

    /// Returns `true` once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Starts a new round. See [`Engine::initialize_game`].
    ///
    /// # Errors
    /// [`SessionError::EmptyWordPool`] for a category without words,
    /// [`SessionError::Unavailable`] if the actor is gone.
    pub async fn initialize_game(
        &self,
        player_count: usize,
        imposter_count: usize,
        category_name: &str,
        hint_mode: bool,
        round_time_secs: u32,
        player_names: Option<Vec<String>>,
    ) -> Result<GameState, SessionError> {
        let request = RoundRequest {
            player_count,
            imposter_count,
            category_name: category_name.to_string(),
            hint_mode,
            round_time_secs,
            player_names: player_names.unwrap_or_default(),
        };
        self.initialize_round(request).await
    }

    /// Starts a new round from a finished setup draft.
    pub async fn initialize_round(&self, request: RoundRequest) -> Result<GameState, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Initialize { request, reply }).await?;
        rx.await.map_err(|_| SessionError::Unavailable)?
    }

    pub async fn proceed_to_next_role_reveal(&self) -> Result<GameState, SessionError> {
        self.apply(Operation::ProceedToNextRoleReveal).await
    }

    pub async fn set_game_phase(&self, phase: GamePhase) -> Result<GameState, SessionError> {
        self.apply(Operation::SetGamePhase(phase)).await
    }

    pub async fn start_game_timer(&self) -> Result<GameState, SessionError> {
        self.apply(Operation::StartGameTimer).await
    }

    pub async fn stop_game_timer(&self) -> Result<GameState, SessionError> {
        self.apply(Operation::StopGameTimer).await
    }

    pub async fn set_timer_value(&self, value: u32) -> Result<GameState, SessionError> {
        self.apply(Operation::SetTimerValue(value)).await
    }

    pub async fn go_to_resolution_phase(
        &self,
        reason_key: Option<&str>,
    ) -> Result<GameState, SessionError> {
        self.apply(Operation::GoToResolutionPhase {
            reason_key: reason_key.map(str::to_string),
        })
        .await
    }

    pub async fn change_secret_word(&self, new_word: &str) -> Result<GameState, SessionError> {
        self.apply(Operation::ChangeSecretWord(new_word.to_string())).await
    }

    pub async fn end_game(&self) -> Result<GameState, SessionError> {
        self.apply(Operation::EndGame).await
    }

    pub async fn reset_game(&self) -> Result<GameState, SessionError> {
        self.apply(Operation::ResetGame).await
    }

    /// The first impostor of the current round.
    pub async fn get_imposter(&self) -> Result<Option<Player>, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::GetImposter { reply }).await?;
        rx.await.map_err(|_| SessionError::Unavailable)
    }

    /// Candidate words for a category, as the engine would resolve them.
    pub async fn words_for_category(&self, category: &str) -> Result<Vec<String>, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::WordsForCategory {
            category: category.to_string(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| SessionError::Unavailable)
    }

    /// Category names offered by the word provider.
    pub async fn category_names(&self) -> Result<Vec<String>, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::CategoryNames { reply }).await?;
        rx.await.map_err(|_| SessionError::Unavailable)
    }

    /// Tells the actor to stop. Any live countdown is cancelled.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown).await
    }

    async fn apply(&self, op: Operation) -> Result<GameState, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Apply { op, reply }).await?;
        rx.await.map_err(|_| SessionError::Unavailable)
    }

    async fn send(&self, cmd: SessionCommand) -> Result<(), SessionError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::Unavailable)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The internal actor state. Runs inside a Tokio task.
struct SessionActor {
    engine: Engine,
    receiver: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<GameState>,
    /// The single live countdown, and the lease it was armed for.
    countdown: Option<Countdown>,
    lease: Option<TimerLease>,
    /// Generation and deadline of the pending readiness transition.
    ready_at: Option<(u64, Instant)>,
}

impl SessionActor {
    async fn run(mut self) {
        tracing::info!(generation = self.engine.generation(), "session actor started");

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => {
                    let Some(cmd) = cmd else {
                        tracing::debug!("all session handles dropped");
                        break;
                    };
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                tick = next_tick(&mut self.countdown) => {
                    self.engine.tick(tick.generation);
                    self.sync();
                }
                generation = wait_ready(self.ready_at) => {
                    self.ready_at = None;
                    self.engine.mark_ready(generation);
                    self.sync();
                }
            }
        }

        // Teardown: no countdown may outlive the actor.
        self.countdown = None;
        self.lease = None;
        tracing::info!("session actor stopped");
    }

    /// Returns `false` when the actor should stop.
    fn handle_command(&mut self, cmd: SessionCommand) -> bool {
        match cmd {
            SessionCommand::Initialize { request, reply } => {
                let result = self.engine.initialize_round(&request);
                self.sync();
                let _ = reply.send(result.map(|()| self.engine.state().clone()));
            }
            SessionCommand::Apply { op, reply } => {
                let reset = matches!(op, Operation::ResetGame);
                self.apply(op);
                if reset {
                    self.arm_readiness();
                }
                self.sync();
                let _ = reply.send(self.engine.state().clone());
            }
            SessionCommand::GetImposter { reply } => {
                let _ = reply.send(self.engine.get_imposter());
            }
            SessionCommand::WordsForCategory { category, reply } => {
                let _ = reply.send(self.engine.words_for_category(&category));
            }
            SessionCommand::CategoryNames { reply } => {
                let _ = reply.send(self.engine.category_names());
            }
            SessionCommand::Shutdown => {
                tracing::info!("session shutting down");
                return false;
            }
        }
        true
    }

    fn apply(&mut self, op: Operation) {
        match op {
            Operation::ProceedToNextRoleReveal => self.engine.proceed_to_next_role_reveal(),
            Operation::SetGamePhase(phase) => self.engine.set_game_phase(phase),
            Operation::StartGameTimer => self.engine.start_game_timer(),
            Operation::StopGameTimer => self.engine.stop_game_timer(),
            Operation::SetTimerValue(value) => self.engine.set_timer_value(value),
            Operation::GoToResolutionPhase { reason_key } => {
                self.engine.go_to_resolution_phase(reason_key.as_deref())
            }
            Operation::ChangeSecretWord(word) => self.engine.change_secret_word(&word),
            Operation::EndGame => self.engine.end_game(),
            Operation::ResetGame => self.engine.reset_game(),
        }
    }

    fn arm_readiness(&mut self) {
        let at = Instant::now() + self.engine.config().loading_delay;
        self.ready_at = Some((self.engine.generation(), at));
    }

    /// Reconciles the countdown with the engine's lease, then publishes.
    ///
    /// A changed lease always drops the old countdown before arming the
    /// new one, so at most one countdown exists.
    fn sync(&mut self) {
        let wanted = self.engine.timer_lease();
        if wanted != self.lease {
            self.countdown = None;
            self.countdown = wanted.map(|lease| {
                Countdown::new(
                    lease.generation,
                    TickConfig::with_period(self.engine.config().tick_period),
                )
            });
            self.lease = wanted;
        }
        self.snapshots.send_if_modified(|current| {
            if current == self.engine.state() {
                false
            } else {
                *current = self.engine.state().clone();
                true
            }
        });
    }
}

/// Resolves with the generation once the readiness deadline passes.
/// Pends forever when no deadline is armed.
async fn wait_ready(ready_at: Option<(u64, Instant)>) -> u64 {
    match ready_at {
        Some((generation, at)) => {
            time::sleep_until(at).await;
            generation
        }
        None => std::future::pending().await,
    }
}

/// Spawns a session actor around `engine` and returns its handle.
///
/// The session starts loading and becomes ready after
/// `EngineConfig::loading_delay`. Must be called inside a Tokio runtime.
pub fn spawn_session(engine: Engine) -> SessionHandle {
    let (tx, rx) = mpsc::channel(engine.config().channel_size);
    let (snap_tx, snap_rx) = watch::channel(engine.state().clone());

    let mut actor = SessionActor {
        engine,
        receiver: rx,
        snapshots: snap_tx,
        countdown: None,
        lease: None,
        ready_at: None,
    };
    actor.arm_readiness();

    tokio::spawn(actor.run());

    SessionHandle {
        sender: tx,
        snapshots: snap_rx,
    }
}
