//! The session engine: owns the state, the generation counter and the
//! timer lease.
//!
//! `Engine` is synchronous. It knows *that* a countdown should be running
//! (its [`TimerLease`]) but not how to run one; the actor in
//! [`crate::actor`] turns the lease into an `impostor_tick::Countdown` and
//! feeds ticks back through [`Engine::tick`]. Embedders without Tokio can
//! drive `tick` from their own one-second timer.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace, warn};

use impostor_words::WordProvider;

use crate::assign;
use crate::setup::RoundRequest;
use crate::state::{GamePhase, GameSettings, GameState, Player};
use crate::transition::{self, TickOutcome};
use crate::{EngineConfig, SessionError};

/// Identifies the countdown the engine currently wants to be running.
///
/// `generation` is the session generation at arm time; `serial` changes on
/// every arm so a stop-then-start inside one round still replaces the
/// countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerLease {
    pub generation: u64,
    pub serial: u64,
}

/// Single-session state container.
pub struct Engine {
    config: EngineConfig,
    state: GameState,
    /// Bumped by `initialize_game` and `reset_game`.
    generation: u64,
    lease: Option<TimerLease>,
    next_serial: u64,
    words: Box<dyn WordProvider>,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine in the initial (`SetupStep1`, loading) state.
    pub fn new(config: EngineConfig, words: impl WordProvider) -> Self {
        Self::with_rng(config, words, StdRng::from_os_rng())
    }

    /// Same as [`Engine::new`] with a caller-supplied RNG.
    pub fn with_rng(config: EngineConfig, words: impl WordProvider, rng: StdRng) -> Self {
        let config = config.validated();
        Self {
            state: GameState::initial(&config),
            config,
            generation: 0,
            lease: None,
            next_serial: 0,
            words: Box::new(words),
            rng,
        }
    }

    /// Deterministic engine for tests and replays.
    pub fn seeded(config: EngineConfig, words: impl WordProvider, seed: u64) -> Self {
        Self::with_rng(config, words, StdRng::seed_from_u64(seed))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The countdown that should be live, if any.
    pub fn timer_lease(&self) -> Option<TimerLease> {
        self.lease
    }

    /// The first impostor, or `None` if nobody is one.
    pub fn get_imposter(&self) -> Option<Player> {
        self.state.imposter().cloned()
    }

    /// Candidate words for a category (random / unknown → all words).
    pub fn words_for_category(&self, category: &str) -> Vec<String> {
        self.words.words_for(category)
    }

    /// Category names offered by the word provider.
    pub fn category_names(&self) -> Vec<String> {
        self.words.category_names()
    }

    // -----------------------------------------------------------------------
    // Round setup
    // -----------------------------------------------------------------------

    /// Starts a new round: assigns roles and a secret word, enters `RoleReveal`.
    ///
    /// Count bounds are the caller's responsibility; only the impostor
    /// count is clamped to the player count.
    ///
    /// # Errors
    /// [`SessionError::EmptyWordPool`] if the category resolves to no words.
    /// The state is then left in its previous phase with the timer stopped
    /// and `is_loading = false`.
    pub fn initialize_game(
        &mut self,
        player_count: usize,
        imposter_count: usize,
        category_name: &str,
        hint_mode: bool,
        round_time_secs: u32,
        player_names: Option<&[String]>,
    ) -> Result<(), SessionError> {
        info!(
            player_count,
            imposter_count,
            category = category_name,
            hint_mode,
            round_time_secs,
            "initializing round"
        );
        if self.state.game_phase.is_in_round() {
            debug!(phase = %self.state.game_phase, "replacing a round in progress");
        }
        self.cancel_timer();
        self.generation += 1;
        self.install(transition::loading(&transition::timer_stopped(&self.state), true));

        let pool = self.words.words_for(category_name);
        let Some(word) = assign::pick_word(&mut self.rng, &pool) else {
            warn!(category = category_name, "word pool is empty, round not started");
            self.install(transition::loading(&self.state, false));
            return Err(SessionError::EmptyWordPool(category_name.to_string()));
        };

        let settings = GameSettings {
            player_count,
            category_name: category_name.to_string(),
            round_time_secs,
            imposter_count,
            hint_mode_enabled: hint_mode,
        };
        let imposters =
            assign::choose_imposters(&mut self.rng, player_count, settings.effective_imposter_count());
        let players = assign::build_players(player_count, &imposters, &word, player_names);

        debug!(
            generation = self.generation,
            imposters = imposters.len(),
            pool = pool.len(),
            "roles assigned"
        );
        self.install(transition::start_round(settings, players, word));
        Ok(())
    }

    /// [`Engine::initialize_game`] from a finished setup draft.
    pub fn initialize_round(&mut self, request: &RoundRequest) -> Result<(), SessionError> {
        self.initialize_game(
            request.player_count,
            request.imposter_count,
            &request.category_name,
            request.hint_mode,
            request.round_time_secs,
            Some(request.player_names.as_slice()),
        )
    }

    /// Clears `is_loading` if `generation` is still current.
    ///
    /// Returns `false` for a readiness deadline from an older generation.
    pub fn mark_ready(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            trace!(generation, current = self.generation, "stale readiness ignored");
            return false;
        }
        self.install(transition::loading(&self.state, false));
        true
    }

    // -----------------------------------------------------------------------
    // Role reveal
    // -----------------------------------------------------------------------

    /// The current player acknowledged their role.
    pub fn proceed_to_next_role_reveal(&mut self) {
        let next = transition::next_role_reveal(&self.state);
        debug!(
            turn = next.current_player_turn_for_role_reveal,
            phase = %next.game_phase,
            "role reveal advanced"
        );
        self.install(next);
    }

    // -----------------------------------------------------------------------
    // Timer
    // -----------------------------------------------------------------------

    /// Starts the discussion countdown.
    ///
    /// No-op while already running or with no time left.
    pub fn start_game_timer(&mut self) {
        if self.state.is_timer_running || self.state.timer_value == 0 {
            trace!(
                running = self.state.is_timer_running,
                value = self.state.timer_value,
                "start_game_timer ignored"
            );
            return;
        }
        self.cancel_timer();
        self.next_serial += 1;
        self.lease = Some(TimerLease {
            generation: self.generation,
            serial: self.next_serial,
        });
        info!(generation = self.generation, value = self.state.timer_value, "timer started");
        self.install(transition::timer_started(&self.state));
    }

    /// Cancels the countdown. Idempotent.
    pub fn stop_game_timer(&mut self) {
        self.cancel_timer();
        self.install(transition::timer_stopped(&self.state));
    }

    /// Overwrites the remaining seconds; the run state is unchanged.
    pub fn set_timer_value(&mut self, value: u32) {
        self.install(transition::timer_value(&self.state, value));
    }

    /// Applies one countdown tick armed for `generation`.
    ///
    /// Ticks from a superseded round, or arriving after the timer was
    /// stopped, are ignored and release the lease.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        let current = self.lease.is_some_and(|lease| lease.generation == generation);
        if !current || generation != self.generation {
            trace!(generation, current = self.generation, "stale tick ignored");
            return TickOutcome::Stale;
        }
        let (next, outcome) = transition::tick(&self.state);
        match outcome {
            TickOutcome::Counted => trace!(value = next.timer_value, "timer tick"),
            TickOutcome::Expired => {
                info!(generation, "timer expired, entering resolution");
                self.lease = None;
            }
            TickOutcome::Stale => self.lease = None,
        }
        self.install(next);
        outcome
    }

    // -----------------------------------------------------------------------
    // Phase control
    // -----------------------------------------------------------------------

    /// Stops the timer and enters `Resolution`.
    ///
    /// `reason_key` is only logged.
    pub fn go_to_resolution_phase(&mut self, reason_key: Option<&str>) {
        info!(reason = reason_key.unwrap_or("manual"), "entering resolution");
        self.cancel_timer();
        self.install(transition::resolution(&self.state));
    }

    /// Stops the timer and enters `GameOver`.
    pub fn end_game(&mut self) {
        info!(generation = self.generation, "game over");
        self.cancel_timer();
        self.install(transition::game_over(&self.state));
    }

    /// Cancels the timer and restores the initial state.
    pub fn reset_game(&mut self) {
        info!(generation = self.generation, "resetting session");
        self.cancel_timer();
        self.generation += 1;
        self.install(GameState::initial(&self.config));
    }

    /// Forces a phase, bypassing the regular sequence.
    pub fn set_game_phase(&mut self, phase: GamePhase) {
        if !self.state.game_phase.can_transition_to(phase) {
            debug!(from = %self.state.game_phase, to = %phase, "phase override outside regular order");
        }
        self.install(transition::phase(&self.state, phase));
    }

    /// Replaces the secret word for the round and for every word-knower.
    pub fn change_secret_word(&mut self, new_word: &str) {
        debug!("secret word changed");
        self.install(transition::secret_word(&self.state, new_word));
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn cancel_timer(&mut self) {
        if let Some(lease) = self.lease.take() {
            debug!(generation = lease.generation, serial = lease.serial, "timer cancelled");
        }
    }

    fn install(&mut self, next: GameState) {
        if next.game_phase != self.state.game_phase {
            info!(from = %self.state.game_phase, to = %next.game_phase, "phase changed");
        }
        self.state = next;
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("generation", &self.generation)
            .field("phase", &self.state.game_phase)
            .field("lease", &self.lease)
            .finish_non_exhaustive()
    }
}
