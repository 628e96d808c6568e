//! Game session engine for Impostor.
//!
//! One session runs one round at a time of the pass-the-device party game:
//! roles and a secret word are assigned, each player privately sees their
//! role, a discussion countdown runs, and the round is resolved.
//!
//! # Key types
//!
//! - [`Engine`]: the synchronous state container and its operations
//! - [`spawn_session`] / [`SessionHandle`]: the engine inside a Tokio
//!   actor, with the discussion countdown attached
//! - [`GameState`] / [`GamePhase`]: the published snapshot and its phases
//! - [`SetupDraft`]: the bounded configuration a round is started from
//! - [`EngineConfig`]: timing and default settings
//!
//! # How it fits together
//!
//! ```text
//! SetupDraft ──finish()──→ RoundRequest ──→ SessionHandle ──mpsc──→ actor
//!                                                                   │
//!                       watch::Receiver<GameState> ←──publish── Engine ←── Countdown ticks
//! ```

mod actor;
mod assign;
mod config;
mod engine;
mod error;
mod setup;
mod state;
pub mod transition;

pub use actor::{SessionHandle, spawn_session};
pub use assign::{choose_imposters, pick_word};
pub use config::EngineConfig;
pub use engine::{Engine, TimerLease};
pub use error::SessionError;
pub use setup::{RoundRequest, SetupDraft, SetupLimits, format_round_time};
pub use state::{GamePhase, GameSettings, GameState, Player, Role, default_player_name};
pub use transition::TickOutcome;
