//! # Impostor
//!
//! Session engine for a local, pass-the-device party game: everyone but
//! the impostor learns a secret word, the device goes round so each player
//! sees their role in private, a countdown runs while the table discusses,
//! and the impostor is revealed.
//!
//! This meta crate re-exports the pieces:
//!
//! - [`impostor_session`]: state machine, role assignment, session actor
//! - [`impostor_words`]: word categories and the provider seam
//! - [`impostor_tick`]: the discussion countdown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use impostor::prelude::*;
//!
//! # async fn run() -> Result<(), ImpostorError> {
//! let session = spawn_session(Engine::new(EngineConfig::default(), Catalog::builtin()));
//!
//! let mut draft = SetupDraft::default();
//! draft.set_player_name(0, "Ann");
//! session.initialize_round(draft.finish()).await?;
//!
//! // Each player acknowledges their role in turn...
//! for _ in 0..draft.player_count() {
//!     session.proceed_to_next_role_reveal().await?;
//! }
//! session.start_game_timer().await?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod logging;

pub use error::ImpostorError;
pub use impostor_session;
pub use impostor_tick;
pub use impostor_words;

pub mod prelude {
    //! Everything a presentation layer usually needs.

    pub use crate::ImpostorError;
    pub use impostor_session::{
        Engine, EngineConfig, GamePhase, GameSettings, GameState, Player, Role, RoundRequest,
        SessionError, SessionHandle, SetupDraft, SetupLimits, format_round_time, spawn_session,
    };
    pub use impostor_words::{Catalog, Category, RANDOM_CATEGORY, WordProvider, WordsError};
}
