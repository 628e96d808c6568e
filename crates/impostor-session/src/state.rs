//! The game state model.
//!
//! [`GameState`] is the single aggregate the engine owns. It is never
//! edited field by field from outside: every operation builds a complete
//! replacement from the previous value (see [`crate::transition`]).

use std::fmt;

use impostor_words::RANDOM_CATEGORY;
use serde::{Deserialize, Serialize};

use crate::EngineConfig;

// ---------------------------------------------------------------------------
// GamePhase
// ---------------------------------------------------------------------------

/// The phase of a session.
///
/// The regular sequence of a round:
///
/// ```text
/// SetupStep1 → RoleReveal → WordPhase → Resolution → GameOver
///      ↑                                     │            │
///      └──────────────(reset_game)───────────┴────────────┘
/// ```
///
/// - **SetupStep1**: no round configured. Initial phase and reset target.
/// - **RoleReveal**: the device is passed around; each player privately
///   sees their role and, unless they are an impostor, the secret word.
/// - **WordPhase**: timed discussion.
/// - **Resolution**: the impostor is revealed.
/// - **GameOver**: the round ended; only a reset leaves this phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GamePhase {
    #[default]
    #[serde(rename = "setup_step1")]
    SetupStep1,
    RoleReveal,
    WordPhase,
    Resolution,
    GameOver,
}

impl GamePhase {
    /// The next phase in the regular sequence, `None` for `GameOver`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::SetupStep1 => Some(Self::RoleReveal),
            Self::RoleReveal => Some(Self::WordPhase),
            Self::WordPhase => Some(Self::Resolution),
            Self::Resolution => Some(Self::GameOver),
            Self::GameOver => None,
        }
    }

    /// Returns `true` if `target` follows the regular sequence or is a reset.
    pub fn can_transition_to(self, target: Self) -> bool {
        target == Self::SetupStep1 || self.next() == Some(target)
    }

    /// Returns `true` while a round is configured and not yet over.
    pub fn is_in_round(self) -> bool {
        matches!(self, Self::RoleReveal | Self::WordPhase | Self::Resolution)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetupStep1 => write!(f, "setup_step1"),
            Self::RoleReveal => write!(f, "RoleReveal"),
            Self::WordPhase => write!(f, "WordPhase"),
            Self::Resolution => write!(f, "Resolution"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// A player's secret role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Knows the secret word.
    WordKnower,
    /// The impostor: does not know the word.
    ArchEnemy,
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable id, `player-1` for the first seat.
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Mirrors `role == Role::ArchEnemy`.
    pub is_imposter: bool,
    /// The secret word; `None` for impostors.
    pub role_word: Option<String>,
    /// Reserved for impostors that know each other. Always empty.
    pub fellow_arch_enemies: Vec<String>,
}

impl Player {
    pub fn is_word_knower(&self) -> bool {
        self.role == Role::WordKnower
    }
}

/// Positional label used when a player name is missing or blank.
pub fn default_player_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

/// Stable id of the player at `index`.
pub fn player_id(index: usize) -> String {
    format!("player-{}", index + 1)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Round settings, fixed once a round is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub player_count: usize,
    /// Category name, or [`RANDOM_CATEGORY`] for all categories.
    pub category_name: String,
    pub round_time_secs: u32,
    /// Requested impostors. The effective count is clamped to `player_count`.
    pub imposter_count: usize,
    /// Informational only; the presentation layer decides what a hint is.
    pub hint_mode_enabled: bool,
}

impl GameSettings {
    /// `min(imposter_count, player_count)`.
    pub fn effective_imposter_count(&self) -> usize {
        self.imposter_count.min(self.player_count)
    }

    /// Settings shown before any round is configured.
    pub fn initial(config: &EngineConfig) -> Self {
        Self {
            player_count: 3,
            category_name: RANDOM_CATEGORY.to_string(),
            round_time_secs: config.default_round_time_secs,
            imposter_count: config.default_imposter_count,
            hint_mode_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// Full snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_phase: GamePhase,
    pub settings: GameSettings,
    /// Seats in reveal order. Empty until a round is initialized.
    pub players: Vec<Player>,
    /// Index of the player whose role is being revealed,
    /// `0..=settings.player_count`.
    pub current_player_turn_for_role_reveal: usize,
    pub current_word: String,
    pub current_category: String,
    /// Remaining discussion seconds.
    pub timer_value: u32,
    pub is_timer_running: bool,
    /// `true` while the session is (re)initializing.
    pub is_loading: bool,
    /// What the discussion timer resets to.
    pub round_time_secs: u32,
}

impl GameState {
    /// The shape a session starts in, and returns to on reset.
    pub fn initial(config: &EngineConfig) -> Self {
        Self {
            game_phase: GamePhase::SetupStep1,
            settings: GameSettings::initial(config),
            players: Vec::new(),
            current_player_turn_for_role_reveal: 0,
            current_word: String::new(),
            current_category: RANDOM_CATEGORY.to_string(),
            timer_value: config.default_round_time_secs,
            is_timer_running: false,
            is_loading: true,
            round_time_secs: config.default_round_time_secs,
        }
    }

    /// The first impostor, if any.
    pub fn imposter(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_imposter)
    }

    /// All impostors, in seat order.
    pub fn imposters(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_imposter)
    }

    /// The player whose role is currently being revealed.
    pub fn current_reveal_player(&self) -> Option<&Player> {
        if self.game_phase != GamePhase::RoleReveal {
            return None;
        }
        self.players.get(self.current_player_turn_for_role_reveal)
    }
}
