//! Pure state transitions.
//!
//! Each function takes the previous [`GameState`] and returns the complete
//! replacement. The engine installs the result; nothing here touches the
//! timer handle or the generation counter.

use crate::state::{GamePhase, GameSettings, GameState, Player};

/// What a countdown tick did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running (or the tick belonged to an older
    /// countdown). State unchanged.
    Stale,
    /// One second was taken off the clock.
    Counted,
    /// The clock reached zero while running: timer stopped, `Resolution`.
    Expired,
}

/// Installs a freshly assigned round.
pub fn start_round(
    settings: GameSettings,
    players: Vec<Player>,
    word: String,
) -> GameState {
    let round_time = settings.round_time_secs;
    GameState {
        game_phase: GamePhase::RoleReveal,
        current_category: settings.category_name.clone(),
        settings,
        players,
        current_word: word,
        current_player_turn_for_role_reveal: 0,
        timer_value: round_time,
        is_timer_running: false,
        is_loading: false,
        round_time_secs: round_time,
    }
}

/// Sets the loading flag.
pub fn loading(prev: &GameState, is_loading: bool) -> GameState {
    GameState {
        is_loading,
        ..prev.clone()
    }
}

/// Moves the reveal cursor to the next player.
///
/// Once every player has seen their role the session enters `WordPhase`
/// with a full, stopped clock. Outside `RoleReveal` this is a no-op.
pub fn next_role_reveal(prev: &GameState) -> GameState {
    if prev.game_phase != GamePhase::RoleReveal {
        return prev.clone();
    }
    let player_count = prev.settings.player_count;
    let next_turn = (prev.current_player_turn_for_role_reveal + 1).min(player_count);
    if next_turn < player_count {
        GameState {
            current_player_turn_for_role_reveal: next_turn,
            ..prev.clone()
        }
    } else {
        GameState {
            game_phase: GamePhase::WordPhase,
            current_player_turn_for_role_reveal: next_turn,
            timer_value: prev.settings.round_time_secs,
            is_timer_running: false,
            ..prev.clone()
        }
    }
}

/// Marks the timer as running.
pub fn timer_started(prev: &GameState) -> GameState {
    GameState {
        is_timer_running: true,
        ..prev.clone()
    }
}

/// Marks the timer as stopped.
pub fn timer_stopped(prev: &GameState) -> GameState {
    GameState {
        is_timer_running: false,
        ..prev.clone()
    }
}

/// Overwrites the remaining seconds without touching the run state.
pub fn timer_value(prev: &GameState, value: u32) -> GameState {
    GameState {
        timer_value: value,
        ..prev.clone()
    }
}

/// Applies one countdown tick.
///
/// Reaching zero while running is the only way a tick resolves the round,
/// and because the same step clears `is_timer_running`, it happens once.
pub fn tick(prev: &GameState) -> (GameState, TickOutcome) {
    if !prev.is_timer_running {
        return (prev.clone(), TickOutcome::Stale);
    }
    let remaining = prev.timer_value.saturating_sub(1);
    if remaining > 0 {
        let next = GameState {
            timer_value: remaining,
            ..prev.clone()
        };
        return (next, TickOutcome::Counted);
    }
    let next = GameState {
        timer_value: 0,
        is_timer_running: false,
        game_phase: GamePhase::Resolution,
        ..prev.clone()
    };
    (next, TickOutcome::Expired)
}

/// Stops the clock and enters `Resolution`.
pub fn resolution(prev: &GameState) -> GameState {
    GameState {
        game_phase: GamePhase::Resolution,
        is_timer_running: false,
        ..prev.clone()
    }
}

/// Stops the clock and enters `GameOver`.
pub fn game_over(prev: &GameState) -> GameState {
    GameState {
        game_phase: GamePhase::GameOver,
        is_timer_running: false,
        ..prev.clone()
    }
}

/// Forces a phase.
pub fn phase(prev: &GameState, phase: GamePhase) -> GameState {
    GameState {
        game_phase: phase,
        ..prev.clone()
    }
}

/// Replaces the secret word for the round and for every word-knower.
/// Impostors keep `role_word = None`.
pub fn secret_word(prev: &GameState, new_word: &str) -> GameState {
    let players = prev
        .players
        .iter()
        .map(|p| {
            if p.is_word_knower() {
                Player {
                    role_word: Some(new_word.to_string()),
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect();
    GameState {
        current_word: new_word.to_string(),
        players,
        ..prev.clone()
    }
}
