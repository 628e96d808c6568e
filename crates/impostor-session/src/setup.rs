//! Setup draft: the configuration a round is started from.
//!
//! This is the counting logic behind the setup screens, without any UI. It
//! keeps the player count, impostor count, round time and names within the
//! game's limits and produces a [`RoundRequest`] for the engine.

use impostor_words::RANDOM_CATEGORY;
use serde::{Deserialize, Serialize};

use crate::assign::resolve_name;
use crate::state::default_player_name;

// ---------------------------------------------------------------------------
// SetupLimits
// ---------------------------------------------------------------------------

/// Bounds and defaults for the setup draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupLimits {
    pub min_players: usize,
    pub max_players: usize,
    pub default_players: usize,
    pub default_imposters: usize,
    /// Highest selectable impostor count.
    pub max_imposters: usize,
    /// Player count from which more than one impostor may be chosen.
    pub min_players_for_two_imposters: usize,
    pub min_round_time_secs: u32,
    pub max_round_time_secs: u32,
    pub default_round_time_secs: u32,
    pub round_time_step_secs: u32,
}

impl Default for SetupLimits {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_players: 12,
            default_players: 4,
            default_imposters: 1,
            max_imposters: 2,
            min_players_for_two_imposters: 6,
            min_round_time_secs: 30,
            max_round_time_secs: 600,
            default_round_time_secs: 120,
            round_time_step_secs: 30,
        }
    }
}

impl SetupLimits {
    /// Repair limits the draft could not work with.
    ///
    /// Inverted ranges collapse to their minimum, the round time step is
    /// at least one second and at least one impostor is selectable.
    pub fn validated(mut self) -> Self {
        self.min_players = self.min_players.max(1);
        if self.max_players < self.min_players {
            tracing::warn!(
                min = self.min_players,
                max = self.max_players,
                "max_players below min_players, using min"
            );
            self.max_players = self.min_players;
        }
        if self.max_round_time_secs < self.min_round_time_secs {
            tracing::warn!(
                min = self.min_round_time_secs,
                max = self.max_round_time_secs,
                "max_round_time_secs below min_round_time_secs, using min"
            );
            self.max_round_time_secs = self.min_round_time_secs;
        }
        if self.round_time_step_secs == 0 {
            tracing::warn!("round_time_step_secs must be positive, using 1");
            self.round_time_step_secs = 1;
        }
        self.max_imposters = self.max_imposters.max(1);
        self
    }
}

// ---------------------------------------------------------------------------
// RoundRequest
// ---------------------------------------------------------------------------

/// Everything `initialize_game` needs, as produced by [`SetupDraft::finish`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRequest {
    pub player_count: usize,
    pub imposter_count: usize,
    pub category_name: String,
    pub hint_mode: bool,
    pub round_time_secs: u32,
    /// One name per seat, already trimmed and defaulted.
    pub player_names: Vec<String>,
}

// ---------------------------------------------------------------------------
// SetupDraft
// ---------------------------------------------------------------------------

/// Mutable setup state, edited step by step before a round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupDraft {
    limits: SetupLimits,
    player_count: usize,
    imposter_count: usize,
    player_names: Vec<String>,
    round_time_secs: u32,
    category_name: String,
    hint_enabled: bool,
}

impl Default for SetupDraft {
    fn default() -> Self {
        Self::new(SetupLimits::default())
    }
}

impl SetupDraft {
    /// A draft holding the defaults of `limits`.
    pub fn new(limits: SetupLimits) -> Self {
        let limits = limits.validated();
        let player_count = limits
            .default_players
            .clamp(limits.min_players, limits.max_players);
        let round_time_secs = limits
            .default_round_time_secs
            .clamp(limits.min_round_time_secs, limits.max_round_time_secs);
        let mut draft = Self {
            player_count,
            imposter_count: 1,
            player_names: (0..player_count).map(default_player_name).collect(),
            round_time_secs,
            category_name: RANDOM_CATEGORY.to_string(),
            hint_enabled: true,
            limits,
        };
        draft.select_imposters(draft.limits.default_imposters);
        draft
    }

    pub fn limits(&self) -> &SetupLimits {
        &self.limits
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn imposter_count(&self) -> usize {
        self.imposter_count
    }

    /// Names as typed, one per seat.
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    pub fn round_time_secs(&self) -> u32 {
        self.round_time_secs
    }

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn hint_enabled(&self) -> bool {
        self.hint_enabled
    }

    // -----------------------------------------------------------------------
    // Step 1: players and impostors
    // -----------------------------------------------------------------------

    /// Sets the player count, clamped to the limits.
    ///
    /// The names list follows the new count: non-blank names are kept,
    /// blank and new seats get their positional default. Dropping below
    /// the two-impostor threshold falls back to a single impostor.
    pub fn set_player_count(&mut self, count: usize) {
        let count = count.clamp(self.limits.min_players, self.limits.max_players);
        self.player_count = count;
        self.player_names = (0..count)
            .map(|i| match self.player_names.get(i) {
                Some(name) if !name.trim().is_empty() => name.clone(),
                _ => default_player_name(i),
            })
            .collect();
        if !self.can_select_imposters(self.imposter_count) {
            self.imposter_count = 1;
        }
    }

    pub fn increment_players(&mut self) {
        self.set_player_count(self.player_count + 1);
    }

    pub fn decrement_players(&mut self) {
        self.set_player_count(self.player_count.saturating_sub(1));
    }

    /// Whether `count` impostors may be chosen with the current player count.
    pub fn can_select_imposters(&self, count: usize) -> bool {
        match count {
            0 => false,
            1 => true,
            n => n <= self.limits.max_imposters
                && self.player_count >= self.limits.min_players_for_two_imposters,
        }
    }

    /// Selects the impostor count. Returns `false` (and keeps the previous
    /// choice) if the count is not selectable right now.
    pub fn select_imposters(&mut self, count: usize) -> bool {
        if !self.can_select_imposters(count) {
            return false;
        }
        self.imposter_count = count;
        true
    }

    // -----------------------------------------------------------------------
    // Step 2: names and round time
    // -----------------------------------------------------------------------

    /// Stores the name typed for seat `index`. Out-of-range seats are ignored.
    pub fn set_player_name(&mut self, index: usize, name: &str) {
        if let Some(slot) = self.player_names.get_mut(index) {
            *slot = name.to_string();
        }
    }

    pub fn increment_round_time(&mut self) {
        self.round_time_secs = (self.round_time_secs + self.limits.round_time_step_secs)
            .min(self.limits.max_round_time_secs);
    }

    pub fn decrement_round_time(&mut self) {
        self.round_time_secs = self
            .round_time_secs
            .saturating_sub(self.limits.round_time_step_secs)
            .max(self.limits.min_round_time_secs);
    }

    // -----------------------------------------------------------------------
    // Step 3: category and hints
    // -----------------------------------------------------------------------

    pub fn select_category(&mut self, name: &str) {
        self.category_name = name.to_string();
    }

    pub fn toggle_hint(&mut self) {
        self.hint_enabled = !self.hint_enabled;
    }

    /// The request to start a round with, names trimmed and defaulted.
    pub fn finish(&self) -> RoundRequest {
        RoundRequest {
            player_count: self.player_count,
            imposter_count: self.imposter_count,
            category_name: self.category_name.clone(),
            hint_mode: self.hint_enabled,
            round_time_secs: self.round_time_secs,
            player_names: (0..self.player_count)
                .map(|i| resolve_name(Some(self.player_names.as_slice()), i))
                .collect(),
        }
    }
}

/// Renders seconds as `m:ss`.
pub fn format_round_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft() {
        let draft = SetupDraft::default();
        assert_eq!(draft.player_count(), 4);
        assert_eq!(draft.imposter_count(), 1);
        assert_eq!(draft.round_time_secs(), 120);
        assert_eq!(draft.category_name(), RANDOM_CATEGORY);
        assert!(draft.hint_enabled());
        assert_eq!(
            draft.player_names(),
            ["Player 1", "Player 2", "Player 3", "Player 4"]
        );
    }

    #[test]
    fn test_inverted_limits_are_repaired() {
        let limits = SetupLimits {
            min_players: 5,
            max_players: 2,
            min_round_time_secs: 90,
            max_round_time_secs: 60,
            round_time_step_secs: 0,
            ..SetupLimits::default()
        };
        let mut draft = SetupDraft::new(limits);
        assert_eq!(draft.limits().max_players, 5);
        assert_eq!(draft.player_count(), 5);
        assert_eq!(draft.round_time_secs(), 90);
        draft.increment_round_time();
        assert_eq!(draft.round_time_secs(), 90);
    }

    #[test]
    fn test_player_count_stays_within_limits() {
        let mut draft = SetupDraft::default();
        for _ in 0..20 {
            draft.decrement_players();
        }
        assert_eq!(draft.player_count(), 3);
        for _ in 0..20 {
            draft.increment_players();
        }
        assert_eq!(draft.player_count(), 12);
        assert_eq!(draft.player_names().len(), 12);
    }

    #[test]
    fn test_two_imposters_need_six_players() {
        let mut draft = SetupDraft::default();
        assert!(!draft.select_imposters(2));
        assert_eq!(draft.imposter_count(), 1);

        draft.set_player_count(6);
        assert!(draft.select_imposters(2));
        assert_eq!(draft.imposter_count(), 2);

        assert!(!draft.select_imposters(3), "above max_imposters");
        assert!(!draft.select_imposters(0));
        assert_eq!(draft.imposter_count(), 2);
    }

    #[test]
    fn test_dropping_below_threshold_demotes_to_one_imposter() {
        let mut draft = SetupDraft::default();
        draft.set_player_count(6);
        draft.select_imposters(2);

        draft.decrement_players();

        assert_eq!(draft.player_count(), 5);
        assert_eq!(draft.imposter_count(), 1);
    }

    #[test]
    fn test_names_follow_player_count() {
        let mut draft = SetupDraft::default();
        draft.set_player_name(0, "Ann");
        draft.set_player_name(1, "  ");

        draft.set_player_count(5);
        assert_eq!(draft.player_names()[0], "Ann");
        assert_eq!(draft.player_names()[1], "Player 2", "blank name refilled");
        assert_eq!(draft.player_names()[4], "Player 5");

        draft.set_player_count(3);
        assert_eq!(draft.player_names().len(), 3);
        assert_eq!(draft.player_names()[0], "Ann");
    }

    #[test]
    fn test_set_player_name_ignores_unknown_seat() {
        let mut draft = SetupDraft::default();
        draft.set_player_name(10, "Ghost");
        assert_eq!(draft.player_names().len(), 4);
    }

    #[test]
    fn test_round_time_steps_and_bounds() {
        let mut draft = SetupDraft::default();
        draft.increment_round_time();
        assert_eq!(draft.round_time_secs(), 150);
        for _ in 0..40 {
            draft.increment_round_time();
        }
        assert_eq!(draft.round_time_secs(), 600);
        for _ in 0..40 {
            draft.decrement_round_time();
        }
        assert_eq!(draft.round_time_secs(), 30);
    }

    #[test]
    fn test_finish_trims_and_defaults_names() {
        let mut draft = SetupDraft::default();
        draft.set_player_name(0, "  Ann  ");
        draft.set_player_name(2, "");
        draft.select_category("Animals");
        draft.toggle_hint();

        let request = draft.finish();

        assert_eq!(request.player_count, 4);
        assert_eq!(request.player_names, ["Ann", "Player 2", "Player 3", "Player 4"]);
        assert_eq!(request.category_name, "Animals");
        assert!(!request.hint_mode);
        assert_eq!(request.round_time_secs, 120);
    }

    #[test]
    fn test_format_round_time() {
        assert_eq!(format_round_time(120), "2:00");
        assert_eq!(format_round_time(90), "1:30");
        assert_eq!(format_round_time(5), "0:05");
        assert_eq!(format_round_time(600), "10:00");
    }
}
