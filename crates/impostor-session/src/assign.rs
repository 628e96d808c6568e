//! Role and secret-word assignment.

use std::collections::BTreeSet;

use rand::Rng;

use crate::state::{Player, Role, default_player_name, player_id};

/// Picks the secret word uniformly from `pool`. `None` if the pool is empty.
pub fn pick_word<R: Rng + ?Sized>(rng: &mut R, pool: &[String]) -> Option<String> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.random_range(0..pool.len())].clone())
}

/// Chooses `min(imposter_count, player_count)` distinct seat indices.
///
/// Rejection sampling: draw a uniform index and insert it into the set
/// until the set is large enough. Repeated draws are discarded.
pub fn choose_imposters<R: Rng + ?Sized>(
    rng: &mut R,
    player_count: usize,
    imposter_count: usize,
) -> BTreeSet<usize> {
    let target = imposter_count.min(player_count);
    let mut chosen = BTreeSet::new();
    while chosen.len() < target {
        chosen.insert(rng.random_range(0..player_count));
    }
    chosen
}

/// Resolves the display name of seat `index`.
///
/// Uses the trimmed caller-supplied name when it is present and not blank,
/// the positional default otherwise.
pub fn resolve_name(names: Option<&[String]>, index: usize) -> String {
    names
        .and_then(|names| names.get(index))
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_player_name(index))
}

/// Builds the ordered seat list for a round.
pub fn build_players(
    player_count: usize,
    imposters: &BTreeSet<usize>,
    word: &str,
    names: Option<&[String]>,
) -> Vec<Player> {
    (0..player_count)
        .map(|index| {
            let is_imposter = imposters.contains(&index);
            Player {
                id: player_id(index),
                name: resolve_name(names, index),
                role: if is_imposter { Role::ArchEnemy } else { Role::WordKnower },
                is_imposter,
                role_word: (!is_imposter).then(|| word.to_string()),
                fellow_arch_enemies: Vec::new(),
            }
        })
        .collect()
}
