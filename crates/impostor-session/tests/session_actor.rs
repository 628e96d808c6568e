//! Integration tests for the session actor and its handle.
//!
//! All timer tests run with `start_paused = true`: Tokio auto-advances the
//! clock whenever every task is idle, so countdown ticks fire instantly and
//! deterministically.

use std::time::Duration;

use impostor_session::{
    Engine, EngineConfig, GamePhase, SessionError, SessionHandle, SetupDraft, spawn_session,
};
use impostor_words::{Catalog, RANDOM_CATEGORY};

// =========================================================================
// Helpers
// =========================================================================

fn spawn() -> SessionHandle {
    spawn_session(Engine::seeded(EngineConfig::default(), Catalog::builtin(), 99))
}

fn names(list: &[&str]) -> Option<Vec<String>> {
    Some(list.iter().map(|n| n.to_string()).collect())
}

/// Spawns a session and walks a two-player round into `WordPhase`.
async fn word_phase(round_time: u32) -> SessionHandle {
    let session = spawn();
    session
        .initialize_game(2, 1, RANDOM_CATEGORY, false, round_time, None)
        .await
        .unwrap();
    session.proceed_to_next_role_reveal().await.unwrap();
    let state = session.proceed_to_next_role_reveal().await.unwrap();
    assert_eq!(state.game_phase, GamePhase::WordPhase);
    session
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_session_becomes_ready_after_loading_delay() {
    let session = spawn();
    let state = session.snapshot();
    assert!(state.is_loading);
    assert_eq!(state.game_phase, GamePhase::SetupStep1);

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(!session.snapshot().is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_reset_reloads_then_becomes_ready() {
    let session = word_phase(60).await;

    let state = session.reset_game().await.unwrap();
    assert!(state.is_loading);
    assert_eq!(state.game_phase, GamePhase::SetupStep1);
    assert!(state.players.is_empty());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!session.snapshot().is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_initialize_publishes_round() {
    let session = spawn();
    let mut updates = session.subscribe();

    session
        .initialize_game(4, 1, RANDOM_CATEGORY, true, 120, names(&["Ann", "Bo", "Cid", "Dee"]))
        .await
        .unwrap();

    updates
        .wait_for(|s| s.game_phase == GamePhase::RoleReveal)
        .await
        .unwrap();
    let state = session.snapshot();
    assert_eq!(state.players.len(), 4);
    assert_eq!(state.players[3].name, "Dee");
    assert_eq!(state.imposters().count(), 1);
    assert_eq!(state.timer_value, 120);
}

#[tokio::test(start_paused = true)]
async fn test_initialize_round_from_setup_draft() {
    let session = spawn();
    let mut draft = SetupDraft::default();
    draft.set_player_count(6);
    assert!(draft.select_imposters(2));

    let state = session.initialize_round(draft.finish()).await.unwrap();

    assert_eq!(state.players.len(), 6);
    assert_eq!(state.imposters().count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_empty_word_pool_reports_without_advancing() {
    let session = spawn_session(Engine::seeded(EngineConfig::default(), Catalog::default(), 1));

    let result = session
        .initialize_game(4, 1, "Unknown", false, 60, None)
        .await;

    assert_eq!(result, Err(SessionError::EmptyWordPool("Unknown".into())));
    let state = session.snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.game_phase, GamePhase::SetupStep1);
}

// =========================================================================
// Countdown
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_countdown_from_two_resolves_after_two_seconds() {
    let session = word_phase(60).await;
    session.set_timer_value(2).await.unwrap();
    let start = tokio::time::Instant::now();

    let state = session.start_game_timer().await.unwrap();
    assert!(state.is_timer_running);

    let mut updates = session.subscribe();
    let resolved = updates
        .wait_for(|s| s.game_phase == GamePhase::Resolution)
        .await
        .unwrap()
        .clone();

    assert_eq!(start.elapsed(), Duration::from_secs(2));
    assert_eq!(resolved.timer_value, 0);
    assert!(!resolved.is_timer_running);
}

#[tokio::test(start_paused = true)]
async fn test_countdown_decrements_once_per_second() {
    let session = word_phase(30).await;
    session.start_game_timer().await.unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let state = session.snapshot();
    assert_eq!(state.timer_value, 27);
    assert!(state.is_timer_running);
    assert_eq!(state.game_phase, GamePhase::WordPhase);
}

#[tokio::test(start_paused = true)]
async fn test_stop_freezes_the_clock() {
    let session = word_phase(30).await;
    session.start_game_timer().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let stopped = session.stop_game_timer().await.unwrap();
    let again = session.stop_game_timer().await.unwrap();
    assert_eq!(stopped, again);

    tokio::time::sleep(Duration::from_secs(10)).await;
    let state = session.snapshot();
    assert_eq!(state.timer_value, 29);
    assert!(!state.is_timer_running);
}

#[tokio::test(start_paused = true)]
async fn test_restart_replaces_the_countdown() {
    let session = word_phase(30).await;
    session.start_game_timer().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    session.stop_game_timer().await.unwrap();
    session.start_game_timer().await.unwrap();

    // The first countdown would have ticked at 2.0 s; the new one ticks at 2.5 s.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(session.snapshot().timer_value, 29);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(session.snapshot().timer_value, 28);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_live_countdown() {
    let session = word_phase(5).await;
    session.start_game_timer().await.unwrap();

    session.reset_game().await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let state = session.snapshot();
    assert_eq!(state.game_phase, GamePhase::SetupStep1);
    assert_eq!(state.timer_value, 120);
    assert!(!state.is_timer_running);
}

#[tokio::test(start_paused = true)]
async fn test_manual_resolution_stops_countdown() {
    let session = word_phase(30).await;
    session.start_game_timer().await.unwrap();

    let state = session.go_to_resolution_phase(Some("vote")).await.unwrap();
    assert_eq!(state.game_phase, GamePhase::Resolution);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(session.snapshot().timer_value, 30);
}

// =========================================================================
// Round wrap-up
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_full_round_to_game_over_and_back() {
    let session = word_phase(60).await;
    session.go_to_resolution_phase(None).await.unwrap();

    let imposter = session.get_imposter().await.unwrap();
    assert!(imposter.is_some_and(|p| p.is_imposter));

    let state = session.end_game().await.unwrap();
    assert_eq!(state.game_phase, GamePhase::GameOver);

    let state = session.reset_game().await.unwrap();
    assert_eq!(state.game_phase, GamePhase::SetupStep1);
}

#[tokio::test(start_paused = true)]
async fn test_change_secret_word_through_handle() {
    let session = word_phase(60).await;

    let state = session.change_secret_word("Harbor").await.unwrap();

    assert_eq!(state.current_word, "Harbor");
    let knower = state.players.iter().find(|p| !p.is_imposter).unwrap();
    assert_eq!(knower.role_word.as_deref(), Some("Harbor"));
}

#[tokio::test(start_paused = true)]
async fn test_set_game_phase_and_word_queries() {
    let session = spawn();

    let state = session.set_game_phase(GamePhase::GameOver).await.unwrap();
    assert_eq!(state.game_phase, GamePhase::GameOver);

    assert_eq!(session.category_names().await.unwrap().len(), 4);
    assert_eq!(session.words_for_category("Animals").await.unwrap().len(), 8);
}

// =========================================================================
// Teardown
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_handle_after_shutdown_is_unavailable() {
    let session = word_phase(30).await;
    session.start_game_timer().await.unwrap();

    session.shutdown().await.unwrap();
    let result = session.proceed_to_next_role_reveal().await;

    assert_eq!(result, Err(SessionError::Unavailable));
    assert!(session.is_closed());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_last_handle_stops_actor() {
    let session = spawn();
    let mut updates = session.subscribe();

    drop(session);

    // The actor drops its watch sender when it stops.
    let result = tokio::time::timeout(Duration::from_secs(1), async {
        while updates.changed().await.is_ok() {}
    })
    .await;
    assert!(result.is_ok(), "actor should stop once every handle is gone");
}
