use std::time::Duration;

use impostor::prelude::*;

// ---------------------------------------------------------------------------
// Scripted table
// ---------------------------------------------------------------------------

const NAMES: [&str; 5] = ["Ann", "Bo", "Cid", "", "Eve"];

/// Discussion seconds pass this fast in the demo.
const DEMO_TICK: Duration = Duration::from_millis(100);

fn setup() -> SetupDraft {
    let mut draft = SetupDraft::default();
    draft.set_player_count(NAMES.len());
    for (seat, name) in NAMES.iter().enumerate() {
        draft.set_player_name(seat, name);
    }
    draft.select_category("Animals");
    // 120 s → 60 s
    draft.decrement_round_time();
    draft.decrement_round_time();
    draft
}

fn describe(player: &Player) -> String {
    match &player.role_word {
        Some(word) => format!("{} knows the word: {word}", player.name),
        None => format!("{} is the impostor", player.name),
    }
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), ImpostorError> {
    impostor::logging::init()?;

    let config = EngineConfig {
        tick_period: DEMO_TICK,
        ..EngineConfig::default()
    };
    let session = spawn_session(Engine::new(config, Catalog::builtin()));

    let draft = setup();
    println!(
        "{} players, {} impostor(s), {} on the clock",
        draft.player_count(),
        draft.imposter_count(),
        format_round_time(draft.round_time_secs())
    );
    session.initialize_round(draft.finish()).await?;

    // Pass the device around.
    loop {
        let state = session.snapshot();
        let Some(player) = state.current_reveal_player() else {
            break;
        };
        println!("  [{}] {}", player.id, describe(player));
        session.proceed_to_next_role_reveal().await?;
    }

    session.start_game_timer().await?;
    let mut updates = session.subscribe();
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        if state.timer_value % 10 == 0 {
            println!("  discussion: {} left", format_round_time(state.timer_value));
        }
        if state.game_phase == GamePhase::Resolution {
            break;
        }
    }

    if let Some(imposter) = session.get_imposter().await? {
        println!("time is up, the impostor was {}", imposter.name);
    }
    session.end_game().await?;

    let final_state = session.snapshot();
    match serde_json::to_string_pretty(&final_state.players) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("could not render players: {e}"),
    }

    session.shutdown().await?;
    Ok(())
}
