//! Carrom Sim entry point
//!
//! Headless demo driver: predicts the best shot on the reference board,
//! plays it, and runs ticks until the board settles. A real frontend would
//! drive `tick` from its render loop instead.

use carrom_sim::Tuning;
use carrom_sim::sim::{SimEvent, WorldState, predict_best_shot, tick};

fn main() {
    env_logger::init();
    log::info!("Carrom Sim (headless) starting...");

    let mut state = WorldState::new(Tuning::default());

    let Some(plan) = predict_best_shot(&state) else {
        log::warn!("no coins in play, nothing to shoot at");
        return;
    };
    log::info!(
        "aiming at coin {} toward pocket {:?}: angle {:.2} deg",
        plan.coin_id,
        plan.pocket,
        plan.angle_deg
    );

    if let Err(err) = state.apply_shot(plan.angle_deg, 10.0) {
        log::error!("shot rejected: {err}");
        return;
    }

    // Run until the shot plays out and every coin has come to rest
    let mut settled_ticks = 0;
    while settled_ticks < 10_000 {
        let events = tick(&mut state);
        for event in &events {
            match event {
                SimEvent::StrikerStopped => log::info!("striker stopped, controls re-armed"),
                SimEvent::StrikerPocketed => log::info!("striker pocketed, controls re-armed"),
                SimEvent::CoinPocketed { id } => log::info!("coin {id} is out of play"),
            }
        }

        let coins_moving = state
            .coins
            .iter()
            .any(|c| c.active && c.vel.length() > 0.01);
        if !state.striker_in_motion && !coins_moving {
            break;
        }
        settled_ticks += 1;
    }

    log::info!(
        "board settled after {} ticks, {} coins still in play",
        state.time_ticks,
        state.active_coins().count()
    );

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize final state: {err}"),
    }
}
