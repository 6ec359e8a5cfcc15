mod ground_contact;
mod kart;
mod net;
mod physics;
mod spawn;
mod state;

use crate::net::start_websocket_server;
use crate::physics::PhysicsWorld;
use crate::state::SharedGameState;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{interval, Duration};

#[tokio::main]
async fn main() {
    println!("🚀 Starting Kart Physics Server...");

    let state = Arc::new(Mutex::new(SharedGameState::new()));
    let physics = Arc::new(Mutex::new(PhysicsWorld::new()));

    // Start WebSocket server
    tokio::spawn(start_websocket_server(
        Arc::clone(&state),
        Arc::clone(&physics),
    ));

    // Fixed timestep: 50 Hz (dt = 0.02 s)
    let mut ticker = interval(Duration::from_millis(20));
    const DT: f32 = 1.0 / 50.0;

    loop {
        ticker.tick().await;

        // lock order is state, then physics — every task in net.rs takes
        // them in this order too
        let mut game = state.lock().await;
        let mut phys = physics.lock().await;

        // Forward each entity's last input to its kart
        for entity in game.entities.values() {
            if let Some(ref input) = entity.last_input {
                phys.apply_player_input(&entity.id, input.axes.x, input.axes.y);
            }
        }

        // Step physics (drive ticks + rapier pipeline)
        phys.step(DT);

        // Advance tick + broadcast snapshot
        game.tick += 1;
        game.broadcast_snapshot(&phys);
    }
}
