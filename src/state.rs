use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

use crate::physics::PhysicsWorld;
use crate::spawn::SpawnManager;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Axes {
    pub x: f32, // turn, -1..1
    pub y: f32, // throttle, -1..1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityInput {
    pub tick: u64,
    pub axes: Axes,
}

pub struct Entity {
    pub id: String,
    pub last_input: Option<EntityInput>,
}

#[derive(Serialize)]
pub struct KartSnapshot {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rot: [f32; 4], // quaternion (i, j, k, w)
    pub speed_fraction: f32,
    pub ground_percent: f32,
}

#[derive(Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub karts: Vec<KartSnapshot>,
}

pub struct SharedGameState {
    pub tick: u64,
    pub clients: Vec<UnboundedSender<String>>,
    pub entities: HashMap<String, Entity>,
    pub spawner: SpawnManager,
}

impl SharedGameState {
    pub fn new() -> Self {
        Self {
            tick: 0,
            clients: Vec::new(),
            entities: HashMap::new(),
            spawner: SpawnManager::new(),
        }
    }

    pub fn register_client(&mut self, tx: UnboundedSender<String>) {
        self.clients.push(tx);
    }

    pub fn add_entity(&mut self, id: String) {
        self.entities.insert(
            id.clone(),
            Entity {
                id,
                last_input: None,
            },
        );
    }

    pub fn update_input(&mut self, id: &str, axes: Axes, tick: u64) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.last_input = Some(EntityInput { tick, axes });
        }
    }

    pub fn remove_entity(&mut self, id: &str) {
        self.entities.remove(id);
    }

    /// Build and send a snapshot of all karts to all clients. Senders whose
    /// receiving task has gone away are pruned here, so `clients` never
    /// accumulates dead entries across disconnects.
    pub fn broadcast_snapshot(&mut self, phys: &PhysicsWorld) {
        let mut karts = Vec::with_capacity(phys.karts.len());

        for (id, kart) in &phys.karts {
            if let Some(body) = phys.bodies.get(kart.body) {
                let pos = body.translation();
                let rot = body.position().rotation;
                karts.push(KartSnapshot {
                    id: id.clone(),
                    x: pos.x,
                    y: pos.y,
                    z: pos.z,
                    rot: [rot.i, rot.j, rot.k, rot.w],
                    speed_fraction: kart.local_speed(&phys.bodies),
                    ground_percent: kart.ground_percent,
                });
            }
        }

        let json = serde_json::to_string(&Snapshot {
            tick: self.tick,
            karts,
        })
        .unwrap();

        self.clients.retain(|tx| tx.send(json.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicsWorld;
    use tokio::sync::mpsc;

    #[test]
    fn broadcast_prunes_disconnected_clients() {
        let mut game = SharedGameState::new();
        let phys = PhysicsWorld::new();

        let (live_tx, mut live_rx) = mpsc::unbounded_channel();
        let (dead_tx, dead_rx) = mpsc::unbounded_channel();
        game.register_client(live_tx);
        game.register_client(dead_tx);
        drop(dead_rx);

        game.broadcast_snapshot(&phys);

        assert_eq!(game.clients.len(), 1);
        assert!(live_rx.try_recv().is_ok());

        // pruned entries stay gone on later broadcasts
        game.broadcast_snapshot(&phys);
        assert_eq!(game.clients.len(), 1);
        assert!(live_rx.try_recv().is_ok());
    }
}
