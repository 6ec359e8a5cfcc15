// ---------------------------------------------
// PLAYER IDS + STARTING-GRID PLACEMENT
// ---------------------------------------------
use rand::Rng;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PlayerSpawnInfo {
    pub player_id: String,
    pub position: [f32; 3],
}

/// Hands out grid slots two abreast, newest row at the back, with a little
/// lateral jitter so karts never stack exactly.
pub struct SpawnManager {
    next_slot: usize,
}

impl SpawnManager {
    pub fn new() -> Self {
        Self { next_slot: 0 }
    }

    pub fn create_player_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    pub fn allocate_spawn(&mut self) -> PlayerSpawnInfo {
        let slot = self.next_slot;
        self.next_slot += 1;

        let row = (slot / 2) as f32;
        let col = (slot % 2) as f32;

        let jitter: f32 = rand::thread_rng().gen_range(-0.3..0.3);

        // SPAWN POSITION (0.6 up: drops onto the slab and settles)
        let position = [col * 3.0 - 1.5 + jitter, 0.6, -row * 3.0];

        PlayerSpawnInfo {
            player_id: self.create_player_id(),
            position,
        }
    }
}
