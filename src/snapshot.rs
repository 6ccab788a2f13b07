//! Render snapshot
//!
//! Plain-data view of the active world handed to the external renderer once
//! per tick. The core never draws; it only says what is where.

use serde::Serialize;

use crate::Location;
use crate::sim::{EntityKind, Tick, World};

/// Identity tag the renderer maps to a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteTag {
    Player,
    Collectible,
    Hazard,
}

impl From<EntityKind> for SpriteTag {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Collectible => SpriteTag::Collectible,
            EntityKind::Hazard => SpriteTag::Hazard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub tag: SpriteTag,
    /// Entity ID (None for the player)
    pub id: Option<u32>,
    pub location: Location,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub tick: Tick,
    pub world: String,
    pub score: i64,
    /// Terminal flag: show the "you lost" screen
    pub lost: bool,
    pub player: Option<Sprite>,
    pub entities: Vec<Sprite>,
    pub backdrop: [f32; 2],
}

impl RenderSnapshot {
    pub fn capture(world: &World, tick: Tick) -> Self {
        Self {
            tick,
            world: world.name().to_string(),
            score: world.score(),
            lost: world.is_paused(),
            player: world.player().map(|p| Sprite {
                tag: SpriteTag::Player,
                id: None,
                location: p.location,
            }),
            entities: world
                .entities()
                .iter()
                .map(|e| Sprite {
                    tag: e.kind.into(),
                    id: Some(e.id),
                    location: e.location,
                })
                .collect(),
            backdrop: world.backdrop().offsets,
        }
    }

    /// One-line HUD text
    pub fn status_line(&self) -> String {
        if self.lost {
            format!("[{}] score {} - you lost!", self.world, self.score)
        } else {
            format!("[{}] score {}", self.world, self.score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Player;

    #[test]
    fn test_capture_world() {
        let settings = Settings::default();
        let mut world = World::new("Forest", &settings, 1, 0);
        world.bind_player(Player::from_settings(&settings));
        let id = world.spawn(EntityKind::Hazard);

        let snapshot = RenderSnapshot::capture(&world, 7);
        assert_eq!(snapshot.tick, 7);
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.lost);
        assert_eq!(snapshot.player.map(|p| p.tag), Some(SpriteTag::Player));
        assert_eq!(snapshot.entities.len(), 1);
        assert_eq!(snapshot.entities[0].tag, SpriteTag::Hazard);
        assert_eq!(snapshot.entities[0].id, Some(id));
        assert_eq!(snapshot.status_line(), "[Forest] score 0");
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new("Forest", &Settings::default(), 1, 0);
        let json = serde_json::to_string(&RenderSnapshot::capture(&world, 0)).expect("json");
        assert!(json.contains("\"world\":\"Forest\""));
        assert!(json.contains("\"player\":null"));
    }
}
