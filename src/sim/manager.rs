//! World registry
//!
//! Worlds are registered once by name and live for the whole process. At
//! most one is active; activating another moves the player across.

use super::player::Player;
use super::state::World;
use crate::error::SimError;

#[derive(Debug, Default)]
pub struct WorldManager {
    worlds: Vec<World>,
    active: Option<usize>,
}

impl WorldManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a world. A second world with an existing name is ignored;
    /// returns whether the world was added.
    pub fn register(&mut self, world: World) -> bool {
        if self.worlds.iter().any(|w| w.name() == world.name()) {
            log::debug!("World {} already registered", world.name());
            return false;
        }
        log::info!("Registered world {}", world.name());
        self.worlds.push(world);
        true
    }

    pub fn world(&self, name: &str) -> Option<&World> {
        self.worlds.iter().find(|w| w.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.worlds.iter().map(|w| w.name())
    }

    /// Make `name` the active world and bind the player into it.
    ///
    /// With `player` given, that player is bound. Otherwise the player of the
    /// previously active world is carried over. Either way the previous world
    /// is left without a player. An unknown name changes nothing.
    pub fn activate(&mut self, name: &str, player: Option<Player>) -> Result<&mut World, SimError> {
        let index = self
            .worlds
            .iter()
            .position(|w| w.name() == name)
            .ok_or_else(|| SimError::WorldNotFound(name.to_string()))?;

        let carried = match self.active {
            Some(previous) if previous != index => self.worlds[previous].take_player(),
            _ => None,
        };

        self.active = Some(index);
        let world = &mut self.worlds[index];
        if let Some(player) = player.or(carried) {
            world.bind_player(player);
        }
        log::info!("Activated world {}", world.name());
        Ok(world)
    }

    pub fn active_world(&self) -> Option<&World> {
        self.active.map(|i| &self.worlds[i])
    }

    pub fn active_world_mut(&mut self) -> Option<&mut World> {
        self.active.map(|i| &mut self.worlds[i])
    }
}
