//! Match state: every entity collection plus match-level counters
//!
//! `GameState` is the only owner of structures, tanks and items; the tick
//! is the only code that inserts or removes them. All fields are plain data
//! a renderer can read after each tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::map::{MapError, TileMap};
use super::projectile::Owner;
use super::spawn::SpawnDirector;
use super::structure::{Structure, StructureKind};
use super::tank::{EnemyClass, EnemyTank, PlayerTank};
use super::item::{Item, ItemKind};
use crate::settings::{ConfigError, MatchConfig};

/// Error type for building a match.
#[derive(Debug)]
pub enum SetupError {
    /// Configuration failed validation.
    Config(ConfigError),
    /// Level layout could not be loaded.
    Map(MapError),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Map(e) => write!(f, "Failed to load map: {e}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Map(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<MapError> for SetupError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Enemy quota destroyed
    Victory,
    /// Headquarters lost or player out of lives
    Defeat,
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start action
    Start,
    /// Active gameplay
    Playing,
    /// Match finished; waiting for acknowledge or restart
    GameOver(Outcome),
}

/// Things that happened during a tick, for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted,
    Fire(Owner),
    /// A projectile struck a structure that absorbed it
    StructureHit(StructureKind),
    StructureDestroyed(StructureKind),
    HeadquartersDestroyed,
    PlayerHit,
    LifeLost,
    EnemyHit(EnemyClass),
    EnemyDestroyed(EnemyClass),
    /// Two opposing projectiles cancelled each other
    ProjectilesCancelled,
    ItemDropped(ItemKind),
    ItemCollected(ItemKind),
    ItemExpired(ItemKind),
    Victory,
    Defeat,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Match RNG: spawns, AI, item kinds
    pub(super) rng: Pcg32,
    pub(super) config: MatchConfig,
    pub(super) map: TileMap,
    /// Ticks simulated in the current match
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Matches started since construction
    pub matches_played: u32,
    /// Terrain, excluding the headquarters
    pub structures: Vec<Structure>,
    pub headquarters: Structure,
    pub player: PlayerTank,
    /// Live enemies (sorted by id)
    pub enemies: Vec<EnemyTank>,
    /// Items on the map (sorted by id)
    pub items: Vec<Item>,
    pub enemies_destroyed: u32,
    pub spawner: SpawnDirector,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a match in the Start phase. Fails if the config is unusable or
    /// the configured level has no layout; ticking never fails afterwards.
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        let map = TileMap::load(config.level)?;
        let mut next_id = 1;
        let (structures, headquarters) = map.structures(&config, || {
            let id = next_id;
            next_id += 1;
            id
        });
        let player = PlayerTank::new(next_id, &config);
        next_id += 1;

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: SpawnDirector::new(&config),
            time_ticks: 0,
            phase: GamePhase::Start,
            matches_played: 0,
            structures,
            headquarters,
            player,
            enemies: Vec::new(),
            items: Vec::new(),
            enemies_destroyed: 0,
            events: Vec::new(),
            next_id,
            config,
            map,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild every entity and counter for a fresh match, back in Start.
    /// The RNG stream carries on so consecutive matches differ.
    pub fn reset(&mut self) {
        let mut next_id = self.next_id;
        let (structures, headquarters) = self.map.structures(&self.config, || {
            let id = next_id;
            next_id += 1;
            id
        });
        self.next_id = next_id;
        self.structures = structures;
        self.headquarters = headquarters;
        let player_id = self.next_entity_id();
        self.player = PlayerTank::new(player_id, &self.config);
        self.enemies.clear();
        self.items.clear();
        self.enemies_destroyed = 0;
        self.spawner = SpawnDirector::new(&self.config);
        self.time_ticks = 0;
        self.phase = GamePhase::Start;
        log::info!("Match reset");
    }

    /// Final result, once the match is over
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Live projectiles of every tank, player first
    pub fn projectile_count(&self) -> usize {
        self.player.tank.projectiles.len()
            + self
                .enemies
                .iter()
                .map(|e| e.tank.projectiles.len())
                .sum::<usize>()
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.tank.id);
        self.items.sort_by_key(|i| i.id);
    }
}
