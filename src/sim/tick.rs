//! Fixed timestep match tick
//!
//! Advances the match by one frame in a fixed order: spawn, player, enemies,
//! tank contacts, projectiles, items, outcome. Entity removal is deferred to
//! the end of the pass that decides it, so nothing is removed from a list
//! while that list is being walked.

use glam::Vec2;
use rand::Rng;

use super::collision::{ProjectileHit, projectile_hit, tank_blocked};
use super::geom::{Direction, Rect};
use super::item::{Item, ItemKind};
use super::projectile::Owner;
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use super::structure::Structure;
use super::tank::{EnemyTank, PlayerTank, Tank};

/// Damage each tank takes when an enemy drives into the player
const CONTACT_DAMAGE: i32 = 1;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement direction, if any
    pub direction: Option<Direction>,
    /// Fire (edge-triggered by the platform layer)
    pub fire: bool,
    /// Leave the start screen
    pub start: bool,
    /// Dismiss the game-over screen and return to Start
    pub acknowledge: bool,
    /// From game over, go straight into a fresh match
    pub restart: bool,
}

/// Advance the match by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    match state.phase {
        GamePhase::Start => {
            if input.start {
                start_match(state);
            }
            return;
        }
        GamePhase::GameOver(_) => {
            if input.restart {
                state.reset();
                start_match(state);
            } else if input.acknowledge {
                state.reset();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    spawn_enemies(state);
    update_player(state, input);
    update_enemies(state);
    resolve_tank_contacts(state);
    update_projectiles(state);
    update_items(state);
    evaluate_outcome(state);

    state.normalize_order();
}

fn start_match(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.matches_played += 1;
    state.events.push(GameEvent::MatchStarted);
    log::info!(
        "Match {} started (seed {}, level {})",
        state.matches_played,
        state.seed,
        state.config.level
    );
}

/// Step 1: at most one enemy per tick, at a random spawn point that no tank
/// is standing on.
fn spawn_enemies(state: &mut GameState) {
    state.spawner.tick();
    if !state
        .spawner
        .can_spawn(state.enemies_destroyed, state.enemies.len(), &state.config)
    {
        return;
    }

    let points = &state.config.enemy_spawn_points;
    if points.is_empty() {
        return;
    }
    let pos = points[state.rng.random_range(0..points.len())];
    let footprint = Rect::square(pos, state.config.tank_size);
    let occupied = footprint.overlaps(&state.player.tank.rect)
        || state.enemies.iter().any(|e| footprint.overlaps(&e.tank.rect));
    if occupied {
        log::trace!("Spawn point ({}, {}) occupied", pos.x, pos.y);
        return;
    }

    let id = state.next_entity_id();
    let class = state.spawner.pick_class(&mut state.rng, &state.config);
    let enemy = EnemyTank::new(id, class, pos, &mut state.rng, &state.config);
    state.spawner.record_spawn();
    log::debug!(
        "Spawned {:?} enemy {} at ({}, {}), {} so far",
        class,
        id,
        pos.x,
        pos.y,
        state.spawner.spawned_total
    );
    state.enemies.push(enemy);
}

/// Step 2
fn update_player(state: &mut GameState, input: &TickInput) {
    let bounds = state.config.screen_rect();
    let player = &mut state.player;
    player.tick_timers();

    match input.direction {
        Some(direction) => player.tank.set_intended_movement(direction),
        None => player.tank.reset_movement(),
    }
    move_tank(
        &mut player.tank,
        &bounds,
        &state.structures,
        &state.headquarters,
    );

    if input.fire && player.tank.shoot(&state.config).is_some() {
        state.events.push(GameEvent::Fire(Owner::Player));
    }
}

/// Step 3
fn update_enemies(state: &mut GameState) {
    let bounds = state.config.screen_rect();
    for enemy in &mut state.enemies {
        enemy.tank.tick_cooldown();

        let decision = enemy.ai.tick(&mut state.rng, &state.config);
        if let Some(direction) = decision.turn {
            enemy.tank.set_intended_movement(direction);
        }
        if decision.fire && enemy.tank.shoot(&state.config).is_some() {
            state.events.push(GameEvent::Fire(enemy.tank.owner));
        }

        move_tank(
            &mut enemy.tank,
            &bounds,
            &state.structures,
            &state.headquarters,
        );
    }
}

/// Apply the pending move unless the destination overlaps blocking terrain.
/// A blocked tank stays put and drops its intent.
fn move_tank(tank: &mut Tank, bounds: &Rect, structures: &[Structure], headquarters: &Structure) {
    if tank.pending == Vec2::ZERO {
        return;
    }
    let destination = tank.projected_rect(bounds);
    if tank_blocked(&destination, structures, headquarters) {
        tank.reset_movement();
    } else {
        tank.apply_movement(bounds);
    }
}

/// Step 4: an enemy touching the player damages both
fn resolve_tank_contacts(state: &mut GameState) {
    let mut killed = Vec::new();
    for enemy in &mut state.enemies {
        if state.player.defeated || !enemy.tank.rect.overlaps(&state.player.tank.rect) {
            continue;
        }
        damage_player(&mut state.player, CONTACT_DAMAGE, &mut state.events);
        if enemy.tank.receive_hit(CONTACT_DAMAGE) {
            killed.push(enemy.tank.id);
        } else {
            state.events.push(GameEvent::EnemyHit(enemy.class));
        }
    }
    destroy_enemies(state, &killed);
}

/// Step 5: move every projectile, resolve hits, then cancel opposing
/// projectiles that ended up overlapping.
fn update_projectiles(state: &mut GameState) {
    let bounds = state.config.screen_rect();
    let mut killed = Vec::new();

    // Player bullets: terrain, headquarters, then live enemies
    let bullets = std::mem::take(&mut state.player.tank.projectiles);
    let mut survivors = Vec::with_capacity(bullets.len());
    for mut bullet in bullets {
        if !bullet.advance(&bounds) {
            continue;
        }
        let targets = state
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.tank.is_destroyed())
            .map(|(i, e)| (i, &e.tank.rect));
        match projectile_hit(&bullet.rect, &state.structures, &state.headquarters, targets) {
            None => survivors.push(bullet),
            Some(ProjectileHit::Structure(i)) => {
                hit_structure(&mut state.structures[i], bullet.damage, &mut state.events);
            }
            Some(ProjectileHit::Headquarters) => {
                hit_headquarters(&mut state.headquarters, bullet.damage, &mut state.events);
            }
            Some(ProjectileHit::Tank(i)) => {
                let enemy = &mut state.enemies[i];
                if enemy.tank.receive_hit(bullet.damage) {
                    killed.push(enemy.tank.id);
                } else {
                    state.events.push(GameEvent::EnemyHit(enemy.class));
                }
            }
        }
    }
    state.player.tank.projectiles = survivors;

    // Enemy bullets: terrain, headquarters, then the player. Bullets of an
    // enemy killed this tick leave with it.
    for e in 0..state.enemies.len() {
        if state.enemies[e].tank.is_destroyed() {
            continue;
        }
        let bullets = std::mem::take(&mut state.enemies[e].tank.projectiles);
        let mut survivors = Vec::with_capacity(bullets.len());
        for mut bullet in bullets {
            if !bullet.advance(&bounds) {
                continue;
            }
            let target = (!state.player.defeated).then_some((0, &state.player.tank.rect));
            match projectile_hit(&bullet.rect, &state.structures, &state.headquarters, target) {
                None => survivors.push(bullet),
                Some(ProjectileHit::Structure(i)) => {
                    hit_structure(&mut state.structures[i], bullet.damage, &mut state.events);
                }
                Some(ProjectileHit::Headquarters) => {
                    hit_headquarters(&mut state.headquarters, bullet.damage, &mut state.events);
                }
                Some(ProjectileHit::Tank(_)) => {
                    damage_player(&mut state.player, bullet.damage, &mut state.events);
                }
            }
        }
        state.enemies[e].tank.projectiles = survivors;
    }

    state.structures.retain(|s| !s.destroyed);
    cancel_crossing_projectiles(state);
    destroy_enemies(state, &killed);
}

fn hit_structure(structure: &mut Structure, damage: i32, events: &mut Vec<GameEvent>) {
    if structure.receive_hit(damage) {
        log::trace!("{:?} {} destroyed", structure.kind, structure.id);
        events.push(GameEvent::StructureDestroyed(structure.kind));
    } else {
        events.push(GameEvent::StructureHit(structure.kind));
    }
}

fn hit_headquarters(headquarters: &mut Structure, damage: i32, events: &mut Vec<GameEvent>) {
    if headquarters.destroyed {
        return;
    }
    if headquarters.receive_hit(damage) {
        log::info!("Headquarters destroyed");
        events.push(GameEvent::HeadquartersDestroyed);
    } else {
        events.push(GameEvent::StructureHit(headquarters.kind));
    }
}

/// Route damage through the invincibility window and the life counter
fn damage_player(player: &mut PlayerTank, damage: i32, events: &mut Vec<GameEvent>) {
    if player.is_invincible() || player.defeated {
        return;
    }
    events.push(GameEvent::PlayerHit);
    if !player.receive_hit(damage) {
        return;
    }
    if player.lose_life() {
        log::debug!("Player lost a life, {} left", player.lives);
        events.push(GameEvent::LifeLost);
    } else {
        log::info!("Player destroyed with no lives left");
    }
}

/// A player bullet and an enemy bullet that overlap both vanish
fn cancel_crossing_projectiles(state: &mut GameState) {
    let player_bullets = &mut state.player.tank.projectiles;
    let events = &mut state.events;
    for enemy in &mut state.enemies {
        if player_bullets.is_empty() {
            return;
        }
        enemy.tank.projectiles.retain(|enemy_bullet| {
            match player_bullets
                .iter()
                .position(|b| b.rect.overlaps(&enemy_bullet.rect))
            {
                Some(i) => {
                    player_bullets.remove(i);
                    events.push(GameEvent::ProjectilesCancelled);
                    false
                }
                None => true,
            }
        });
    }
}

/// Remove killed enemies, count them, and drop items where Targets fell
fn destroy_enemies(state: &mut GameState, ids: &[u32]) {
    if ids.is_empty() {
        return;
    }

    let mut drops = Vec::new();
    let destroyed = &mut state.enemies_destroyed;
    let events = &mut state.events;
    state.enemies.retain(|enemy| {
        if !ids.contains(&enemy.tank.id) {
            return true;
        }
        *destroyed += 1;
        events.push(GameEvent::EnemyDestroyed(enemy.class));
        log::debug!(
            "{:?} enemy {} destroyed ({} total)",
            enemy.class,
            enemy.tank.id,
            *destroyed
        );
        if enemy.drops_item() {
            drops.push(enemy.tank.pos());
        }
        false
    });

    for pos in drops {
        let kind = ItemKind::random(&mut state.rng);
        let id = state.next_entity_id();
        log::debug!("Dropped {:?} item at ({}, {})", kind, pos.x, pos.y);
        state.items.push(Item::new(id, kind, pos, &state.config));
        state.events.push(GameEvent::ItemDropped(kind));
    }
}

/// Step 6: expire stale items, then apply and remove whatever the player touches
fn update_items(state: &mut GameState) {
    let player = &mut state.player;
    let config = &state.config;
    let events = &mut state.events;
    state.items.retain_mut(|item| {
        if !item.tick() {
            events.push(GameEvent::ItemExpired(item.kind));
            return false;
        }
        if player.defeated || !item.rect.overlaps(&player.tank.rect) {
            return true;
        }
        item.apply_effect(player, config);
        log::debug!("Player collected {:?}", item.kind);
        events.push(GameEvent::ItemCollected(item.kind));
        false
    });
}

/// Step 7: defeat wins ties, so a match that loses the headquarters on the
/// same tick as the last kill is a loss.
fn evaluate_outcome(state: &mut GameState) {
    let outcome = if state.headquarters.destroyed || state.player.defeated {
        Outcome::Defeat
    } else if state.enemies_destroyed >= state.config.enemy_quota {
        Outcome::Victory
    } else {
        return;
    };

    state.phase = GamePhase::GameOver(outcome);
    state.events.push(match outcome {
        Outcome::Victory => GameEvent::Victory,
        Outcome::Defeat => GameEvent::Defeat,
    });
    log::info!(
        "Match over: {:?} after {} ticks, {} enemies destroyed",
        outcome,
        state.time_ticks,
        state.enemies_destroyed
    );
}
