//! Shared components, resources, events, and states for Tillfield.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Shop,
}

// ═══════════════════════════════════════════════════════════════════════
// DAY CYCLE
// ═══════════════════════════════════════════════════════════════════════

/// Current day number and whether it is raining today.
///
/// Owned by the calendar domain. The farming domain only ever reads
/// `raining` and passes it into `SoilLayer` operations explicitly.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DayCycle {
    pub day: u32,
    pub raining: bool,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self { day: 1, raining: false }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TILES
// ═══════════════════════════════════════════════════════════════════════

/// Integer tile position on the farm map. Rows grow downward, like the
/// tilemap the farmable layer is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Resolve a map-space point (pixels, y down) to the tile containing it.
    pub fn from_point(point: Vec2) -> Self {
        Self {
            col: (point.x / TILE_SIZE).floor() as i32,
            row: (point.y / TILE_SIZE).floor() as i32,
        }
    }

    /// Neighbouring coordinate. Wraps at the edges of the `i32` range, so
    /// every coordinate has four neighbours.
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col.wrapping_add(dcol),
            row: self.row.wrapping_add(drow),
        }
    }

    /// Map-space rectangle covered by this tile.
    pub fn rect(self) -> Rect {
        let min = Vec2::new(self.col as f32 * TILE_SIZE, self.row as f32 * TILE_SIZE);
        Rect::from_corners(min, min + Vec2::splat(TILE_SIZE))
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((col, row): (i32, i32)) -> Self {
        Self { col, row }
    }
}

/// Convert a map-space point (y down) into a Bevy world translation (y up).
pub fn map_to_world(point: Vec2, z: f32) -> Vec3 {
    Vec3::new(point.x, -point.y, z)
}

/// Convert a Bevy world translation back into map space.
pub fn world_to_map(translation: Vec3) -> Vec2 {
    Vec2::new(translation.x, -translation.y)
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Default)]
pub struct Player;

/// Solid obstacle the player cannot walk through. `hitbox` is in map space.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub hitbox: Rect,
}

/// Farmable tiles read from the farm map at load time.
#[derive(Resource, Debug, Clone, Default)]
pub struct FarmableTiles(pub Vec<TileCoord>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Where a tool lands relative to the player's centre, in map space.
    pub fn tool_offset(self) -> Vec2 {
        match self {
            Facing::Left => Vec2::new(-50.0, 40.0),
            Facing::Right => Vec2::new(50.0, 40.0),
            Facing::Up => Vec2::new(0.0, -10.0),
            Facing::Down => Vec2::new(0.0, 50.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    Axe,
    WateringCan,
}

// ═══════════════════════════════════════════════════════════════════════
// TREES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeSize {
    Small,
    Large,
}

impl TreeSize {
    /// Wood dropped when the tree is felled.
    pub fn wood(self) -> u32 {
        match self {
            TreeSize::Small => 1,
            TreeSize::Large => 2,
        }
    }

    /// Size of the tree sprite, in pixels.
    pub fn sprite_size(self) -> Vec2 {
        match self {
            TreeSize::Small => Vec2::new(64.0, 96.0),
            TreeSize::Large => Vec2::new(96.0, 128.0),
        }
    }

    /// Size of the stump left behind, in pixels.
    pub fn stump_size(self) -> Vec2 {
        match self {
            TreeSize::Small => Vec2::new(48.0, 32.0),
            TreeSize::Large => Vec2::new(64.0, 48.0),
        }
    }

    /// Where apples can hang, as offsets from the tree sprite's top-left.
    pub fn apple_slots(self) -> &'static [Vec2] {
        const SMALL: [Vec2; 6] = [
            Vec2::new(18.0, 17.0),
            Vec2::new(30.0, 37.0),
            Vec2::new(12.0, 50.0),
            Vec2::new(30.0, 45.0),
            Vec2::new(20.0, 30.0),
            Vec2::new(30.0, 10.0),
        ];
        const LARGE: [Vec2; 6] = [
            Vec2::new(30.0, 24.0),
            Vec2::new(50.0, 65.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(16.0, 40.0),
            Vec2::new(45.0, 50.0),
            Vec2::new(42.0, 70.0),
        ];
        match self {
            TreeSize::Small => &SMALL,
            TreeSize::Large => &LARGE,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TreeSize::Small => "small",
            TreeSize::Large => "large",
        }
    }
}

/// A tree placed on the farm map. `top_left` is in map space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSpawn {
    pub size: TreeSize,
    pub top_left: Vec2,
}

/// Trees read from the farm map at load time.
#[derive(Resource, Debug, Clone, Default)]
pub struct TreeSpawns(pub Vec<TreeSpawn>);

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// This frame's game actions, filled from the keyboard by the input domain.
/// Action flags are true for as long as the key is held; `ActionTimer`s
/// decide how often a held key actually fires.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub tool_use: bool,
    pub seed_use: bool,
    pub tool_switch: bool,
    pub seed_switch: bool,
    pub interact: bool,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_left: bool,
    pub ui_right: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
}

/// Countdown that keeps a held key from firing every frame.
///
/// `activate` starts the countdown; while it runs the action is locked out,
/// and `tick` reports the frame it runs out (which is when wind-up actions
/// such as tool use take effect).
#[derive(Debug, Clone)]
pub struct ActionTimer {
    timer: Timer,
    active: bool,
}

impl ActionTimer {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            timer: Timer::new(Duration::from_millis(ms), TimerMode::Once),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.timer.reset();
        self.active = true;
    }

    /// Activate if idle. Returns whether the action may fire now.
    pub fn try_trigger(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.activate();
        true
    }

    /// Returns true on the tick the countdown runs out.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            self.active = false;
            return true;
        }
        false
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// String item IDs, shared with species IDs ("corn", "tomato", "wood", "apple").
pub type ItemId = String;

/// Harvested produce, seed stock, and money.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: HashMap<ItemId, u32>,
    pub seeds: HashMap<ItemId, u32>,
    pub money: u32,
}

impl Inventory {
    pub fn item_count(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    pub fn seed_count(&self, id: &str) -> u32 {
        self.seeds.get(id).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, id: &str, quantity: u32) {
        *self.items.entry(id.to_string()).or_insert(0) += quantity;
    }

    pub fn add_seed(&mut self, id: &str, quantity: u32) {
        *self.seeds.entry(id.to_string()).or_insert(0) += quantity;
    }

    /// Remove one item. Returns false (and changes nothing) if none are held.
    pub fn take_item(&mut self, id: &str) -> bool {
        match self.items.get_mut(id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Remove one seed. Returns false (and changes nothing) if none are held.
    pub fn take_seed(&mut self, id: &str) -> bool {
        match self.seeds.get_mut(id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPECIES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub id: ItemId,
    pub name: String,
    /// Age gained per watered growth tick.
    pub growth_rate: f32,
    /// Number of frames in the growth sprite sequence. Maturity is `frames - 1`.
    pub frames: u8,
    /// Vertical sprite offset from the soil tile's bottom edge, in pixels.
    pub sprite_y_offset: f32,
    pub sell_price: u32,
    pub seed_price: u32,
}

impl SpeciesDef {
    pub fn max_age(&self) -> f32 {
        f32::from(self.frames.saturating_sub(1))
    }
}

/// All plantable species, in shop display order.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesRegistry {
    pub species: Vec<SpeciesDef>,
}

impl SpeciesRegistry {
    pub fn get(&self, id: &str) -> Option<&SpeciesDef> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.species.iter().map(|s| s.id.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SHOP
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct ShopListing {
    pub item_id: ItemId,
    pub name: String,
    pub price: u32,
}

/// What the trader buys from the player (`sell`) and what they offer
/// (`buy`), each in display order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShopData {
    pub sell: Vec<ShopListing>,
    pub buy: Vec<ShopListing>,
}

// ═══════════════════════════════════════════════════════════════════════
// SETTINGS & LAYOUT
// ═══════════════════════════════════════════════════════════════════════

/// Tunables read from `assets/config/settings.ron`. Every field has a default,
/// so a partial (or missing) file is fine.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub rain_probability: f64,
    pub player_speed: f32,
    pub tool_use_ms: u64,
    pub seed_use_ms: u64,
    pub switch_ms: u64,
    pub menu_ms: u64,
    pub starting_money: u32,
    pub starting_seeds: u32,
    pub sfx_volume: f32,
    pub music_volume: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rain_probability: 0.3,
            player_speed: 200.0,
            tool_use_ms: 350,
            seed_use_ms: 350,
            switch_ms: 200,
            menu_ms: 200,
            starting_money: 200,
            starting_seeds: 5,
            sfx_volume: 0.1,
            music_volume: 0.05,
        }
    }
}

/// Fixed places on the farm map, in map-space pixels.
#[derive(Resource, Debug, Clone, Default)]
pub struct FarmLayout {
    pub player_start: Vec2,
    pub bed: Rect,
    pub trader: Rect,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// The player's tool finished its wind-up at `target` (map space).
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    pub target: Vec2,
}

/// The player's seed action finished its wind-up at `target` (map space).
#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub species: ItemId,
    pub target: Vec2,
}

/// The player went to bed; `day` is the day that is ending.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

/// A new day has started. Weather is already rolled.
#[derive(Event, Debug, Clone)]
pub struct NewDayEvent {
    pub day: u32,
    pub raining: bool,
}

#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 64.0;
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

/// Player collision box, centred on the player.
pub const PLAYER_HITBOX: Vec2 = Vec2::new(66.0, 58.0);

/// Draw order. Higher values are drawn on top.
pub mod layers {
    pub const SOIL: f32 = 2.0;
    pub const SOIL_WATER: f32 = 3.0;
    pub const GROUND_PLANT: f32 = 6.0;
    pub const MAIN: f32 = 7.0;
    pub const FRUIT: f32 = 8.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_timer_locks_out_until_elapsed() {
        let mut timer = ActionTimer::from_millis(200);
        assert!(timer.try_trigger());
        assert!(!timer.try_trigger(), "Held key must not fire again immediately");

        assert!(!timer.tick(Duration::from_millis(150)));
        assert!(timer.is_active());
        assert!(timer.tick(Duration::from_millis(60)));
        assert!(!timer.is_active());

        assert!(!timer.tick(Duration::from_millis(500)), "Idle timers never fire");
        assert!(timer.try_trigger());
    }

    #[test]
    fn point_resolves_to_containing_tile() {
        assert_eq!(TileCoord::from_point(Vec2::new(0.0, 0.0)), TileCoord::new(0, 0));
        assert_eq!(TileCoord::from_point(Vec2::new(63.9, 64.0)), TileCoord::new(0, 1));
        assert_eq!(TileCoord::from_point(Vec2::new(-1.0, 130.0)), TileCoord::new(-1, 2));
        assert_eq!(TileCoord::new(2, 3).rect().center(), Vec2::new(160.0, 224.0));
    }

    #[test]
    fn offset_is_total_at_the_edges() {
        let edge = TileCoord::new(i32::MAX, i32::MIN);
        assert_eq!(edge.offset(1, -1), TileCoord::new(i32::MIN, i32::MAX));
        assert_eq!(edge.offset(-1, 1), TileCoord::new(i32::MAX - 1, i32::MIN + 1));
    }

    #[test]
    fn inventory_never_goes_negative() {
        let mut inventory = Inventory::default();
        assert!(!inventory.take_seed("corn"));
        inventory.add_seed("corn", 1);
        assert!(inventory.take_seed("corn"));
        assert!(!inventory.take_seed("corn"));
        assert_eq!(inventory.seed_count("corn"), 0);
    }

    #[test]
    fn apple_slots_hang_inside_the_tree() {
        for size in [TreeSize::Small, TreeSize::Large] {
            let bounds = Rect::from_corners(Vec2::ZERO, size.sprite_size());
            for &slot in size.apple_slots() {
                assert!(bounds.contains(slot), "{size:?} slot {slot} is off the tree");
            }
        }
        assert_eq!(TreeSize::Small.wood(), 1);
        assert_eq!(TreeSize::Large.wood(), 2);
    }

    #[test]
    fn map_and_world_space_round_trip() {
        let p = Vec2::new(120.0, 300.0);
        let world = map_to_world(p, 2.0);
        assert_eq!(world, Vec3::new(120.0, -300.0, 2.0));
        assert_eq!(world_to_map(world), p);
    }
}
