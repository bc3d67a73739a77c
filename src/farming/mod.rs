//! Farming domain — soil tilling, watering, planting, plant growth, harvest.
//!
//! All tile and plant state lives in the `SoilLayer` resource; the systems
//! here only route cross-domain events into it and mirror it into sprites.
//! Communicates with other domains exclusively through crate::shared
//! events/resources.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

pub mod grid;
pub mod tiler;
pub mod plants;
pub mod soil;
pub mod tools;
pub mod harvest;
pub mod events_handler;
pub mod render;

pub use soil::{Harvest, SoilLayer};

/// Soil tile sprite for one tilled tile, tagged with the shape it shows.
#[derive(Component, Debug, Clone)]
pub struct SoilTileEntity {
    pub coord: TileCoord,
    pub shape_key: &'static str,
}

/// Water overlay sprite drawn above a watered soil tile.
#[derive(Component, Debug, Clone)]
pub struct WaterTileEntity {
    pub coord: TileCoord,
}

/// Plant sprite, tagged with the growth frame it shows.
#[derive(Component, Debug, Clone)]
pub struct PlantEntity {
    pub coord: TileCoord,
    pub frame: usize,
}

/// Short-lived white flash left behind where a plant was picked.
#[derive(Component, Debug)]
pub struct DecayParticle {
    pub timer: Timer,
}

/// Tracks which farming sprites exist, keyed by tile.
#[derive(Resource, Default, Debug)]
pub struct FarmEntities {
    pub soil: HashMap<TileCoord, Entity>,
    pub water: HashMap<TileCoord, Entity>,
    pub plants: HashMap<TileCoord, Entity>,
}

/// Image handles for soil shapes, water overlays, and plant growth frames.
/// Loaded once on entering Playing; render systems skip work until then.
#[derive(Resource, Default)]
pub struct FarmingAtlases {
    pub loaded: bool,
    pub soil: HashMap<&'static str, Handle<Image>>,
    pub water: Vec<Handle<Image>>,
    pub plants: HashMap<ItemId, Vec<Handle<Image>>>,
}

/// Number of interchangeable water overlay images.
pub const WATER_VARIANTS: usize = 3;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<SoilLayer>()
            .init_resource::<FarmEntities>()
            .init_resource::<FarmingAtlases>()
            // ------------------------------------------------------------------
            // Build the soil layer from the farm map once data has loaded
            // ------------------------------------------------------------------
            .add_systems(OnExit(GameState::Loading), init_soil_layer)
            .add_systems(OnEnter(GameState::Playing), load_farming_atlases)
            // ------------------------------------------------------------------
            // Player actions and day turnover
            // ------------------------------------------------------------------
            .add_systems(
                Update,
                (
                    tools::handle_tool_use,
                    tools::handle_plant_seed,
                    harvest::harvest_on_contact,
                    events_handler::on_new_day,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // ------------------------------------------------------------------
            // Visual sync — runs after all state mutations
            // ------------------------------------------------------------------
            .add_systems(
                PostUpdate,
                (
                    render::sync_soil_sprites,
                    render::sync_water_sprites,
                    render::sync_plant_sprites,
                    render::tick_decay_particles,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Replace the (empty) default soil layer with one built from the map's
/// farmable tiles.
pub fn init_soil_layer(mut commands: Commands, farmable: Res<FarmableTiles>) {
    info!("[Farming] Soil layer ready with {} farmable tiles", farmable.0.len());
    commands.insert_resource(SoilLayer::new(farmable.0.iter().copied()));
}

/// Loads farming images once when the Playing state is entered.
///
/// Assets:
///   graphics/soil/{key}.png           — one image per soil shape key
///   graphics/soil_water/{0..3}.png    — water overlay variants
///   graphics/fruit/{species}/{n}.png  — growth frames per species
fn load_farming_atlases(
    asset_server: Res<AssetServer>,
    species: Res<SpeciesRegistry>,
    mut atlases: ResMut<FarmingAtlases>,
) {
    if atlases.loaded {
        return;
    }

    for key in tiler::SoilShape::all_keys() {
        atlases
            .soil
            .insert(key, asset_server.load(format!("graphics/soil/{key}.png")));
    }

    atlases.water = (0..WATER_VARIANTS)
        .map(|i| asset_server.load(format!("graphics/soil_water/{i}.png")))
        .collect();

    for def in &species.species {
        let frames = (0..def.frames)
            .map(|n| asset_server.load(format!("graphics/fruit/{}/{n}.png", def.id)))
            .collect();
        atlases.plants.insert(def.id.clone(), frames);
    }

    atlases.loaded = true;
}
