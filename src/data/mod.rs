//! Data layer — populates registries and reads the data files at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading): it fills the
//! SpeciesRegistry and ShopData from the hard-coded game-design data, reads
//! `config/settings.ron` and `data/farm.ron` from the asset root, checks that
//! the soil graphics are present, then transitions the game into
//! GameState::Playing.
//!
//! A broken farm map or missing soil graphics stop the game; a missing
//! settings file only costs the player their tweaks.

mod error;
mod farm_map;
pub mod shops;
pub mod species;

pub use error::DataError;
pub use farm_map::{FarmMap, MapRect, MapTree};

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::de::DeserializeOwned;

use crate::shared::*;

pub const SETTINGS_PATH: &str = "config/settings.ron";
pub const FARM_MAP_PATH: &str = "data/farm.ron";
pub const SOIL_GRAPHICS_DIR: &str = "graphics/soil";

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DataPaths>()
            .init_resource::<GameSettings>()
            .init_resource::<SpeciesRegistry>()
            .init_resource::<FarmableTiles>()
            .init_resource::<FarmLayout>()
            .init_resource::<TreeSpawns>()
            .init_resource::<ShopData>()
            .add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Where the data files live on disk.
#[derive(Resource, Debug, Clone)]
pub struct DataPaths {
    pub root: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
        }
    }
}

/// Single system that populates every registry and then transitions to Playing.
pub fn load_all_data(
    mut commands: Commands,
    paths: Res<DataPaths>,
    mut species: ResMut<SpeciesRegistry>,
    mut shop_data: ResMut<ShopData>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    info!("[Data] Populating registries from {}", paths.root.display());

    species::populate_species(&mut species);
    info!("[Data] Species loaded: {}", species.species.len());

    shops::populate_shops(&mut shop_data, &species);
    info!(
        "[Data] Shop listings loaded: {} to sell, {} to buy",
        shop_data.sell.len(),
        shop_data.buy.len()
    );

    let loaded = load_settings(&paths.root).and_then(|settings| {
        let map = load_farm_map(&paths.root)?;
        check_soil_graphics(&paths.root)?;
        Ok((settings, map))
    });

    let (settings, map) = match loaded {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("[Data] {err}");
            exit.send(AppExit::error());
            return;
        }
    };

    let farmable = map.farmable_tiles();
    let trees = map.tree_spawns();
    info!(
        "[Data] Farm map loaded: {} farmable tiles, {} trees, start at {:?}",
        farmable.0.len(),
        trees.0.len(),
        map.player_start
    );

    commands.insert_resource(settings);
    commands.insert_resource(farmable);
    commands.insert_resource(trees);
    commands.insert_resource(map.layout());

    info!("[Data] All data loaded. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}

/// Read a whole file, telling a missing file apart from an unreadable one.
pub fn read_file(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::MissingAsset {
                path: path.to_path_buf(),
            }
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

pub fn parse_ron<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T, DataError> {
    ron::from_str(text).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings fall back to defaults when the file is absent. A file that is
/// present but broken is still an error.
pub fn load_settings(root: &Path) -> Result<GameSettings, DataError> {
    let path = root.join(SETTINGS_PATH);
    match read_file(&path) {
        Ok(text) => parse_ron(&path, &text),
        Err(DataError::MissingAsset { path }) => {
            warn!("[Data] No settings at {}; using defaults", path.display());
            Ok(GameSettings::default())
        }
        Err(err) => Err(err),
    }
}

pub fn load_farm_map(root: &Path) -> Result<FarmMap, DataError> {
    let path = root.join(FARM_MAP_PATH);
    let text = read_file(&path)?;
    parse_ron(&path, &text)
}

/// The soil sprites are read lazily by the asset server, so their absence
/// would otherwise only show up as invisible soil.
pub fn check_soil_graphics(root: &Path) -> Result<(), DataError> {
    let path = root.join(SOIL_GRAPHICS_DIR);
    if path.is_dir() {
        Ok(())
    } else {
        Err(DataError::MissingAsset { path })
    }
}
