//! Economy domain — the trader's shop and the player's purse.
//!
//! All cross-domain communication goes through `crate::shared::*` events and resources.
//! No other domain module is imported here.

use bevy::prelude::*;
use crate::shared::*;

pub mod gold;
pub mod shop;

pub use gold::{apply_item_pickups, init_inventory};
pub use shop::{buy, sell, shop_navigation, ShopMenu, ShopSide};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        // ── Resources ──────────────────────────────────────────────────────
        app.init_resource::<Inventory>()
            .init_resource::<ShopMenu>();

        // ── Startup: starting money and seeds come from settings ───────────
        app.add_systems(OnExit(GameState::Loading), init_inventory);

        // ── Systems: Playing state ─────────────────────────────────────────
        app.add_systems(
            Update,
            apply_item_pickups.run_if(in_state(GameState::Playing)),
        );

        // ── Systems: Shop state ────────────────────────────────────────────
        app.add_systems(OnEnter(GameState::Shop), shop::on_enter_shop);
        app.add_systems(
            Update,
            shop_navigation.run_if(in_state(GameState::Shop)),
        );

        info!("[Economy] EconomyPlugin registered.");
    }
}
