use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShopSide {
    /// Goods from the item inventory, sold to the trader.
    #[default]
    Sell,
    /// Seeds, bought from the trader.
    Buy,
}

impl ShopSide {
    pub fn listings(self, shop_data: &ShopData) -> &[ShopListing] {
        match self {
            ShopSide::Sell => &shop_data.sell,
            ShopSide::Buy => &shop_data.buy,
        }
    }
}

/// Cursor state of the trader's menu. Each side shows its `ShopData` list.
#[derive(Resource, Debug, Clone)]
pub struct ShopMenu {
    pub side: ShopSide,
    pub index: usize,
    timer: ActionTimer,
}

impl ShopMenu {
    pub fn new(menu_ms: u64) -> Self {
        Self {
            side: ShopSide::Sell,
            index: 0,
            timer: ActionTimer::from_millis(menu_ms),
        }
    }

    pub fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1).min(len - 1);
        }
    }

    pub fn switch_side(&mut self, side: ShopSide) {
        self.side = side;
        self.index = 0;
    }
}

impl Default for ShopMenu {
    fn default() -> Self {
        Self::new(GameSettings::default().menu_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Sell one unit of a held item. Returns false when there is none to sell.
pub fn sell(inventory: &mut Inventory, listing: &ShopListing) -> bool {
    if !inventory.take_item(&listing.item_id) {
        return false;
    }
    inventory.money = inventory.money.saturating_add(listing.price);
    true
}

/// Buy one seed. Returns false when the player cannot afford it.
pub fn buy(inventory: &mut Inventory, listing: &ShopListing) -> bool {
    if inventory.money < listing.price {
        return false;
    }
    inventory.money -= listing.price;
    inventory.add_seed(&listing.item_id, 1);
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Every visit opens on the sell side, at the top.
pub fn on_enter_shop(mut menu: ResMut<ShopMenu>, settings: Res<GameSettings>) {
    *menu = ShopMenu::new(settings.menu_ms);
    info!("[Economy] Entering shop");
}

/// Menu input while the shop is open. Held keys repeat at the menu rate.
pub fn shop_navigation(
    time: Res<Time>,
    input: Res<PlayerInput>,
    shop_data: Res<ShopData>,
    mut menu: ResMut<ShopMenu>,
    mut inventory: ResMut<Inventory>,
    mut next_state: ResMut<NextState<GameState>>,
    mut sfx_writer: EventWriter<PlaySfxEvent>,
) {
    if input.ui_cancel || input.interact {
        info!("[Economy] Leaving shop with {} money", inventory.money);
        next_state.set(GameState::Playing);
        return;
    }

    menu.timer.tick(time.delta());

    let any = input.ui_up || input.ui_down || input.ui_left || input.ui_right || input.ui_confirm;
    if !any || !menu.timer.try_trigger() {
        return;
    }

    let len = menu.side.listings(&shop_data).len();
    if input.ui_up {
        menu.move_up();
    } else if input.ui_down {
        menu.move_down(len);
    } else if input.ui_left {
        menu.switch_side(ShopSide::Sell);
    } else if input.ui_right {
        menu.switch_side(ShopSide::Buy);
    } else if input.ui_confirm {
        let Some(listing) = menu.side.listings(&shop_data).get(menu.index) else {
            return;
        };
        let done = match menu.side {
            ShopSide::Sell => sell(&mut inventory, listing),
            ShopSide::Buy => buy(&mut inventory, listing),
        };
        if done {
            info!(
                "[Economy] {:?} {}, money now {}",
                menu.side, listing.name, inventory.money
            );
            sfx_writer.send(PlaySfxEvent { sfx_id: "success".to_string() });
        }
    }
}
