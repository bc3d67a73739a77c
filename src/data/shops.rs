use crate::shared::*;

/// Populate the ShopData resource from the trader's price list.
///
/// The trader buys wood and apples from the trees plus every species'
/// produce, and sells seeds for every species. Both lists keep registry
/// order after the tree goods.
pub fn populate_shops(shop_data: &mut ShopData, species: &SpeciesRegistry) {
    // ── Tree goods ────────────────────────────────────────────────
    let mut sell = vec![
        ShopListing {
            item_id: "wood".into(),
            name: "Wood".into(),
            price: 4,
        },
        ShopListing {
            item_id: "apple".into(),
            name: "Apple".into(),
            price: 2,
        },
    ];

    // ── Produce and seeds ─────────────────────────────────────────
    sell.extend(species.species.iter().map(|def| ShopListing {
        item_id: def.id.clone(),
        name: def.name.clone(),
        price: def.sell_price,
    }));

    let buy = species
        .species
        .iter()
        .map(|def| ShopListing {
            item_id: def.id.clone(),
            name: format!("{} seeds", def.name),
            price: def.seed_price,
        })
        .collect();

    shop_data.sell = sell;
    shop_data.buy = buy;
}
