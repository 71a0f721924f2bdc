//! Gem shop.

use crate::error::PurchaseError;
use crate::profile::Profile;

/// An item for sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u64,
    pub icon: &'static str,
}

pub const SHOP_ITEMS: &[ShopItem] = &[
    ShopItem {
        id: "streak_freeze",
        name: "Streak Freeze",
        description: "Miss a day without losing streak.",
        price: 80,
        icon: "🧊",
    },
    ShopItem {
        id: "heart_refill",
        name: "Heart Refill",
        description: "More tries in tough lessons.",
        price: 50,
        icon: "❤️",
    },
    ShopItem {
        id: "double_xp",
        name: "Double XP (1h)",
        description: "Earn 2× XP for one hour.",
        price: 120,
        icon: "⚡",
    },
    ShopItem {
        id: "sticker_pack",
        name: "Sticker Pack",
        description: "Cosmetic reward. Pure vibes.",
        price: 60,
        icon: "🎨",
    },
    ShopItem {
        id: "owl_hat",
        name: "Owl Hat",
        description: "A silly cosmetic. Big flex.",
        price: 200,
        icon: "🎩",
    },
];

pub fn find_item<'a>(items: &'a [ShopItem], item_id: &str) -> Option<&'a ShopItem> {
    items.iter().find(|item| item.id == item_id)
}

/// Buy `item_id` from `items`.
///
/// Checked in order: the item exists, is not owned yet, and is affordable.
/// On success the gems are debited and the item added in one step.
pub fn purchase<'a>(
    profile: &mut Profile,
    items: &'a [ShopItem],
    item_id: &str,
) -> Result<&'a ShopItem, PurchaseError> {
    let item = find_item(items, item_id).ok_or_else(|| PurchaseError::NotFound(item_id.to_string()))?;

    if profile.has_item(item.id) {
        return Err(PurchaseError::AlreadyOwned(item.id.to_string()));
    }
    if profile.gems < item.price {
        return Err(PurchaseError::InsufficientFunds {
            price: item.price,
            balance: profile.gems,
        });
    }

    profile.gems -= item.price;
    profile.owned_items.push(item.id.to_string());
    Ok(item)
}

/// Display names of owned items; ids the shop no longer sells are shown as-is.
pub fn inventory_names(profile: &Profile, items: &[ShopItem]) -> Vec<String> {
    profile
        .owned_items
        .iter()
        .map(|id| {
            find_item(items, id)
                .map(|item| item.name.to_string())
                .unwrap_or_else(|| id.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(gems: u64) -> Profile {
        Profile {
            gems,
            ..Profile::default()
        }
    }

    #[test]
    fn exact_balance_buys_and_second_buy_is_already_owned() {
        let mut profile = profile_with(50);
        let item = purchase(&mut profile, SHOP_ITEMS, "heart_refill").unwrap();
        assert_eq!(item.name, "Heart Refill");
        assert_eq!(profile.gems, 0);
        assert!(profile.has_item("heart_refill"));

        let again = purchase(&mut profile, SHOP_ITEMS, "heart_refill");
        assert_eq!(again, Err(PurchaseError::AlreadyOwned("heart_refill".to_string())));
    }

    #[test]
    fn insufficient_funds_changes_nothing() {
        let mut profile = profile_with(10);
        let result = purchase(&mut profile, SHOP_ITEMS, "owl_hat");
        assert_eq!(
            result,
            Err(PurchaseError::InsufficientFunds { price: 200, balance: 10 })
        );
        assert_eq!(profile.gems, 10);
        assert!(profile.owned_items.is_empty());
    }

    #[test]
    fn unknown_item_is_not_found() {
        let mut profile = profile_with(1000);
        assert_eq!(
            purchase(&mut profile, SHOP_ITEMS, "jetpack"),
            Err(PurchaseError::NotFound("jetpack".to_string()))
        );
    }

    #[test]
    fn inventory_keeps_unknown_ids() {
        let mut profile = profile_with(0);
        profile.owned_items = vec!["owl_hat".to_string(), "retired_badge".to_string()];
        assert_eq!(inventory_names(&profile, SHOP_ITEMS), vec!["Owl Hat", "retired_badge"]);
    }
}
