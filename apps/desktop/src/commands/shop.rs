//! Shop commands.

use crate::commands::CommandError;
use crate::state::{AppState, PURCHASE_COUNT_DURATION};
use lesson_core::shop::{self, ShopItem, SHOP_ITEMS};
use lesson_core::{LessonHost, Profile, PurchaseError, Severity};
use std::time::Duration;
use tracing::info;

const EMPTY_INVENTORY: &str = "Empty — buy something fun!";

/// Buy the item at 1-based position `selector` in the shop, or with that id.
///
/// The outcome is reported to the user as a toast either way.
pub fn buy_item(state: &mut AppState, selector: &str) -> Result<&'static ShopItem, CommandError> {
    let item_id = match selector.parse::<usize>() {
        Ok(n) => n
            .checked_sub(1)
            .and_then(|i| SHOP_ITEMS.get(i))
            .map_or(selector, |item| item.id),
        Err(_) => selector,
    };

    match shop::purchase(&mut state.profile, SHOP_ITEMS, item_id) {
        Ok(item) => {
            info!(item = item.id, price = item.price, "item purchased");
            state.persist();
            state.animate_counters(PURCHASE_COUNT_DURATION);
            state.notify(
                &format!("Purchased {} {}", item.name, item.icon),
                Severity::Success,
                Duration::from_millis(2200),
            );
            Ok(item)
        }
        Err(e) => {
            let (message, severity, millis) = match &e {
                PurchaseError::NotFound(_) => ("Item not found.".to_string(), Severity::Error, 2200),
                PurchaseError::AlreadyOwned(_) => ("Already owned.".to_string(), Severity::Info, 1800),
                PurchaseError::InsufficientFunds { price, .. } => {
                    (format!("Not enough gems. Need {price}💎."), Severity::Warn, 2400)
                }
            };
            state.notify(&message, severity, Duration::from_millis(millis));
            Err(e.into())
        }
    }
}

/// Owned items as one line.
pub fn inventory_text(profile: &Profile) -> String {
    let names = shop::inventory_names(profile, SHOP_ITEMS);
    if names.is_empty() {
        EMPTY_INVENTORY.to_string()
    } else {
        names.join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonProfileStore, ProfileRepository};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn toast_text(state: &AppState) -> Option<&str> {
        state.toast.visible().map(|t| t.message.as_str())
    }

    #[test]
    fn purchase_outcomes_become_toasts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user_data.json");
        let mut state = AppState::new(Box::new(JsonProfileStore::open(&path)));
        state.profile.gems = 60;

        assert!(buy_item(&mut state, "owl_hat").is_err());
        assert_eq!(toast_text(&state), Some("Not enough gems. Need 200💎."));

        assert!(buy_item(&mut state, "jetpack").is_err());
        assert_eq!(toast_text(&state), Some("Item not found."));

        let item = buy_item(&mut state, "4").unwrap();
        assert_eq!(item.id, "sticker_pack");
        assert_eq!(toast_text(&state), Some("Purchased Sticker Pack 🎨"));
        assert_eq!(state.profile.gems, 0);

        assert!(buy_item(&mut state, "sticker_pack").is_err());
        assert_eq!(toast_text(&state), Some("Already owned."));

        let saved = JsonProfileStore::open(&path).load();
        assert_eq!(saved.owned_items, vec!["sticker_pack"]);
    }

    #[test]
    fn out_of_range_position_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::new(Box::new(JsonProfileStore::open(dir.path().join("p.json"))));
        state.profile.gems = 500;
        let err = buy_item(&mut state, "9").unwrap_err();
        assert_eq!(err.message, "item not found: 9");
    }

    #[test]
    fn inventory_lists_names_or_placeholder() {
        let mut profile = Profile::default();
        assert_eq!(inventory_text(&profile), "Empty — buy something fun!");
        profile.owned_items = vec!["owl_hat".to_string(), "heart_refill".to_string()];
        assert_eq!(inventory_text(&profile), "Owl Hat • Heart Refill");
    }
}
