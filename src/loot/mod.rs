//! Loot module - coin drop rolls, coin bodies and the player's purse.

mod drops;
mod plugin;

pub use drops::{roll_drop_count, scatter_coins, SETTLE_TICKS};
pub use plugin::{Coin, LootPlugin, Purse, SettleCoin};
