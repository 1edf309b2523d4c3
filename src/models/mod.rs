pub mod user;
pub mod stock;
pub mod swipe;

pub use user::User;
pub use stock::{Stock, StockView};
pub use swipe::{Swipe, SwipeType};
