pub mod db_init;

pub mod user_service;
pub mod stocks_service;
pub mod swipe_service;
