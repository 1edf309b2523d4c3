use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub storage: StorageBackend,
    pub bcrypt_cost: u32,

    pub recommendation_limit: usize,
    pub search_limit: usize,
    pub seed_catalog: bool,
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "swipestock".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    // the mobile client points at :5001 by default
    let port = parse_or("PORT", 5001u16);

    let storage = match env::var("STORAGE").unwrap_or_default().trim().to_lowercase().as_str() {
        "memory" | "mem" => StorageBackend::Memory,
        _ => StorageBackend::Mongo,
    };

    // bcrypt rejects costs outside 4..=31
    let bcrypt_cost = parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST).clamp(4, 31);

    // a limit of 0 would mean "nothing" in memory but "unbounded" in Mongo
    let recommendation_limit = parse_or("RECOMMENDATION_LIMIT", 20usize).max(1);
    let search_limit = parse_or("SEARCH_LIMIT", 10usize).max(1);

    let seed_catalog = env::var("SEED_CATALOG")
        .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"))
        .unwrap_or(true);

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        storage,
        bcrypt_cost,
        recommendation_limit,
        search_limit,
        seed_catalog,
    }
}
