//! Persistence for users, the stock catalog and swipes.
//!
//! `Store` dispatches to MongoDB in production and to an in-process map for
//! tests and local runs. Every interest mutation is a single atomic operation
//! on the backend so concurrent swipes for one user never lose tags.

use thiserror::Error;

use crate::models::{Stock, Swipe, SwipeType, User};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("store error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Fields of a user that does not have an id yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Clone)]
pub enum Store {
    Mongo(MongoStore),
    Memory(MemoryStore),
}

impl Store {
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Mongo(_) => "mongo",
            Store::Memory(_) => "memory",
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        match self {
            Store::Mongo(s) => s.ping().await,
            Store::Memory(_) => Ok(()),
        }
    }

    /// Inserts a user and returns the assigned id.
    pub async fn insert_user(&self, user: NewUser) -> StoreResult<i64> {
        match self {
            Store::Mongo(s) => s.insert_user(user).await,
            Store::Memory(s) => s.insert_user(user).await,
        }
    }

    pub async fn find_user(&self, user_id: i64) -> StoreResult<Option<User>> {
        match self {
            Store::Mongo(s) => s.find_user(user_id).await,
            Store::Memory(s) => s.find_user(user_id).await,
        }
    }

    /// Set-union of `tags` into the user's interests. `Ok(false)` if the user does not exist.
    pub async fn add_interests(&self, user_id: i64, tags: &[String]) -> StoreResult<bool> {
        match self {
            Store::Mongo(s) => s.add_interests(user_id, tags).await,
            Store::Memory(s) => s.add_interests(user_id, tags).await,
        }
    }

    /// Replaces the user's interests. `Ok(false)` if the user does not exist.
    pub async fn set_interests(&self, user_id: i64, tags: &[String]) -> StoreResult<bool> {
        match self {
            Store::Mongo(s) => s.set_interests(user_id, tags).await,
            Store::Memory(s) => s.set_interests(user_id, tags).await,
        }
    }

    pub async fn find_stock(&self, stock_id: i64) -> StoreResult<Option<Stock>> {
        match self {
            Store::Mongo(s) => s.find_stock(stock_id).await,
            Store::Memory(s) => s.find_stock(stock_id).await,
        }
    }

    pub async fn list_stocks(&self) -> StoreResult<Vec<Stock>> {
        match self {
            Store::Mongo(s) => s.list_stocks().await,
            Store::Memory(s) => s.list_stocks().await,
        }
    }

    /// Case-insensitive substring match on ticker or name, ordered by ticker.
    pub async fn search_stocks(&self, query: &str, limit: usize) -> StoreResult<Vec<Stock>> {
        match self {
            Store::Mongo(s) => s.search_stocks(query, limit).await,
            Store::Memory(s) => s.search_stocks(query, limit).await,
        }
    }

    pub async fn count_stocks(&self) -> StoreResult<u64> {
        match self {
            Store::Mongo(s) => s.count_stocks().await,
            Store::Memory(s) => s.count_stocks().await,
        }
    }

    pub async fn upsert_stock(&self, stock: &Stock) -> StoreResult<()> {
        match self {
            Store::Mongo(s) => s.upsert_stock(stock).await,
            Store::Memory(s) => s.upsert_stock(stock).await,
        }
    }

    pub async fn adjust_likes(&self, stock_id: i64, delta: i64) -> StoreResult<()> {
        match self {
            Store::Mongo(s) => s.adjust_likes(stock_id, delta).await,
            Store::Memory(s) => s.adjust_likes(stock_id, delta).await,
        }
    }

    /// Upserts the (user, stock) swipe and returns the type it had before, if any.
    pub async fn put_swipe(&self, swipe: &Swipe) -> StoreResult<Option<SwipeType>> {
        match self {
            Store::Mongo(s) => s.put_swipe(swipe).await,
            Store::Memory(s) => s.put_swipe(swipe).await,
        }
    }

    pub async fn find_swipe(&self, user_id: i64, stock_id: i64) -> StoreResult<Option<Swipe>> {
        match self {
            Store::Mongo(s) => s.find_swipe(user_id, stock_id).await,
            Store::Memory(s) => s.find_swipe(user_id, stock_id).await,
        }
    }
}

/// Substring match used by the memory backend; the Mongo backend expresses
/// the same rule as an escaped case-insensitive `$regex`.
pub fn stock_matches(stock: &Stock, needle_lower: &str) -> bool {
    stock.ticker.to_lowercase().contains(needle_lower)
        || stock.name.to_lowercase().contains(needle_lower)
}
