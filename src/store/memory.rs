use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Stock, Swipe, SwipeType, User};

use super::{stock_matches, NewUser, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    emails: HashMap<String, i64>,
    next_user_id: i64,
    stocks: BTreeMap<i64, Stock>,
    swipes: HashMap<String, Swipe>,
}

/// In-process store. All mutations take the write lock, which serialises
/// read-modify-write of a user's interests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: NewUser) -> StoreResult<i64> {
        let mut g = self.inner.write().await;

        if g.emails.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        g.next_user_id += 1;
        let id = g.next_user_id;

        g.emails.insert(user.email.clone(), id);
        g.users.insert(
            id,
            User {
                id,
                email: user.email,
                password_hash: user.password_hash,
                interests: Default::default(),
                created_at: user.created_at,
            },
        );

        Ok(id)
    }

    pub async fn find_user(&self, user_id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&user_id).cloned())
    }

    pub async fn add_interests(&self, user_id: i64, tags: &[String]) -> StoreResult<bool> {
        let mut g = self.inner.write().await;
        let Some(user) = g.users.get_mut(&user_id) else {
            return Ok(false);
        };
        user.interests.extend(tags.iter().cloned());
        Ok(true)
    }

    pub async fn set_interests(&self, user_id: i64, tags: &[String]) -> StoreResult<bool> {
        let mut g = self.inner.write().await;
        let Some(user) = g.users.get_mut(&user_id) else {
            return Ok(false);
        };
        user.interests = tags.iter().cloned().collect();
        Ok(true)
    }

    pub async fn find_stock(&self, stock_id: i64) -> StoreResult<Option<Stock>> {
        Ok(self.inner.read().await.stocks.get(&stock_id).cloned())
    }

    pub async fn list_stocks(&self) -> StoreResult<Vec<Stock>> {
        Ok(self.inner.read().await.stocks.values().cloned().collect())
    }

    pub async fn search_stocks(&self, query: &str, limit: usize) -> StoreResult<Vec<Stock>> {
        let needle = query.to_lowercase();
        let g = self.inner.read().await;

        let mut hits: Vec<Stock> = g
            .stocks
            .values()
            .filter(|s| stock_matches(s, &needle))
            .cloned()
            .collect();

        hits.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        hits.truncate(limit);
        Ok(hits)
    }

    pub async fn count_stocks(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.stocks.len() as u64)
    }

    pub async fn upsert_stock(&self, stock: &Stock) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .stocks
            .insert(stock.id, stock.clone());
        Ok(())
    }

    pub async fn adjust_likes(&self, stock_id: i64, delta: i64) -> StoreResult<()> {
        if let Some(stock) = self.inner.write().await.stocks.get_mut(&stock_id) {
            stock.likes = (stock.likes + delta).max(0);
        }
        Ok(())
    }

    pub async fn put_swipe(&self, swipe: &Swipe) -> StoreResult<Option<SwipeType>> {
        let prev = self
            .inner
            .write()
            .await
            .swipes
            .insert(swipe.id.clone(), swipe.clone());
        Ok(prev.map(|s| s.swipe_type))
    }

    pub async fn find_swipe(&self, user_id: i64, stock_id: i64) -> StoreResult<Option<Swipe>> {
        Ok(self
            .inner
            .read()
            .await
            .swipes
            .get(&Swipe::key(user_id, stock_id))
            .cloned())
    }
}
