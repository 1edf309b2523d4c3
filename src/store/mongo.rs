use futures_util::StreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReplaceOptions, ReturnDocument},
    Client, Database,
};

use crate::models::{Stock, Swipe, SwipeType, User};

use super::{NewUser, StoreError, StoreResult};

fn backend(e: mongodb::error::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await.map_err(backend)?;
        Ok(Self::new(client.database(db_name)))
    }

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(backend)?;
        Ok(())
    }

    // integer ids: counters { _id: <collection>, seq: i64 }
    async fn next_id(&self, name: &str) -> StoreResult<i64> {
        let counters = self.db.collection::<Document>("counters");
        let opts = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = counters
            .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } }, opts)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::Backend(format!("counter {name} missing after upsert")))?;

        counter
            .get_i64("seq")
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    pub async fn insert_user(&self, user: NewUser) -> StoreResult<i64> {
        let users = self.db.collection::<User>("users");

        // unique email; the users.email index catches races
        if users
            .find_one(doc! { "email": &user.email }, None)
            .await
            .map_err(backend)?
            .is_some()
        {
            return Err(StoreError::DuplicateEmail);
        }

        let id = self.next_id("users").await?;
        let doc = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            interests: Default::default(),
            created_at: user.created_at,
        };

        if let Err(e) = users.insert_one(&doc, None).await {
            let msg = e.to_string();
            if msg.contains("E11000") {
                return Err(StoreError::DuplicateEmail);
            }
            return Err(StoreError::Backend(msg));
        }

        Ok(id)
    }

    pub async fn find_user(&self, user_id: i64) -> StoreResult<Option<User>> {
        self.db
            .collection::<User>("users")
            .find_one(doc! { "_id": user_id }, None)
            .await
            .map_err(backend)
    }

    pub async fn add_interests(&self, user_id: i64, tags: &[String]) -> StoreResult<bool> {
        let res = self
            .db
            .collection::<User>("users")
            .update_one(
                doc! { "_id": user_id },
                doc! { "$addToSet": { "interests": { "$each": tags.to_vec() } } },
                None,
            )
            .await
            .map_err(backend)?;
        Ok(res.matched_count > 0)
    }

    pub async fn set_interests(&self, user_id: i64, tags: &[String]) -> StoreResult<bool> {
        let res = self
            .db
            .collection::<User>("users")
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": { "interests": tags.to_vec() } },
                None,
            )
            .await
            .map_err(backend)?;
        Ok(res.matched_count > 0)
    }

    pub async fn find_stock(&self, stock_id: i64) -> StoreResult<Option<Stock>> {
        self.db
            .collection::<Stock>("stocks")
            .find_one(doc! { "_id": stock_id }, None)
            .await
            .map_err(backend)
    }

    async fn collect_stocks(&self, filter: Document, opts: FindOptions) -> StoreResult<Vec<Stock>> {
        let mut cursor = self
            .db
            .collection::<Stock>("stocks")
            .find(filter, opts)
            .await
            .map_err(backend)?;

        let mut out: Vec<Stock> = vec![];
        while let Some(res) = cursor.next().await {
            out.push(res.map_err(backend)?);
        }
        Ok(out)
    }

    pub async fn list_stocks(&self) -> StoreResult<Vec<Stock>> {
        let opts = FindOptions::builder().sort(doc! { "ticker": 1 }).build();
        self.collect_stocks(doc! {}, opts).await
    }

    pub async fn search_stocks(&self, query: &str, limit: usize) -> StoreResult<Vec<Stock>> {
        let pattern = regex::escape(query);
        let filter = doc! {
            "$or": [
                { "ticker": { "$regex": &pattern, "$options": "i" } },
                { "name": { "$regex": &pattern, "$options": "i" } },
            ]
        };
        let opts = FindOptions::builder()
            .sort(doc! { "ticker": 1 })
            .limit(limit as i64)
            .build();

        self.collect_stocks(filter, opts).await
    }

    pub async fn count_stocks(&self) -> StoreResult<u64> {
        self.db
            .collection::<Stock>("stocks")
            .count_documents(doc! {}, None)
            .await
            .map_err(backend)
    }

    pub async fn upsert_stock(&self, stock: &Stock) -> StoreResult<()> {
        self.db
            .collection::<Stock>("stocks")
            .replace_one(
                doc! { "_id": stock.id },
                stock,
                ReplaceOptions::builder().upsert(true).build(),
            )
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn adjust_likes(&self, stock_id: i64, delta: i64) -> StoreResult<()> {
        self.db
            .collection::<Stock>("stocks")
            .update_one(
                doc! { "_id": stock_id },
                doc! { "$inc": { "likes": delta } },
                None,
            )
            .await
            .map_err(backend)?;
        Ok(())
    }

    pub async fn put_swipe(&self, swipe: &Swipe) -> StoreResult<Option<SwipeType>> {
        let opts = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::Before)
            .build();

        let prev = self
            .db
            .collection::<Swipe>("swipes")
            .find_one_and_update(
                doc! { "_id": swipe.id.as_str() },
                doc! {
                    "$set": {
                        "user_id": swipe.user_id,
                        "stock_id": swipe.stock_id,
                        "swipe_type": swipe.swipe_type.as_str(),
                        "updated_at": swipe.updated_at,
                    }
                },
                opts,
            )
            .await
            .map_err(backend)?;

        Ok(prev.map(|s| s.swipe_type))
    }

    pub async fn find_swipe(&self, user_id: i64, stock_id: i64) -> StoreResult<Option<Swipe>> {
        self.db
            .collection::<Swipe>("swipes")
            .find_one(doc! { "_id": Swipe::key(user_id, stock_id) }, None)
            .await
            .map_err(backend)
    }
}
