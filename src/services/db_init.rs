use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

use crate::{models::Stock, store::{Store, StoreResult}};

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    // users: unique email
    {
        let col = db.collection::<mongodb::bson::Document>("users");
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // stocks: unique ticker
    {
        let col = db.collection::<mongodb::bson::Document>("stocks");
        let model = IndexModel::builder()
            .keys(doc! { "ticker": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // swipes: lookups by user, newest first
    {
        let col = db.collection::<mongodb::bson::Document>("swipes");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "updated_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn stock(id: i64, ticker: &str, name: &str, sector: &str, tags: &[&str]) -> Stock {
    Stock {
        id,
        ticker: ticker.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        likes: 0,
    }
}

/// Built-in catalog used when the stocks collection is empty.
pub fn default_catalog() -> Vec<Stock> {
    vec![
        stock(1, "AAPL", "Apple Inc.", "Technology", &["tech", "consumer-electronics", "hardware"]),
        stock(2, "TSLA", "Tesla, Inc.", "Consumer Cyclical", &["tech", "automotive", "ev", "energy"]),
        stock(3, "GOOGL", "Alphabet Inc.", "Communication Services", &["tech", "advertising", "ai", "cloud"]),
        stock(4, "AMZN", "Amazon.com, Inc.", "Consumer Cyclical", &["retail", "ecommerce", "cloud", "tech"]),
        stock(5, "MSFT", "Microsoft Corporation", "Technology", &["tech", "software", "cloud", "ai"]),
        stock(6, "NVDA", "NVIDIA Corporation", "Technology", &["tech", "semiconductors", "ai", "hardware"]),
        stock(7, "F", "Ford Motor Company", "Consumer Cyclical", &["automotive", "manufacturing"]),
        stock(8, "GM", "General Motors Company", "Consumer Cyclical", &["automotive", "manufacturing", "ev"]),
        stock(9, "JPM", "JPMorgan Chase & Co.", "Financial Services", &["finance", "banking"]),
        stock(10, "V", "Visa Inc.", "Financial Services", &["finance", "payments"]),
        stock(11, "XOM", "Exxon Mobil Corporation", "Energy", &["energy", "oil-gas"]),
        stock(12, "JNJ", "Johnson & Johnson", "Healthcare", &["healthcare", "pharma"]),
        stock(13, "PFE", "Pfizer Inc.", "Healthcare", &["healthcare", "pharma", "biotech"]),
        stock(14, "KO", "The Coca-Cola Company", "Consumer Defensive", &["beverages", "consumer-staples"]),
        stock(15, "NFLX", "Netflix, Inc.", "Communication Services", &["media", "streaming", "entertainment"]),
        stock(16, "DIS", "The Walt Disney Company", "Communication Services", &["media", "entertainment", "streaming"]),
    ]
}

/// Seeds the catalog if no stocks exist yet. Returns how many were written.
pub async fn seed_catalog(store: &Store) -> StoreResult<usize> {
    if store.count_stocks().await? > 0 {
        return Ok(0);
    }

    let catalog = default_catalog();
    for s in &catalog {
        store.upsert_stock(s).await?;
    }

    Ok(catalog.len())
}
