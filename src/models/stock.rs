use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "_id")]
    pub id: i64,

    pub ticker: String,
    pub name: String,
    pub sector: String,

    // lowercase labels matched against user interests
    #[serde(default)]
    pub tags: Vec<String>,

    // number of users whose latest swipe on this stock is a like
    #[serde(default)]
    pub likes: i64,
}

/// Wire shape returned to clients. Tags and like counts stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockView {
    pub id: i64,
    pub ticker: String,
    pub name: String,
    pub sector: String,
}

impl From<&Stock> for StockView {
    fn from(s: &Stock) -> Self {
        Self {
            id: s.id,
            ticker: s.ticker.clone(),
            name: s.name.clone(),
            sector: s.sector.clone(),
        }
    }
}

impl From<Stock> for StockView {
    fn from(s: Stock) -> Self {
        Self {
            id: s.id,
            ticker: s.ticker,
            name: s.name,
            sector: s.sector,
        }
    }
}
