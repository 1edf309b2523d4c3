use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeType {
    Like,
    Dislike,
}

impl SwipeType {
    pub fn as_str(self) -> &'static str {
        match self {
            SwipeType::Like => "like",
            SwipeType::Dislike => "dislike",
        }
    }
}

impl fmt::Display for SwipeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwipeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(SwipeType::Like),
            "dislike" => Ok(SwipeType::Dislike),
            _ => Err(()),
        }
    }
}

/// Latest swipe of one user on one stock. `_id` is `"{user_id}:{stock_id}"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swipe {
    #[serde(rename = "_id")]
    pub id: String,

    pub user_id: i64,
    pub stock_id: i64,
    pub swipe_type: SwipeType,

    pub updated_at: i64,
}

impl Swipe {
    pub fn key(user_id: i64, stock_id: i64) -> String {
        format!("{user_id}:{stock_id}")
    }

    pub fn new(user_id: i64, stock_id: i64, swipe_type: SwipeType, updated_at: i64) -> Self {
        Self {
            id: Self::key(user_id, stock_id),
            user_id,
            stock_id,
            swipe_type,
            updated_at,
        }
    }
}
