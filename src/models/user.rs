use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,

    // stored trimmed + lowercased, unique index
    pub email: String,
    pub password_hash: String,

    #[serde(default)]
    pub interests: BTreeSet<String>,

    pub created_at: i64,
}
