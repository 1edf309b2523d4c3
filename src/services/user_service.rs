use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::{
    error::{ApiError, ApiResult},
    store::NewUser,
    AppState,
};

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
}

/// Trims + lowercases an email, rejecting anything that doesn't look like one.
pub fn normalize_email(raw: &str) -> ApiResult<String> {
    let email = raw.trim().to_lowercase();

    if email.is_empty() {
        return Err(ApiError::Validation("Email is required.".into()));
    }
    if !email_re().is_match(&email) {
        return Err(ApiError::Validation("Please enter a valid email address.".into()));
    }

    Ok(email)
}

/// Trims + lowercases tags and drops duplicates. Blank tags are rejected.
pub fn normalize_tags(raw: &[String]) -> ApiResult<Vec<String>> {
    let mut out = BTreeSet::new();
    for tag in raw {
        let t = tag.trim().to_lowercase();
        if t.is_empty() {
            return Err(ApiError::Validation("Interest tags must not be blank.".into()));
        }
        out.insert(t);
    }
    Ok(out.into_iter().collect())
}

pub async fn create_user(state: &AppState, email: &str, password: &str) -> ApiResult<i64> {
    let email = normalize_email(email)?;

    if password.is_empty() {
        return Err(ApiError::Validation("Password is required.".into()));
    }

    let cost = state.settings.bcrypt_cost;
    let password = password.to_string();
    // bcrypt is deliberately slow; keep it off the async workers
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::Server(format!("hash task failed: {e}")))?
        .map_err(|e| ApiError::Server(format!("failed to hash password: {e}")))?;

    let user_id = state
        .store
        .insert_user(NewUser {
            email: email.clone(),
            password_hash,
            created_at: Utc::now().timestamp(),
        })
        .await?;

    tracing::info!(user_id, %email, "user registered");
    Ok(user_id)
}

pub async fn add_interests(state: &AppState, user_id: i64, tags: &[String]) -> ApiResult<()> {
    let tags = normalize_tags(tags)?;

    if !state.store.add_interests(user_id, &tags).await? {
        return Err(ApiError::user_not_found(user_id));
    }

    tracing::debug!(user_id, added = tags.len(), "interests appended");
    Ok(())
}

pub async fn replace_interests(state: &AppState, user_id: i64, tags: &[String]) -> ApiResult<()> {
    let tags = normalize_tags(tags)?;

    if !state.store.set_interests(user_id, &tags).await? {
        return Err(ApiError::user_not_found(user_id));
    }

    tracing::debug!(user_id, count = tags.len(), "interests replaced");
    Ok(())
}

pub async fn clear_interests(state: &AppState, user_id: i64) -> ApiResult<()> {
    if !state.store.set_interests(user_id, &[]).await? {
        return Err(ApiError::user_not_found(user_id));
    }

    tracing::debug!(user_id, "interests cleared");
    Ok(())
}

pub async fn get_interests(state: &AppState, user_id: i64) -> ApiResult<BTreeSet<String>> {
    state
        .store
        .find_user(user_id)
        .await?
        .map(|u| u.interests)
        .ok_or_else(|| ApiError::user_not_found(user_id))
}
