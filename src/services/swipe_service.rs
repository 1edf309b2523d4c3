use chrono::Utc;

use crate::{
    error::{ApiError, ApiResult},
    models::{Swipe, SwipeType},
    AppState,
};

pub fn parse_swipe_type(raw: &str) -> ApiResult<SwipeType> {
    raw.parse::<SwipeType>().map_err(|_| {
        ApiError::Validation(format!(
            "Invalid swipeType '{raw}': expected \"like\" or \"dislike\"."
        ))
    })
}

// change to a stock's like counter when a user's swipe goes from `prev` to `next`
fn likes_delta(prev: Option<SwipeType>, next: SwipeType) -> i64 {
    match (prev, next) {
        (Some(SwipeType::Like), SwipeType::Like) => 0,
        (_, SwipeType::Like) => 1,
        (Some(SwipeType::Like), SwipeType::Dislike) => -1,
        (_, SwipeType::Dislike) => 0,
    }
}

/// Records a swipe. A like unions the stock's tags into the user's interests;
/// repeating the same swipe leaves tags and like counts unchanged.
pub async fn record_swipe(state: &AppState, user_id: i64, stock_id: i64, swipe_type: &str) -> ApiResult<SwipeType> {
    let kind = parse_swipe_type(swipe_type)?;

    if state.store.find_user(user_id).await?.is_none() {
        return Err(ApiError::user_not_found(user_id));
    }

    let stock = state
        .store
        .find_stock(stock_id)
        .await?
        .ok_or_else(|| ApiError::stock_not_found(stock_id))?;

    if kind == SwipeType::Like {
        let tags: Vec<String> = stock
            .tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if !state.store.add_interests(user_id, &tags).await? {
            return Err(ApiError::user_not_found(user_id));
        }
    }

    let prev = state
        .store
        .put_swipe(&Swipe::new(user_id, stock_id, kind, Utc::now().timestamp()))
        .await?;

    let delta = likes_delta(prev, kind);
    if delta != 0 {
        state.store.adjust_likes(stock_id, delta).await?;
    }

    tracing::info!(user_id, stock_id, ticker = %stock.ticker, swipe = %kind, "swipe recorded");
    Ok(kind)
}
