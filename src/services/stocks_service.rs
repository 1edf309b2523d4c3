use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::{
    error::{ApiError, ApiResult},
    models::{Stock, StockView},
    AppState,
};

/// Number of a stock's tags that appear in `interests`.
pub fn overlap(stock: &Stock, interests: &BTreeSet<String>) -> usize {
    stock
        .tags
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|t| interests.contains(t.as_str()))
        .count()
}

/// Stocks sharing at least one tag with `interests`, most overlap first,
/// ties broken by ticker.
pub fn rank_by_interest(stocks: Vec<Stock>, interests: &BTreeSet<String>, limit: usize) -> Vec<Stock> {
    let mut scored: Vec<(usize, Stock)> = stocks
        .into_iter()
        .map(|s| (overlap(&s, interests), s))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.ticker.cmp(&b.ticker)));

    scored.into_iter().take(limit).map(|(_, s)| s).collect()
}

/// Fallback for users without interests: most liked first, ties by ticker.
pub fn rank_by_popularity(mut stocks: Vec<Stock>, limit: usize) -> Vec<Stock> {
    stocks.sort_by(|a, b| {
        Reverse(a.likes)
            .cmp(&Reverse(b.likes))
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    stocks.truncate(limit);
    stocks
}

pub async fn recommendations(state: &AppState, user_id: i64) -> ApiResult<Vec<StockView>> {
    // single read: ranking works on this snapshot of the interest set
    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;

    let stocks = state.store.list_stocks().await?;
    let limit = state.settings.recommendation_limit.max(1);

    let ranked = if user.interests.is_empty() {
        rank_by_popularity(stocks, limit)
    } else {
        rank_by_interest(stocks, &user.interests, limit)
    };

    tracing::debug!(
        user_id,
        interests = user.interests.len(),
        results = ranked.len(),
        "recommendations computed"
    );

    Ok(ranked.into_iter().map(StockView::from).collect())
}

/// Empty query => no results, no error.
pub async fn search(state: &AppState, query: &str) -> ApiResult<Vec<StockView>> {
    let q = query.trim();

    if q.is_empty() {
        return Ok(vec![]);
    }

    let hits = state
        .store
        .search_stocks(q, state.settings.search_limit.max(1))
        .await?;

    Ok(hits.into_iter().map(StockView::from).collect())
}
