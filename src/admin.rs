// src/admin.rs — Admin dashboard aggregations
//
// Read-only computations over the catalog and the analytics log,
// serialized for the stats endpoints and the CLI. The dashboard UI
// itself is an external collaborator; this module is its data source.

use serde::Serialize;

use crate::analytics::AnalyticsEntry;
use crate::catalog::{Book, Catalog, Genre, Order, OrderStatus};
use crate::engine::keywords;

pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Catalog-table stock tier. Note: these cutoffs differ from the
/// search-result availability labels on purpose — stock 10 is "medium"
/// here but a low-stock warning in chat replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTier {
    High,
    Medium,
    Low,
}

impl StockTier {
    pub fn for_stock(stock: u32) -> Self {
        if stock > 15 {
            StockTier::High
        } else if stock > 7 {
            StockTier::Medium
        } else {
            StockTier::Low
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntentBucket {
    pub name: &'static str,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenrePopularity {
    pub genre: Genre,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_books: usize,
    pub total_orders: usize,
    /// Revenue over all non-cancelled orders.
    pub total_revenue: u64,
    pub total_stock: u64,
    pub low_stock_books: Vec<String>,
    pub order_status_summary: Vec<StatusCount>,
    pub total_chat_messages: usize,
    pub unique_sessions: usize,
    pub intent_stats: Vec<IntentBucket>,
    pub genre_popularity: Vec<GenrePopularity>,
}

impl DashboardStats {
    pub fn compute(catalog: &Catalog, logs: &[AnalyticsEntry]) -> Self {
        let total_revenue = catalog
            .orders()
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total as u64)
            .sum();

        let low_stock_books = catalog
            .books()
            .iter()
            .filter(|b| b.stock < LOW_STOCK_THRESHOLD)
            .map(|b| b.title.clone())
            .collect();

        let order_status_summary = OrderStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: catalog
                    .orders()
                    .iter()
                    .filter(|o| o.status == *status)
                    .count(),
            })
            .collect();

        let unique_sessions = {
            let mut ids: Vec<&str> = logs.iter().map(|l| l.session_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            ids.len()
        };

        Self {
            total_books: catalog.books().len(),
            total_orders: catalog.orders().len(),
            total_revenue,
            total_stock: catalog.books().iter().map(|b| b.stock as u64).sum(),
            low_stock_books,
            order_status_summary,
            total_chat_messages: logs.len(),
            unique_sessions,
            intent_stats: intent_stats(logs),
            genre_popularity: genre_popularity(logs),
        }
    }
}

/// Bucket chat logs by recorded intent first, message keywords second.
fn intent_stats(logs: &[AnalyticsEntry]) -> Vec<IntentBucket> {
    use crate::engine::Intent;

    let mut counts = [
        ("Order Tracking", 0usize),
        ("Recommendations", 0),
        ("Genre Browse", 0),
        ("FAQ", 0),
        ("Book Queries", 0),
        ("Greetings", 0),
        ("Other", 0),
    ];

    for log in logs {
        let msg = log.user_message.to_lowercase();
        let intent = log.intent;
        let slot = if intent == Intent::Order
            || msg.contains("order")
            || msg.contains("track")
            || keywords::find_order_id(&msg).is_some()
        {
            0
        } else if intent == Intent::Recommend
            || msg.contains("recommend")
            || msg.contains("suggest")
        {
            1
        } else if intent == Intent::Category
            || msg.contains("genre")
            || msg.contains("fiction")
            || msg.contains("fantasy")
            || msg.contains("thriller")
            || msg.contains("self-help")
        {
            2
        } else if intent == Intent::Faq
            || msg.contains("delivery")
            || msg.contains("shipping")
            || msg.contains("refund")
            || msg.contains("payment")
            || msg.contains("cancel")
        {
            3
        } else if intent == Intent::Browse
            || msg.contains("book")
            || msg.contains("catalog")
            || msg.contains("browse")
            || msg.contains("search")
            || msg.contains("available")
        {
            4
        } else if intent == Intent::Greeting
            || msg.contains("hello")
            || msg.contains("hi")
            || msg.contains("hey")
        {
            5
        } else {
            6
        };
        counts[slot].1 += 1;
    }

    let total = logs.len().max(1);
    let mut buckets: Vec<IntentBucket> = counts
        .iter()
        .map(|(name, count)| IntentBucket {
            name,
            count: *count,
            percentage: (*count * 100 / total) as u32,
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// First genre keyword per message, counted per genre, busiest first.
fn genre_popularity(logs: &[AnalyticsEntry]) -> Vec<GenrePopularity> {
    let mut counts: Vec<(Genre, usize)> = Genre::ALL.iter().map(|g| (*g, 0)).collect();
    for log in logs {
        let msg = log.user_message.to_lowercase();
        if let Some(genre) = keywords::find_genre(&msg) {
            if let Some(slot) = counts.iter_mut().find(|(g, _)| *g == genre) {
                slot.1 += 1;
            }
        }
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let total = total.max(1);
    let mut popular: Vec<GenrePopularity> = counts
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(genre, count)| GenrePopularity {
            genre,
            count,
            percentage: (count * 100 / total) as u32,
        })
        .collect();
    popular.sort_by(|a, b| b.count.cmp(&a.count));
    popular
}

/// Case-insensitive book filter over title/author/id plus an optional
/// genre restriction.
pub fn filter_books<'a>(
    catalog: &'a Catalog,
    search: &str,
    genre: Option<Genre>,
) -> Vec<&'a Book> {
    let needle = search.to_lowercase();
    catalog
        .books()
        .iter()
        .filter(|b| {
            let matches_search = needle.is_empty()
                || b.title.to_lowercase().contains(&needle)
                || b.author.to_lowercase().contains(&needle)
                || b.id.to_lowercase().contains(&needle);
            let matches_genre = genre.is_none_or(|g| b.genre == g);
            matches_search && matches_genre
        })
        .collect()
}

/// Case-insensitive order filter over id/customer/email plus an
/// optional status restriction.
pub fn filter_orders<'a>(
    catalog: &'a Catalog,
    search: &str,
    status: Option<OrderStatus>,
) -> Vec<&'a Order> {
    let needle = search.to_lowercase();
    catalog
        .orders()
        .iter()
        .filter(|o| {
            let matches_search = needle.is_empty()
                || o.id.to_lowercase().contains(&needle)
                || o.customer.to_lowercase().contains(&needle)
                || o.email.to_lowercase().contains(&needle);
            let matches_status = status.is_none_or(|s| o.status == s);
            matches_search && matches_status
        })
        .collect()
}
