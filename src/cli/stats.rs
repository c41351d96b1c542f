// src/cli/stats.rs — Store dashboard from the terminal

use std::sync::Arc;

use crate::admin::DashboardStats;
use crate::catalog::Catalog;
use crate::infra::config::Config;
use crate::analytics::AnalyticsLog;
use crate::storage::{JsonFileStore, KeyValueStore};

pub fn show_stats(config: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::new()?;

    // Read persisted chat logs when available so the numbers match
    // what the chat command has recorded.
    let store: Option<Arc<dyn KeyValueStore>> = match config.data_dir() {
        Some(dir) if config.storage.persist && dir.exists() => {
            Some(Arc::new(JsonFileStore::new(dir)?))
        }
        _ => None,
    };
    let analytics = AnalyticsLog::new(store);
    let logs = analytics.entries();

    let stats = DashboardStats::compute(&catalog, &logs);

    println!("PageTurner Books — store overview");
    println!("  Books:   {} titles, {} in stock", stats.total_books, stats.total_stock);
    println!("  Orders:  {} total, ₹{} revenue", stats.total_orders, stats.total_revenue);
    for entry in &stats.order_status_summary {
        println!("    {} {:?}: {}", entry.status.emoji(), entry.status, entry.count);
    }

    if stats.low_stock_books.is_empty() {
        println!("  Low stock: none");
    } else {
        println!("  Low stock ({}):", stats.low_stock_books.len());
        for title in &stats.low_stock_books {
            println!("    {title}");
        }
    }

    println!(
        "  Chat: {} logged message(s) across {} session(s)",
        stats.total_chat_messages, stats.unique_sessions
    );
    for bucket in stats.intent_stats.iter().filter(|b| b.count > 0) {
        println!("    {}: {} ({}%)", bucket.name, bucket.count, bucket.percentage);
    }
    for genre in stats.genre_popularity.iter().filter(|g| g.count > 0) {
        println!(
            "    {} {}: {} mention(s)",
            genre.genre.emoji(),
            genre.genre.name(),
            genre.count
        );
    }

    Ok(())
}
