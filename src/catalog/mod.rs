// src/catalog/mod.rs — In-memory book/order/FAQ catalog
//
// Read-only at runtime. Seed integrity is validated once at
// construction instead of being silently trusted downstream.

mod books;
mod faqs;
mod orders;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of catalog genres, in fixed enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Fiction,
    Fantasy,
    Finance,
    Productivity,
    History,
    Spirituality,
    Business,
    Biography,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 11] = [
        Genre::SelfHelp,
        Genre::Fiction,
        Genre::Fantasy,
        Genre::Finance,
        Genre::Productivity,
        Genre::History,
        Genre::Spirituality,
        Genre::Business,
        Genre::Biography,
        Genre::Thriller,
        Genre::SciFi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Genre::SelfHelp => "Self-Help",
            Genre::Fiction => "Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Finance => "Finance",
            Genre::Productivity => "Productivity",
            Genre::History => "History",
            Genre::Spirituality => "Spirituality",
            Genre::Business => "Business",
            Genre::Biography => "Biography",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Genre::SelfHelp => "🧠",
            Genre::Fiction => "📖",
            Genre::Fantasy => "🐉",
            Genre::Finance => "💰",
            Genre::Productivity => "⚡",
            Genre::History => "🏛️",
            Genre::Spirituality => "🧘",
            Genre::Business => "💼",
            Genre::Biography => "👤",
            Genre::Thriller => "🔍",
            Genre::SciFi => "🚀",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    /// Whole-rupee price, no fractional unit.
    pub price: u32,
    pub stock: u32,
    /// 0.0–5.0 star scale.
    pub rating: f32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Delivered,
        OrderStatus::Shipped,
        OrderStatus::Processing,
        OrderStatus::Cancelled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "📦",
            OrderStatus::Shipped => "🚚",
            OrderStatus::Delivered => "✅",
            OrderStatus::Cancelled => "❌",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub email: String,
    pub book_id: String,
    pub book_title: String,
    pub quantity: u32,
    pub total: u32,
    pub status: OrderStatus,
    pub order_date: String,
    pub delivery_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    /// Matching keywords, in scan order.
    pub keywords: Vec<String>,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate id '{0}' in seed data")]
    DuplicateId(String),

    #[error("malformed id '{id}': expected {expected}")]
    MalformedId { id: String, expected: &'static str },

    #[error("order {order} references unknown book '{book}'")]
    UnknownBook { order: String, book: String },

    #[error("order {order} has non-positive {field}")]
    NonPositive { order: String, field: &'static str },

    #[error("book {book} rating {rating} outside 0-5")]
    RatingOutOfRange { book: String, rating: f32 },

    #[error("order {order} is {status} but delivery date is {actual}")]
    OrderDateMismatch {
        order: String,
        status: OrderStatus,
        actual: &'static str,
    },
}

/// Immutable snapshot of the bookstore's data, injected wherever the
/// engine or admin surfaces need to read it.
#[derive(Debug)]
pub struct Catalog {
    books: Vec<Book>,
    orders: Vec<Order>,
    faqs: Vec<Faq>,
}

impl Catalog {
    /// Build the catalog from the built-in seed tables.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_parts(books::seed_books(), orders::seed_orders(), faqs::seed_faqs())
    }

    pub fn from_parts(
        books: Vec<Book>,
        orders: Vec<Order>,
        faqs: Vec<Faq>,
    ) -> Result<Self, CatalogError> {
        validate(&books, &orders)?;
        Ok(Self {
            books,
            orders,
            faqs,
        })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn faqs(&self) -> &[Faq] {
        &self.faqs
    }

    /// Exact, case-insensitive lookup on the `O####` id shape.
    /// An absent id is a normal "not found", never an error.
    pub fn find_order(&self, id: &str) -> Option<&Order> {
        let wanted = id.to_uppercase();
        self.orders.iter().find(|o| o.id == wanted)
    }

    /// (genre, count) pairs in fixed enum order, empty genres skipped.
    pub fn genre_counts(&self) -> Vec<(Genre, usize)> {
        Genre::ALL
            .iter()
            .filter_map(|g| {
                let n = self.books.iter().filter(|b| b.genre == *g).count();
                (n > 0).then_some((*g, n))
            })
            .collect()
    }

    pub fn books_in_genre(&self, genre: Genre) -> Vec<&Book> {
        self.books.iter().filter(|b| b.genre == genre).collect()
    }
}

fn validate(books: &[Book], orders: &[Order]) -> Result<(), CatalogError> {
    let mut book_ids = std::collections::HashSet::new();
    for book in books {
        if !is_book_id(&book.id) {
            return Err(CatalogError::MalformedId {
                id: book.id.clone(),
                expected: "B###",
            });
        }
        if !book_ids.insert(book.id.as_str()) {
            return Err(CatalogError::DuplicateId(book.id.clone()));
        }
        if !(0.0..=5.0).contains(&book.rating) {
            return Err(CatalogError::RatingOutOfRange {
                book: book.id.clone(),
                rating: book.rating,
            });
        }
    }

    let mut order_ids = std::collections::HashSet::new();
    for order in orders {
        if !is_order_id(&order.id) {
            return Err(CatalogError::MalformedId {
                id: order.id.clone(),
                expected: "O####",
            });
        }
        if !order_ids.insert(order.id.as_str()) {
            return Err(CatalogError::DuplicateId(order.id.clone()));
        }
        if !book_ids.contains(order.book_id.as_str()) {
            return Err(CatalogError::UnknownBook {
                order: order.id.clone(),
                book: order.book_id.clone(),
            });
        }
        if order.quantity == 0 {
            return Err(CatalogError::NonPositive {
                order: order.id.clone(),
                field: "quantity",
            });
        }
        if order.total == 0 {
            return Err(CatalogError::NonPositive {
                order: order.id.clone(),
                field: "total",
            });
        }
        // Shipped orders carry an estimated date; Delivered must have
        // one, Processing/Cancelled must not.
        match (order.status, order.delivery_date.is_some()) {
            (OrderStatus::Delivered, false) => {
                return Err(CatalogError::OrderDateMismatch {
                    order: order.id.clone(),
                    status: order.status,
                    actual: "missing",
                });
            }
            (OrderStatus::Processing | OrderStatus::Cancelled, true) => {
                return Err(CatalogError::OrderDateMismatch {
                    order: order.id.clone(),
                    status: order.status,
                    actual: "present",
                });
            }
            _ => {}
        }
    }

    Ok(())
}

fn is_book_id(id: &str) -> bool {
    id.len() == 4
        && id.starts_with('B')
        && id[1..].chars().all(|c| c.is_ascii_digit())
}

fn is_order_id(id: &str) -> bool {
    id.len() == 5
        && id.starts_with('O')
        && id[1..].chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seed_catalog_is_valid() {
        let catalog = Catalog::new().unwrap();
        assert_eq!(catalog.books().len(), 25);
        assert_eq!(catalog.orders().len(), 15);
        assert!(!catalog.faqs().is_empty());
    }

    #[test]
    fn test_find_order_case_insensitive() {
        let catalog = Catalog::new().unwrap();
        let order = catalog.find_order("o1001").unwrap();
        assert_eq!(order.id, "O1001");
        assert_eq!(order.customer, "Rahul Sharma");
    }

    #[test]
    fn test_find_order_absent_is_none() {
        let catalog = Catalog::new().unwrap();
        assert!(catalog.find_order("O9999").is_none());
    }

    #[test]
    fn test_genre_counts_cover_all_books() {
        let catalog = Catalog::new().unwrap();
        let counts = catalog.genre_counts();
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, catalog.books().len());
        // Fixed enum order, Self-Help first
        assert_eq!(counts[0].0, Genre::SelfHelp);
    }

    #[test]
    fn test_validation_rejects_delivered_without_date() {
        let books = vec![books::seed_books().remove(0)];
        let order = Order {
            id: "O2000".into(),
            customer: "x".into(),
            email: "x@email.com".into(),
            book_id: "B001".into(),
            book_title: "Atomic Habits".into(),
            quantity: 1,
            total: 499,
            status: OrderStatus::Delivered,
            order_date: "2026-02-01".into(),
            delivery_date: None,
        };
        let err = Catalog::from_parts(books, vec![order], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::OrderDateMismatch { .. }));
    }

    #[test]
    fn test_validation_rejects_cancelled_with_date() {
        let books = vec![books::seed_books().remove(0)];
        let order = Order {
            id: "O2000".into(),
            customer: "x".into(),
            email: "x@email.com".into(),
            book_id: "B001".into(),
            book_title: "Atomic Habits".into(),
            quantity: 1,
            total: 499,
            status: OrderStatus::Cancelled,
            order_date: "2026-02-01".into(),
            delivery_date: Some("2026-02-05".into()),
        };
        let err = Catalog::from_parts(books, vec![order], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::OrderDateMismatch { .. }));
    }

    #[test]
    fn test_validation_rejects_unknown_book_ref() {
        let books = vec![books::seed_books().remove(0)];
        let order = Order {
            id: "O2000".into(),
            customer: "x".into(),
            email: "x@email.com".into(),
            book_id: "B999".into(),
            book_title: "Ghost".into(),
            quantity: 1,
            total: 100,
            status: OrderStatus::Processing,
            order_date: "2026-02-01".into(),
            delivery_date: None,
        };
        let err = Catalog::from_parts(books, vec![order], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownBook { .. }));
    }

    #[test]
    fn test_genre_serde_names() {
        assert_eq!(
            serde_json::to_string(&Genre::SelfHelp).unwrap(),
            "\"Self-Help\""
        );
        assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"Sci-Fi\"");
        let g: Genre = serde_json::from_str("\"Thriller\"").unwrap();
        assert_eq!(g, Genre::Thriller);
    }
}
