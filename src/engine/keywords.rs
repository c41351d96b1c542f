// src/engine/keywords.rs — Ordered keyword tables
//
// Every table here is an ordered slice, not a map: scan order is part
// of the product contract. The genre table is longest-match-first so
// "science fiction" and "sci-fi" win before the bare "fiction" entry
// gets a chance.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::Genre;

/// Genre keyword → genre, scanned top to bottom, first match wins.
pub const GENRE_KEYWORDS: &[(&str, Genre)] = &[
    ("self-help", Genre::SelfHelp),
    ("self help", Genre::SelfHelp),
    ("science fiction", Genre::SciFi),
    ("sci-fi", Genre::SciFi),
    ("fiction", Genre::Fiction),
    ("fantasy", Genre::Fantasy),
    ("finance", Genre::Finance),
    ("productivity", Genre::Productivity),
    ("history", Genre::History),
    ("spirituality", Genre::Spirituality),
    ("business", Genre::Business),
    ("biography", Genre::Biography),
    ("thriller", Genre::Thriller),
];

/// Known author substrings for preference extraction, scanned in order.
pub const AUTHOR_KEYWORDS: &[&str] = &[
    "james clear",
    "paulo coelho",
    "rowling",
    "kiyosaki",
    "cal newport",
    "hector garcia",
    "morgan housel",
    "harari",
    "eckhart tolle",
    "napoleon hill",
    "tolkien",
    "harper lee",
    "george orwell",
    "mark manson",
    "peter thiel",
    "eric ries",
    "david goggins",
    "alex michaelides",
    "frank herbert",
    "andy weir",
    "patrick rothfuss",
    "stieg larsson",
    "tara westover",
];

/// Filler words stripped before book-search scoring.
pub const FILLER_WORDS: &[&str] = &[
    "do", "you", "have", "is", "are", "the", "a", "an", "any", "about", "tell", "me", "show",
    "find", "get", "want", "need", "looking", "for", "book", "books", "called", "named", "titled",
    "by", "of", "and", "in", "can", "i", "please", "give", "what", "does", "it", "there", "got",
    "search", "check", "know", "available", "stock",
];

pub const TRACKING_KEYWORDS: &[&str] = &["track", "order status", "where is my order"];

pub const FOLLOW_UP_KEYWORDS: &[&str] = &["more", "another", "else", "other"];

pub const RECOMMEND_KEYWORDS: &[&str] = &[
    "recommend",
    "suggest",
    "should i read",
    "popular",
    "best book",
    "good book",
    "top book",
];

pub const GENRE_LIST_KEYWORDS: &[&str] =
    &["genre", "categories", "category", "types of books", "what kind"];

pub const STORE_INFO_KEYWORDS: &[&str] = &[
    "store",
    "timing",
    "timings",
    "hours",
    "open",
    "close",
    "when are you",
    "working hours",
    "store time",
    "shop time",
    "schedule",
];

pub const FAQ_KEYWORDS: &[&str] = &[
    "delivery",
    "shipping",
    "charges",
    "cancel",
    "refund",
    "return",
    "payment",
    "pay",
    "cod",
    "cash",
    "how long",
    "free",
    "cost",
    "fee",
    "upi",
    "card",
    "net banking",
    "wallet",
];

pub const BROWSE_KEYWORDS: &[&str] = &[
    "browse",
    "catalog",
    "all books",
    "show me",
    "list",
    "available books",
    "what books",
    "your books",
    "what do you have",
    "show books",
];

pub const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey", "hii", "hiii", "namaste"];

pub const FIRST_GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "hii",
    "hiii",
    "help",
    "namaste",
    "good morning",
    "good afternoon",
    "good evening",
];

pub const THANKS_KEYWORDS: &[&str] = &["thank", "thanks", "thx", "dhanyavaad", "shukriya"];

pub const GOODBYE_KEYWORDS: &[&str] = &["bye", "goodbye", "see you", "alvida", "good night"];

pub const PRICE_KEYWORDS: &[&str] = &["price", "cost", "how much", "kitna", "rate"];

pub const STOCK_KEYWORDS: &[&str] = &["stock", "in stock", "availability", "available"];

/// True if the message contains any keyword from the table.
pub fn contains_any(msg: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| msg.contains(k))
}

/// First genre keyword found in the message, in table order.
pub fn find_genre(msg: &str) -> Option<Genre> {
    GENRE_KEYWORDS
        .iter()
        .find(|(kw, _)| msg.contains(kw))
        .map(|(_, genre)| *genre)
}

/// First known-author substring found in the message.
pub fn find_author(msg: &str) -> Option<&'static str> {
    AUTHOR_KEYWORDS.iter().find(|a| msg.contains(*a)).copied()
}

fn order_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)o\d{4}").expect("order id pattern"))
}

/// First `O####`-shaped token in the message, uppercased.
pub fn find_order_id(msg: &str) -> Option<String> {
    order_id_re().find(msg).map(|m| m.as_str().to_uppercase())
}
