// src/engine/search.rs — Weighted book search
//
// Scoring: +3 per search word found in the title, +2 per word found in
// the author, +5 if the whole filtered phrase is a title substring,
// +4 if at least two significant title words (or the only one) appear
// in the message.

use crate::catalog::{Book, Catalog};
use crate::engine::keywords::FILLER_WORDS;

const MAX_RESULTS: usize = 5;

pub struct SearchHit<'a> {
    pub book: &'a Book,
    pub score: u32,
}

/// Strip filler words and short tokens, leaving the search words.
fn search_words(msg: &str) -> Vec<&str> {
    msg.split_whitespace()
        .filter(|w| w.len() > 2 && !FILLER_WORDS.contains(w))
        .collect()
}

/// Score every catalog book against the message, keep positive scores,
/// best first, capped at five. Returns empty for filler-only messages
/// so the resolver falls through to later rules.
pub fn search_books<'a>(catalog: &'a Catalog, msg: &str) -> Vec<SearchHit<'a>> {
    let words = search_words(msg);
    if words.is_empty() {
        return Vec::new();
    }
    let phrase = words.join(" ");

    let mut hits: Vec<SearchHit<'a>> = Vec::new();
    for book in catalog.books() {
        let title = book.title.to_lowercase();
        let author = book.author.to_lowercase();
        let mut score = 0u32;

        for word in &words {
            if title.contains(word) {
                score += 3;
            }
            if author.contains(word) {
                score += 2;
            }
        }

        if title.contains(&phrase) {
            score += 5;
        }

        let title_words: Vec<&str> = title.split_whitespace().filter(|w| w.len() > 3).collect();
        let matched = title_words.iter().filter(|tw| msg.contains(*tw)).count();
        if matched >= 2 || (title_words.len() == 1 && matched == 1) {
            score += 4;
        }

        if score > 0 {
            hits.push(SearchHit { book, score });
        }
    }

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(MAX_RESULTS);
    hits
}
