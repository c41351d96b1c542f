// src/engine/rules.rs — The priority rule chain
//
// One function per priority. Each takes the lowercased utterance and
// the session context, and returns Some(reply) to stop the chain.
// Message texts, thresholds, and result caps are stable product copy;
// change them only together with the tests that pin them.

use super::format::{availability, in_stock, plural, price, rating, stars};
use super::keywords::{self, contains_any};
use super::search::search_books;
use super::{Intent, Reply, Resolver};
use crate::catalog::{Book, Genre};
use crate::context::ConversationContext;

/// Priority 1: order tracking. Fires on an `O####` token or a tracking
/// keyword. A well-formed but unknown id gets a guided not-found
/// message rather than an error.
pub fn order_tracking(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    let has_keyword = contains_any(msg, keywords::TRACKING_KEYWORDS);
    let order_id = keywords::find_order_id(msg);

    if order_id.is_none() && !has_keyword {
        return None;
    }

    let Some(order_id) = order_id else {
        return Some(Reply::new(
            Intent::Order,
            "📋 **Order Tracking**\n\nTo track your order, please provide your order ID.\n\n\
             **Example:** \"Track order O1001\" or \"Status of O1005\"\n\n\
             Available order IDs: O1001 - O1015",
        ));
    };

    match r.catalog().find_order(&order_id) {
        Some(order) => {
            let mut text = format!("📦 **Order Status: {}**\n\n", order.id);
            text.push_str(&format!(
                "{} **Status:** {}\n",
                order.status.emoji(),
                order.status
            ));
            text.push_str(&format!("• **Customer:** {}\n", order.customer));
            text.push_str(&format!("• **Book:** {}\n", order.book_title));
            text.push_str(&format!("• **Quantity:** {}\n", order.quantity));
            text.push_str(&format!("• **Total:** {}\n", price(order.total)));
            text.push_str(&format!("• **Order Date:** {}\n", order.order_date));
            if let Some(ref date) = order.delivery_date {
                text.push_str(&format!("• **Delivery Date:** {date}\n"));
            } else if order.status == crate::catalog::OrderStatus::Processing {
                text.push_str("• **Delivery:** Estimated 3-5 working days after shipping\n");
            } else if order.status == crate::catalog::OrderStatus::Cancelled {
                text.push_str("• **Note:** This order has been cancelled\n");
            }
            text.push_str("\nNeed help with anything else?");
            Some(Reply::new(Intent::Order, text))
        }
        None => Some(Reply::new(
            Intent::Order,
            format!(
                "❓ I couldn't find order **{order_id}** in our system.\n\n\
                 Please check the order ID and try again.\n\
                 Valid order IDs: O1001 to O1015\n\n\
                 **Example:** \"Track order O1001\""
            ),
        )),
    }
}

/// Priority 2: direct book/author search. Zero matches fall through.
pub fn book_search(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    let hits = search_books(r.catalog(), msg);
    if hits.is_empty() {
        return None;
    }

    let mut text = format!("🔍 **Search Results** ({} found)\n\n", hits.len());
    for (i, hit) in hits.iter().enumerate() {
        let book = hit.book;
        text.push_str(&format!("**{}. {}**\n", i + 1, book.title));
        text.push_str(&format!("   👤 by {}\n", book.author));
        text.push_str(&format!(
            "   {} {} • {} • {}\n",
            book.genre.emoji(),
            book.genre,
            price(book.price),
            availability(book.stock)
        ));
        text.push_str(&format!(
            "   ⭐ {}/5 — {}\n\n",
            rating(book.rating),
            book.description
        ));
    }
    if hits.len() == 1 {
        text.push_str("Would you like to check availability or see similar books?");
    } else {
        text.push_str("Would you like more details about any of these books?");
    }
    Some(Reply::new(Intent::Browse, text))
}

/// Priority 3: "show me more" follow-up. Only meaningful right after a
/// recommend or browse turn; anything else falls through.
pub fn follow_up(r: &Resolver, msg: &str, ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::FOLLOW_UP_KEYWORDS) {
        return None;
    }

    if ctx.last_intent == Some(Intent::Recommend) {
        let genre = ctx.preferences.favorite_genre.unwrap_or(Genre::SelfHelp);
        let books = r.catalog().books_in_genre(genre);
        if !books.is_empty() {
            let mut text = format!("📚 **More {genre} Recommendations**\n\n");
            for (i, book) in books.iter().take(3).enumerate() {
                text.push_str(&format!("{}. **{}** by {}\n", i + 1, book.title, book.author));
                text.push_str(&format!(
                    "   {} • ⭐ {}/5\n\n",
                    price(book.price),
                    rating(book.rating)
                ));
            }
            text.push_str("Would you like to explore another genre?");
            return Some(Reply::new(Intent::Recommend, text));
        }
    }

    if ctx.last_intent == Some(Intent::Browse) {
        let catalog = r.catalog().books();
        let remaining = &catalog[6.min(catalog.len())..12.min(catalog.len())];
        let mut text = "📖 **More Books from Our Catalog**\n\n".to_string();
        for (i, book) in remaining.iter().enumerate() {
            text.push_str(&format!("{}. **{}** by {}\n", i + 1, book.title, book.author));
            text.push_str(&format!(
                "   {} {} • {} • {}\n\n",
                book.genre.emoji(),
                book.genre,
                price(book.price),
                in_stock(book.stock)
            ));
        }
        text.push_str("Want to search for a specific book or genre?");
        return Some(Reply::new(Intent::Browse, text));
    }

    None
}

/// Priority 4: recommendations. An explicit genre keyword overrides the
/// remembered favorite; with no genre at all, the top of the whole
/// catalog is offered.
pub fn recommendations(r: &Resolver, msg: &str, ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::RECOMMEND_KEYWORDS) {
        return None;
    }

    let genre = keywords::find_genre(msg).or(ctx.preferences.favorite_genre);

    let mut books: Vec<&Book> = match genre {
        Some(g) => r.catalog().books_in_genre(g),
        None => r.catalog().books().iter().collect(),
    };
    books.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    books.truncate(if genre.is_some() { 3 } else { 4 });

    let emoji = genre.map(|g| g.emoji()).unwrap_or("⭐");
    let mut text = match genre {
        Some(g) => format!("{emoji} **{g} Recommendations**\n\nTop picks in **{g}**:\n\n"),
        None => format!("{emoji} **Recommendations**\n\nHere are our highest-rated books:\n\n"),
    };
    for (i, book) in books.iter().enumerate() {
        text.push_str(&format!("**{}. {}**\n", i + 1, book.title));
        text.push_str(&format!("   👤 by {}\n", book.author));
        text.push_str(&format!(
            "   {} ({}/5) • {}\n",
            stars(book.rating),
            rating(book.rating),
            price(book.price)
        ));
        text.push_str(&format!("   📝 {}\n\n", book.description));
    }
    text.push_str(
        "💡 Want recommendations in a specific genre? Try:\n\
         \"Recommend a thriller\" or \"Suggest finance books\"",
    );
    Some(Reply::new(Intent::Recommend, text))
}

/// Priority 5: genre/category overview with per-genre counts.
pub fn genre_list(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::GENRE_LIST_KEYWORDS) {
        return None;
    }

    let counts = r.catalog().genre_counts();
    let mut text = format!(
        "📚 **Available Genres**\n\nWe have **{} books** across **{} genres**:\n\n",
        r.catalog().books().len(),
        counts.len()
    );
    for (genre, count) in &counts {
        text.push_str(&format!(
            "{} **{}**: {} book{}\n",
            genre.emoji(),
            genre,
            count,
            plural(*count)
        ));
    }
    text.push_str(
        "\nTell me which genre you'd like to explore!\n\
         **Example:** \"Show me fantasy books\" or \"Recommend a thriller\"",
    );
    Some(Reply::new(Intent::Category, text))
}

/// Priority 6: every book of a named genre, with availability labels.
pub fn genre_browse(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if msg.contains("recommend") || msg.contains("suggest") {
        return None;
    }
    let genre = keywords::find_genre(msg)?;

    let books = r.catalog().books_in_genre(genre);
    let mut text = format!(
        "{} **{} Books** ({} titles)\n\n",
        genre.emoji(),
        genre,
        books.len()
    );
    for (i, book) in books.iter().enumerate() {
        text.push_str(&format!("{}. **{}**\n", i + 1, book.title));
        text.push_str(&format!(
            "   👤 {} • {} • {}\n",
            book.author,
            price(book.price),
            availability(book.stock)
        ));
        text.push_str(&format!(
            "   ⭐ {}/5 — {}\n\n",
            rating(book.rating),
            book.description
        ));
    }
    text.push_str("Would you like details about any of these books?");
    Some(Reply::new(Intent::Category, text).with_category(genre))
}

/// Priority 7: store hours. The store is online-only, so this is a
/// fixed informational message.
pub fn store_info(_r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::STORE_INFO_KEYWORDS) {
        return None;
    }
    Some(Reply::new(
        Intent::Faq,
        "🕐 **Store Information**\n\n\
         PageTurner Books is an **online bookstore** — we're available **24/7**! 🌐\n\n\
         • **Website:** Always open for browsing and ordering\n\
         • **Chat Support:** Available round the clock\n\
         • **Order Processing:** Monday to Saturday, 9 AM - 7 PM IST\n\
         • **Delivery:** 3-5 working days\n\n\
         You can place orders anytime! Is there anything else I can help with?",
    ))
}

/// Priority 8: FAQ matching. Gated on a broad keyword list, then the
/// entry with the most keyword hits wins; zero hits fall through.
pub fn faq_match(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::FAQ_KEYWORDS) {
        return None;
    }

    let mut best = None;
    let mut max_score = 0usize;
    for faq in r.catalog().faqs() {
        let score = faq.keywords.iter().filter(|k| msg.contains(k.as_str())).count();
        if score > max_score {
            max_score = score;
            best = Some(faq);
        }
    }

    let faq = best?;
    Some(Reply::new(
        Intent::Faq,
        format!(
            "❓ **{}**\n\n{}\n\n---\nHave another question? Just ask!",
            faq.question, faq.answer
        ),
    ))
}

/// Priority 9: generic catalog browse — genre counts plus the first
/// six books as "featured".
pub fn catalog_browse(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::BROWSE_KEYWORDS) {
        return None;
    }

    let mut text = format!(
        "📚 **Welcome to Our Book Catalog!**\n\nWe have **{} books** across these genres:\n\n",
        r.catalog().books().len()
    );
    for (genre, count) in r.catalog().genre_counts() {
        text.push_str(&format!(
            "{} **{}**: {} book{}\n",
            genre.emoji(),
            genre,
            count,
            plural(count)
        ));
    }
    text.push_str("\n**Featured Books:**\n\n");
    for (i, book) in r.catalog().books().iter().take(6).enumerate() {
        text.push_str(&format!("{}. **{}** by {}\n", i + 1, book.title, book.author));
        text.push_str(&format!(
            "   {} • {} • {}\n\n",
            price(book.price),
            book.genre,
            in_stock(book.stock)
        ));
    }
    text.push_str("Ask me about a specific genre or book for more details!");
    Some(Reply::new(Intent::Browse, text))
}

/// Priority 10: personalized greeting for a returning user (more than
/// one question asked this session).
pub fn returning_greeting(_r: &Resolver, msg: &str, ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::GREETING_KEYWORDS) || ctx.questions_asked <= 1 {
        return None;
    }

    let mut text = "👋 **Welcome back!**\n\n".to_string();
    if let Some(genre) = ctx.preferences.favorite_genre {
        text.push_str(&format!(
            "I remember you're interested in **{genre}** books!\n\n"
        ));
    }
    if let Some(ref order_id) = ctx.last_order_checked {
        text.push_str(&format!(
            "Last time you checked on order **{order_id}**. Want an update?\n\n"
        ));
    }
    text.push_str("How can I help you today?\n\n");
    text.push_str("📚 Browse Books | 📦 Track Order | ⭐ Recommendations | ❓ FAQ");
    Some(Reply::new(Intent::Greeting, text))
}

/// Priority 11: first-time greeting and the generic menu.
pub fn first_greeting(_r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::FIRST_GREETING_KEYWORDS) && msg != "yo" && msg != "sup" {
        return None;
    }
    Some(Reply::new(
        Intent::Greeting,
        "👋 **Hello! Welcome to PageTurner Books!**\n\n\
         I'm your AI assistant, here to help you discover your next great read!\n\n\
         **What can I help you with today?**\n\n\
         📚 **Browse Books** — \"Show me all available books\"\n\
         🔍 **Search** — \"Do you have Atomic Habits?\"\n\
         📦 **Track Order** — \"Track order O1001\"\n\
         ⭐ **Recommendations** — \"Suggest a self-help book\"\n\
         🏷️ **Genres** — \"What genres are available?\"\n\
         ❓ **FAQ** — \"What are your delivery charges?\"\n\n\
         Just type your question!",
    ))
}

/// Priority 12.
pub fn thanks(_r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::THANKS_KEYWORDS) {
        return None;
    }
    Some(Reply::new(
        Intent::Thanks,
        "😊 **You're welcome!**\n\n\
         I'm happy I could help! Is there anything else you'd like to know?\n\n\
         Feel free to ask about books, orders, or anything else!",
    ))
}

/// Priority 13.
pub fn goodbye(_r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::GOODBYE_KEYWORDS) {
        return None;
    }
    Some(Reply::new(
        Intent::Goodbye,
        "👋 **Goodbye!**\n\n\
         Thanks for chatting with PageTurner Books!\n\n\
         📚 Happy reading, and come back soon!",
    ))
}

/// First book whose full title, or any significant title word, appears
/// in the message. Shared by the price and stock checks.
fn match_book<'a>(r: &'a Resolver, msg: &str) -> Option<&'a Book> {
    r.catalog().books().iter().find(|book| {
        let title = book.title.to_lowercase();
        msg.contains(&title)
            || title
                .split_whitespace()
                .any(|w| w.len() > 3 && msg.contains(w))
    })
}

/// Priority 14: price card for a named book.
pub fn price_check(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::PRICE_KEYWORDS) {
        return None;
    }
    let book = match_book(r, msg)?;
    let stock_line = if book.stock > 0 {
        format!("{} available", book.stock)
    } else {
        "Out of stock".to_string()
    };
    Some(Reply::new(
        Intent::Browse,
        format!(
            "💰 **Price Check: {}**\n\n\
             • **Author:** {}\n\
             • **Genre:** {}\n\
             • **Price:** {}\n\
             • **Stock:** {}\n\
             • **Rating:** ⭐ {}/5\n\n\
             Would you like to browse more books?",
            book.title,
            book.author,
            book.genre,
            price(book.price),
            stock_line,
            rating(book.rating)
        ),
    ))
}

/// Priority 15: stock-only card for a named book.
pub fn stock_check(r: &Resolver, msg: &str, _ctx: &ConversationContext) -> Option<Reply> {
    if !contains_any(msg, keywords::STOCK_KEYWORDS) {
        return None;
    }
    let book = match_book(r, msg)?;
    Some(Reply::new(
        Intent::Browse,
        format!(
            "📦 **Stock Check: {}**\n\n\
             {}\n\
             • **Available:** {} units\n\
             • **Price:** {}\n\n\
             Want to check another book?",
            book.title,
            availability(book.stock),
            book.stock,
            price(book.price)
        ),
    ))
}

/// Priority 16: the help menu. Always succeeds, never errors.
pub fn fallback() -> Reply {
    Reply::new(
        Intent::Fallback,
        "🤔 I'm not quite sure how to help with that.\n\n\
         **Here's what I can assist with:**\n\n\
         📚 **Books** — \"Do you have Atomic Habits?\"\n\
         📦 **Orders** — \"Track order O1001\"\n\
         ⭐ **Recommendations** — \"Recommend a fantasy book\"\n\
         🏷️ **Genres** — \"Show me self-help books\"\n\
         ❓ **FAQ** — \"What are your delivery charges?\"\n\
         🕐 **Store Info** — \"What are your store timings?\"\n\n\
         **Try asking:**\n\
         • \"Do you have Dune?\"\n\
         • \"Show me thriller books\"\n\
         • \"Track order O1005\"\n\
         • \"What payment methods do you accept?\"",
    )
}
