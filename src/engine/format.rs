// src/engine/format.rs — Reply text helpers
//
// Bot replies carry the widget's lightweight markdown (bold, bullets,
// horizontal rules) plus emoji; the core just emits the strings.

/// Whole-rupee price, no decimal places.
pub fn price(n: u32) -> String {
    format!("₹{n}")
}

/// One-decimal rating on the 0-5 star scale.
pub fn rating(r: f32) -> String {
    format!("{r:.1}")
}

/// A star run of length ⌊rating⌋.
pub fn stars(r: f32) -> String {
    "⭐".repeat(r.floor().max(0.0) as usize)
}

/// Search-result availability label. Boundary: stock == 10 is a
/// low-stock warning here, while the admin catalog tiers call 10
/// "medium" — the two presentation contexts intentionally disagree.
pub fn availability(stock: u32) -> String {
    if stock > 10 {
        "✅ In Stock".to_string()
    } else if stock > 0 {
        format!("⚠️ Only {stock} left!")
    } else {
        "❌ Out of Stock".to_string()
    }
}

/// Binary in/out label used in catalog listings.
pub fn in_stock(stock: u32) -> &'static str {
    if stock > 0 {
        "✅ In Stock"
    } else {
        "❌ Out of Stock"
    }
}

pub fn plural(n: usize) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}
