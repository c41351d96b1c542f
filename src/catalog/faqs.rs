// src/catalog/faqs.rs — FAQ seed table

use super::Faq;

fn faq(id: &str, question: &str, answer: &str, category: &str, keywords: &[&str]) -> Faq {
    Faq {
        id: id.into(),
        question: question.into(),
        answer: answer.into(),
        category: category.into(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

pub fn seed_faqs() -> Vec<Faq> {
    vec![
        faq(
            "F001",
            "What are your delivery charges?",
            "Delivery is **free** for orders above ₹500. Orders below ₹500 have a flat delivery charge of ₹40.",
            "Delivery",
            &["delivery", "charges", "shipping", "fee", "free"],
        ),
        faq(
            "F002",
            "How long does delivery take?",
            "Standard delivery takes **3-5 working days** after your order is shipped. You'll receive a tracking link by email once it's on the way.",
            "Delivery",
            &["how long", "delivery", "time", "days", "take"],
        ),
        faq(
            "F003",
            "What payment methods do you accept?",
            "We accept **UPI**, credit/debit **cards**, **net banking**, popular **wallets**, and **cash on delivery**.",
            "Payments",
            &["payment", "pay", "upi", "card", "net banking", "wallet", "methods"],
        ),
        faq(
            "F004",
            "Is Cash on Delivery available?",
            "Yes! **Cash on Delivery (COD)** is available on all orders up to ₹2000.",
            "Payments",
            &["cod", "cash", "cash on delivery"],
        ),
        faq(
            "F005",
            "How do I cancel my order?",
            "You can cancel any order while it's still **Processing**. Once shipped, orders can no longer be cancelled — but you can return them after delivery.",
            "Orders",
            &["cancel", "cancellation"],
        ),
        faq(
            "F006",
            "What is your return and refund policy?",
            "Books can be returned within **7 days** of delivery if they arrive damaged or wrong. Refunds are processed to the original payment method within 5-7 working days.",
            "Returns",
            &["refund", "return", "money back", "damaged"],
        ),
        faq(
            "F007",
            "How much does shipping cost for bulk orders?",
            "Bulk orders (5+ books) always ship **free**, and we offer a 10% discount on orders above ₹2000.",
            "Delivery",
            &["bulk", "shipping", "cost", "discount"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_faqs_have_keywords() {
        for f in seed_faqs() {
            assert!(!f.keywords.is_empty(), "FAQ {} has no keywords", f.id);
            assert!(f.id.starts_with('F'));
        }
    }
}
