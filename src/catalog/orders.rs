// src/catalog/orders.rs — Order seed table (O1001–O1015)

use super::{Order, OrderStatus};

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    customer: &str,
    email: &str,
    book_id: &str,
    book_title: &str,
    quantity: u32,
    total: u32,
    status: OrderStatus,
    order_date: &str,
    delivery_date: Option<&str>,
) -> Order {
    Order {
        id: id.into(),
        customer: customer.into(),
        email: email.into(),
        book_id: book_id.into(),
        book_title: book_title.into(),
        quantity,
        total,
        status,
        order_date: order_date.into(),
        delivery_date: delivery_date.map(Into::into),
    }
}

pub fn seed_orders() -> Vec<Order> {
    use OrderStatus::*;
    vec![
        order(
            "O1001",
            "Rahul Sharma",
            "rahul@email.com",
            "B001",
            "Atomic Habits",
            1,
            499,
            Shipped,
            "2026-02-01",
            Some("2026-02-05"),
        ),
        order(
            "O1002",
            "Priya Patel",
            "priya@email.com",
            "B003",
            "Harry Potter and the Sorcerer's Stone",
            2,
            798,
            Delivered,
            "2026-01-28",
            Some("2026-02-02"),
        ),
        order(
            "O1003",
            "Amit Verma",
            "amit@email.com",
            "B008",
            "The Psychology of Money",
            1,
            410,
            Processing,
            "2026-02-03",
            None,
        ),
        order(
            "O1004",
            "Neha Singh",
            "neha@email.com",
            "B014",
            "1984",
            1,
            310,
            Delivered,
            "2026-01-25",
            Some("2026-01-30"),
        ),
        order(
            "O1005",
            "Karan Mehta",
            "karan@email.com",
            "B021",
            "Dune",
            1,
            600,
            Shipped,
            "2026-02-02",
            Some("2026-02-07"),
        ),
        order(
            "O1006",
            "Sneha Iyer",
            "sneha@email.com",
            "B005",
            "Rich Dad Poor Dad",
            3,
            1050,
            Processing,
            "2026-02-04",
            None,
        ),
        order(
            "O1007",
            "Arjun Rao",
            "arjun@email.com",
            "B012",
            "The Hobbit",
            1,
            420,
            Cancelled,
            "2026-01-29",
            None,
        ),
        order(
            "O1008",
            "Meera Joshi",
            "meera@email.com",
            "B019",
            "The Silent Patient",
            2,
            680,
            Delivered,
            "2026-01-30",
            Some("2026-02-03"),
        ),
        order(
            "O1009",
            "Vikas Nair",
            "vikas@email.com",
            "B017",
            "The Lean Startup",
            1,
            520,
            Shipped,
            "2026-02-01",
            Some("2026-02-06"),
        ),
        order(
            "O1010",
            "Pooja Das",
            "pooja@email.com",
            "B015",
            "The Subtle Art of Not Giving a F*ck",
            1,
            360,
            Processing,
            "2026-02-04",
            None,
        ),
        order(
            "O1011",
            "Ankit Jain",
            "ankit@email.com",
            "B002",
            "The Alchemist",
            1,
            299,
            Delivered,
            "2026-01-27",
            Some("2026-01-31"),
        ),
        order(
            "O1012",
            "Ritu Kapoor",
            "ritu@email.com",
            "B023",
            "The Name of the Wind",
            1,
            580,
            Shipped,
            "2026-02-02",
            Some("2026-02-08"),
        ),
        order(
            "O1013",
            "Manish Yadav",
            "manish@email.com",
            "B010",
            "The Power of Now",
            1,
            380,
            Delivered,
            "2026-01-26",
            Some("2026-01-30"),
        ),
        order(
            "O1014",
            "Kavya Reddy",
            "kavya@email.com",
            "B022",
            "Project Hail Mary",
            2,
            1040,
            Processing,
            "2026-02-04",
            None,
        ),
        order(
            "O1015",
            "Deepak Gupta",
            "deepak@email.com",
            "B018",
            "Can't Hurt Me",
            1,
            480,
            Shipped,
            "2026-02-03",
            Some("2026-02-09"),
        ),
    ]
}
