// src/catalog/books.rs — Book seed table (B001–B025)

use super::{Book, Genre};

fn book(
    id: &str,
    title: &str,
    author: &str,
    genre: Genre,
    price: u32,
    stock: u32,
    rating: f32,
    description: &str,
) -> Book {
    Book {
        id: id.into(),
        title: title.into(),
        author: author.into(),
        genre,
        price,
        stock,
        rating,
        description: description.into(),
    }
}

pub fn seed_books() -> Vec<Book> {
    vec![
        book(
            "B001",
            "Atomic Habits",
            "James Clear",
            Genre::SelfHelp,
            499,
            25,
            4.8,
            "A proven framework for building good habits and breaking bad ones.",
        ),
        book(
            "B002",
            "The Alchemist",
            "Paulo Coelho",
            Genre::Fiction,
            299,
            18,
            4.6,
            "A philosophical novel about following your dreams and personal legend.",
        ),
        book(
            "B003",
            "Harry Potter and the Sorcerer's Stone",
            "J.K. Rowling",
            Genre::Fantasy,
            399,
            30,
            4.9,
            "The beginning of Harry's magical journey at Hogwarts.",
        ),
        book(
            "B004",
            "Harry Potter and the Chamber of Secrets",
            "J.K. Rowling",
            Genre::Fantasy,
            399,
            22,
            4.8,
            "Harry returns to Hogwarts and uncovers the mystery of the Chamber of Secrets.",
        ),
        book(
            "B005",
            "Rich Dad Poor Dad",
            "Robert Kiyosaki",
            Genre::Finance,
            350,
            15,
            4.5,
            "Personal finance lessons through the story of two fathers.",
        ),
        book(
            "B006",
            "Deep Work",
            "Cal Newport",
            Genre::Productivity,
            450,
            12,
            4.6,
            "Rules for focused success in a distracted world.",
        ),
        book(
            "B007",
            "Ikigai",
            "Hector Garcia",
            Genre::SelfHelp,
            320,
            20,
            4.5,
            "The Japanese secret to a long and happy life.",
        ),
        book(
            "B008",
            "The Psychology of Money",
            "Morgan Housel",
            Genre::Finance,
            410,
            17,
            4.7,
            "Timeless lessons on wealth, greed, and happiness.",
        ),
        book(
            "B009",
            "Sapiens",
            "Yuval Noah Harari",
            Genre::History,
            550,
            10,
            4.7,
            "A brief history of humankind from the Stone Age to the present.",
        ),
        book(
            "B010",
            "The Power of Now",
            "Eckhart Tolle",
            Genre::Spirituality,
            380,
            9,
            4.4,
            "A guide to spiritual enlightenment and living in the present moment.",
        ),
        book(
            "B011",
            "Think and Grow Rich",
            "Napoleon Hill",
            Genre::Finance,
            280,
            14,
            4.5,
            "Classic principles of personal achievement and financial success.",
        ),
        book(
            "B012",
            "The Hobbit",
            "J.R.R. Tolkien",
            Genre::Fantasy,
            420,
            16,
            4.8,
            "Bilbo Baggins' unexpected adventure with dwarves and a dragon.",
        ),
        book(
            "B013",
            "To Kill a Mockingbird",
            "Harper Lee",
            Genre::Fiction,
            300,
            11,
            4.8,
            "A powerful story of racial injustice and moral growth.",
        ),
        book(
            "B014",
            "1984",
            "George Orwell",
            Genre::Fiction,
            310,
            8,
            4.7,
            "A dystopian masterpiece about totalitarianism and surveillance.",
        ),
        book(
            "B015",
            "The Subtle Art of Not Giving a F*ck",
            "Mark Manson",
            Genre::SelfHelp,
            360,
            19,
            4.4,
            "A counterintuitive approach to living a good life.",
        ),
        book(
            "B016",
            "Zero to One",
            "Peter Thiel",
            Genre::Business,
            470,
            7,
            4.5,
            "Notes on startups, or how to build the future.",
        ),
        book(
            "B017",
            "The Lean Startup",
            "Eric Ries",
            Genre::Business,
            520,
            13,
            4.4,
            "How today's entrepreneurs use continuous innovation.",
        ),
        book(
            "B018",
            "Can't Hurt Me",
            "David Goggins",
            Genre::Biography,
            480,
            6,
            4.8,
            "Master your mind and defy the odds with mental toughness.",
        ),
        book(
            "B019",
            "The Silent Patient",
            "Alex Michaelides",
            Genre::Thriller,
            340,
            21,
            4.5,
            "A shocking psychological thriller about a woman's act of violence.",
        ),
        book(
            "B020",
            "Atomic Habits Workbook",
            "James Clear",
            Genre::SelfHelp,
            250,
            24,
            4.6,
            "Practical exercises to build better habits with the Atomic Habits system.",
        ),
        book(
            "B021",
            "Dune",
            "Frank Herbert",
            Genre::SciFi,
            600,
            10,
            4.7,
            "An epic science fiction saga set on the desert planet Arrakis.",
        ),
        book(
            "B022",
            "Project Hail Mary",
            "Andy Weir",
            Genre::SciFi,
            520,
            12,
            4.8,
            "A lone astronaut must save the earth from disaster.",
        ),
        book(
            "B023",
            "The Name of the Wind",
            "Patrick Rothfuss",
            Genre::Fantasy,
            580,
            5,
            4.7,
            "The epic tale of Kvothe, a legendary figure told in his own voice.",
        ),
        book(
            "B024",
            "The Girl with the Dragon Tattoo",
            "Stieg Larsson",
            Genre::Thriller,
            410,
            14,
            4.5,
            "A gripping mystery combining murder investigation and family secrets.",
        ),
        book(
            "B025",
            "Educated",
            "Tara Westover",
            Genre::Biography,
            390,
            9,
            4.7,
            "A memoir about growing up in a survivalist family and the transformative power of education.",
        ),
    ]
}
