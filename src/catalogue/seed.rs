//! Fixed data the catalogue starts from.

use super::models::{Book, UserProfile};

const SEED_BOOKS: &[(u64, &str, &str, &str, bool)] = &[
    (1, "The Great Gatsby", "F. Scott Fitzgerald", "Classic", true),
    (2, "To Kill a Mockingbird", "Harper Lee", "Classic", false),
    (3, "1984", "George Orwell", "Dystopian", true),
    (4, "Pride and Prejudice", "Jane Austen", "Romance", true),
    (5, "The Hobbit", "J.R.R. Tolkien", "Fantasy", false),
    (6, "Brave New World", "Aldous Huxley", "Dystopian", true),
    (7, "The Catcher in the Rye", "J.D. Salinger", "Classic", true),
    (8, "Moby Dick", "Herman Melville", "Adventure", true),
    (9, "War and Peace", "Leo Tolstoy", "Historical Fiction", false),
    (10, "The Lord of the Rings", "J.R.R. Tolkien", "Fantasy", true),
];

const SEED_USERS: &[(&str, &str, &str, &str)] = &[
    ("user1", "Alex Reader", "alex.reader@example.com", "LIBMEMBER-001"),
    ("user2", "Sam Researcher", "sam.researcher@example.com", "LIBMEMBER-002"),
    ("user3", "Casey Student", "casey.student@example.com", "LIBMEMBER-003"),
];

pub fn books() -> Vec<Book> {
    SEED_BOOKS
        .iter()
        .map(|&(id, title, author, genre, available)| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            available,
        })
        .collect()
}

pub fn users() -> Vec<UserProfile> {
    SEED_USERS
        .iter()
        .map(|&(user_id, name, email, member_id)| UserProfile {
            user_id: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            member_id: member_id.to_string(),
        })
        .collect()
}
