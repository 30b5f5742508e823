use super::models::Book;

/// Case-insensitive substring match on title, author or genre. An empty
/// query keeps every book.
pub fn filter_books(books: Vec<Book>, query: &str) -> Vec<Book> {
    if query.is_empty() {
        return books;
    }
    let needle = query.to_lowercase();
    books
        .into_iter()
        .filter(|book| {
            [&book.title, &book.author, &book.genre]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::seed;

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn empty_query_keeps_everything() {
        assert_eq!(filter_books(seed::books(), "").len(), 10);
    }

    #[test]
    fn matches_author_case_insensitively() {
        let found = filter_books(seed::books(), "TOLKIEN");
        assert_eq!(titles(&found), vec!["The Hobbit", "The Lord of the Rings"]);
    }

    #[test]
    fn matches_genre_and_title_fragments() {
        assert_eq!(
            titles(&filter_books(seed::books(), "dystop")),
            vec!["1984", "Brave New World"]
        );
        assert_eq!(titles(&filter_books(seed::books(), "moby")), vec!["Moby Dick"]);
    }

    #[test]
    fn unmatched_query_yields_nothing() {
        assert!(filter_books(seed::books(), "cookbook").is_empty());
    }
}
