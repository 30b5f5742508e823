use tokio::sync::RwLock;

use super::error::CatalogueError;
use super::models::{Book, BookId, BookPatch, NewBook};
use super::seed;

/// Authoritative in-memory list of books.
///
/// Reads hand out owned clones. Writes are only reachable from inside the
/// catalogue module; every state transition runs under one write-lock
/// acquisition, so check-and-set sequences cannot interleave.
#[derive(Debug, Default)]
pub struct CatalogueStore {
    books: RwLock<Vec<Book>>,
}

impl CatalogueStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::books())
    }

    /// Snapshot of every book.
    pub async fn get(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn find_by_id(&self, id: BookId) -> Result<Book, CatalogueError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| CatalogueError::book_not_found(id))
    }

    /// Snapshot of the books currently reserved, in catalogue order.
    pub async fn unavailable(&self) -> Vec<Book> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| !book.available)
            .cloned()
            .collect()
    }

    /// Set the availability flag, returning its previous value.
    pub(super) async fn set_availability(
        &self,
        id: BookId,
        available: bool,
    ) -> Result<bool, CatalogueError> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, id)?;
        Ok(std::mem::replace(&mut book.available, available))
    }

    /// Available -> Reserved, failing if the book is already reserved.
    pub(super) async fn reserve(&self, id: BookId) -> Result<Book, CatalogueError> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, id)?;
        if !book.available {
            return Err(CatalogueError::AlreadyReserved {
                book_id: book.id,
                title: book.title.clone(),
            });
        }
        book.available = false;
        Ok(book.clone())
    }

    /// Append a new, available book with the next free id.
    pub(super) async fn add(&self, input: NewBook) -> Book {
        let mut books = self.books.write().await;
        let id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
        let book = Book {
            id,
            title: input.title,
            author: input.author,
            genre: input.genre,
            available: true,
        };
        books.push(book.clone());
        book
    }

    pub(super) async fn update(&self, id: BookId, patch: BookPatch) -> Result<Book, CatalogueError> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, id)?;
        patch.apply(book);
        Ok(book.clone())
    }
}

fn find_mut(books: &mut [Book], id: BookId) -> Result<&mut Book, CatalogueError> {
    books
        .iter_mut()
        .find(|book| book.id == id)
        .ok_or_else(|| CatalogueError::book_not_found(id))
}
