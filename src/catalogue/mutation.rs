use std::sync::Arc;

use super::error::CatalogueError;
use super::latency::{LatencyProfile, Operation};
use super::models::{Book, BookId, BookPatch, Confirmation, NewBook, ReservationStatus};
use super::reservations::parse_reservation_id;
use super::store::CatalogueStore;

/// The only writer to the catalogue store.
///
/// Each operation waits out its simulated latency first and then applies its
/// change in a single store call, so a caller that gives up early leaves the
/// store untouched.
#[derive(Debug, Clone)]
pub struct MutationService {
    store: Arc<CatalogueStore>,
    latency: LatencyProfile,
}

impl MutationService {
    pub fn new(store: Arc<CatalogueStore>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    pub async fn reserve(&self, book_id: BookId) -> Result<Confirmation, CatalogueError> {
        tracing::debug!(book_id, "reserving book");
        self.latency.wait(Operation::Reserve).await;

        match self.store.reserve(book_id).await {
            Ok(book) => {
                tracing::info!(book_id, title = %book.title, "book reserved");
                Ok(Confirmation::new(format!(
                    "Book \"{}\" reserved successfully!",
                    book.title
                )))
            }
            Err(err) => {
                tracing::info!(book_id, error = %err, "reservation refused");
                Err(err)
            }
        }
    }

    /// Statuses that end a reservation put the book back on the shelf. Any
    /// other status is accepted without changing the catalogue.
    pub async fn update_reservation_status(
        &self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> Result<Confirmation, CatalogueError> {
        let book_id = parse_reservation_id(reservation_id)?;
        self.latency.wait(Operation::UpdateReservationStatus).await;

        if status.releases_book() {
            let was_available = self.store.set_availability(book_id, true).await?;
            if !was_available {
                tracing::info!(book_id, %status, "reservation closed, book available again");
            }
        } else {
            // Only confirms the book exists.
            self.store.find_by_id(book_id).await?;
            tracing::debug!(book_id, %status, "reservation status has no catalogue effect");
        }

        Ok(Confirmation::new(format!(
            "Reservation {reservation_id} status updated to {status}."
        )))
    }

    pub async fn add_book(&self, input: NewBook) -> Result<Book, CatalogueError> {
        input.validate()?;
        self.latency.wait(Operation::AddBook).await;

        let book = self.store.add(input).await;
        tracing::info!(book_id = book.id, title = %book.title, "book added");
        Ok(book)
    }

    pub async fn update_book(&self, book_id: BookId, patch: BookPatch) -> Result<Book, CatalogueError> {
        patch.validate()?;
        self.latency.wait(Operation::UpdateBook).await;

        let book = self.store.update(book_id, patch).await?;
        tracing::info!(book_id, available = book.available, "book updated");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service_with(latency: LatencyProfile) -> (Arc<CatalogueStore>, MutationService) {
        let store = Arc::new(CatalogueStore::seeded());
        (Arc::clone(&store), MutationService::new(store, latency))
    }

    fn service() -> (Arc<CatalogueStore>, MutationService) {
        service_with(LatencyProfile::None)
    }

    #[tokio::test]
    async fn reserve_marks_book_unavailable() {
        let (store, service) = service();
        let confirmation = service.reserve(3).await.unwrap();

        assert!(confirmation.message.contains("1984"));
        assert!(!store.find_by_id(3).await.unwrap().available);
    }

    #[tokio::test]
    async fn reserving_a_reserved_book_leaves_state_alone() {
        let (store, service) = service();
        let before = store.get().await;

        let err = service.reserve(2).await.unwrap_err();
        assert_eq!(
            err,
            CatalogueError::AlreadyReserved {
                book_id: 2,
                title: "To Kill a Mockingbird".to_string()
            }
        );
        assert_eq!(store.get().await, before);
    }

    #[tokio::test]
    async fn reserving_unknown_book_is_not_found() {
        let (_, service) = service();
        assert_eq!(
            service.reserve(999).await,
            Err(CatalogueError::book_not_found(999))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reservations_have_one_winner() {
        let (store, service) = service_with(LatencyProfile::Fixed(Duration::from_millis(20)));

        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.reserve(7).await })
            })
            .collect();

        let mut successes = 0;
        let mut refusals = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => successes += 1,
                Err(CatalogueError::AlreadyReserved { book_id: 7, .. }) => refusals += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(refusals, 7);
        assert!(!store.find_by_id(7).await.unwrap().available);
    }

    #[tokio::test]
    async fn abandoned_reservation_changes_nothing() {
        let (store, service) = service_with(LatencyProfile::Fixed(Duration::from_millis(500)));

        let outcome = tokio::time::timeout(Duration::from_millis(10), service.reserve(1)).await;
        assert!(outcome.is_err());
        assert!(store.find_by_id(1).await.unwrap().available);
    }

    #[tokio::test]
    async fn cancelling_releases_the_book() {
        let (store, service) = service();
        let confirmation = service
            .update_reservation_status("RES-5", ReservationStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(
            confirmation.message,
            "Reservation RES-5 status updated to Cancelled."
        );
        assert!(store.find_by_id(5).await.unwrap().available);
    }

    #[tokio::test]
    async fn releasing_an_available_book_is_a_no_op() {
        let (store, service) = service();
        service
            .update_reservation_status("RES-1", ReservationStatus::Expired)
            .await
            .unwrap();
        assert!(store.find_by_id(1).await.unwrap().available);
    }

    #[tokio::test]
    async fn non_terminal_status_keeps_reservation() {
        let (store, service) = service();
        service
            .update_reservation_status("RES-9", ReservationStatus::Processing)
            .await
            .unwrap();
        assert!(!store.find_by_id(9).await.unwrap().available);
    }

    #[tokio::test]
    async fn status_update_rejects_unknown_and_malformed_ids() {
        let (_, service) = service();
        assert_eq!(
            service
                .update_reservation_status("RES-999", ReservationStatus::Cancelled)
                .await,
            Err(CatalogueError::book_not_found(999))
        );
        assert_eq!(
            service
                .update_reservation_status("RES-999", ReservationStatus::ReadyForPickup)
                .await,
            Err(CatalogueError::book_not_found(999))
        );
        assert_eq!(
            service
                .update_reservation_status("RES-five", ReservationStatus::CheckedOut)
                .await,
            Err(CatalogueError::MalformedId("RES-five".to_string()))
        );
    }

    #[tokio::test]
    async fn added_books_get_next_id_and_are_available() {
        let (store, service) = service();
        let book = service
            .add_book(NewBook {
                title: "X".to_string(),
                author: "Y".to_string(),
                genre: "Z".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(book.id, 11);
        assert!(book.available);
        assert_eq!(store.find_by_id(11).await.unwrap(), book);
    }

    #[tokio::test]
    async fn add_book_requires_every_field() {
        let (store, service) = service();
        let err = service
            .add_book(NewBook {
                title: "X".to_string(),
                author: String::new(),
                genre: "Z".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogueError::Validation(_)));
        assert_eq!(store.get().await.len(), 10);
    }

    #[tokio::test]
    async fn update_book_can_release_a_reservation() {
        let (_, service) = service();
        let book = service
            .update_book(
                2,
                BookPatch {
                    available: Some(true),
                    ..BookPatch::default()
                },
            )
            .await
            .unwrap();

        assert!(book.available);
        assert_eq!(book.title, "To Kill a Mockingbird");
        // A released book can be reserved again.
        assert!(service.reserve(2).await.is_ok());
    }

    #[tokio::test]
    async fn update_unknown_book_is_not_found() {
        let (_, service) = service();
        assert_eq!(
            service.update_book(42, BookPatch::default()).await,
            Err(CatalogueError::book_not_found(42))
        );
    }
}
