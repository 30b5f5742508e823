use std::sync::Arc;

use time::{Date, OffsetDateTime};

use super::error::CatalogueError;
use super::latency::{LatencyProfile, Operation};
use super::models::{Book, ReservationView, UserProfile, UserReservation};
use super::reservations;
use super::store::CatalogueStore;

/// Read-only views over the catalogue. Every result is an owned copy.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<CatalogueStore>,
    users: Arc<[UserProfile]>,
    latency: LatencyProfile,
}

impl QueryService {
    pub fn new(store: Arc<CatalogueStore>, users: Arc<[UserProfile]>, latency: LatencyProfile) -> Self {
        Self {
            store,
            users,
            latency,
        }
    }

    /// Every book, unfiltered.
    pub async fn list_books(&self) -> Vec<Book> {
        self.latency.wait(Operation::ListBooks).await;
        let books = self.store.get().await;
        tracing::debug!(count = books.len(), "listed books");
        books
    }

    /// The single seeded member profile, echoed back under the requested id.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, CatalogueError> {
        if user_id.trim().is_empty() {
            return Err(CatalogueError::Validation("user id must not be empty".to_string()));
        }
        self.latency.wait(Operation::UserProfile).await;

        let seeded = self
            .users
            .first()
            .ok_or_else(|| CatalogueError::user_not_found(user_id))?;
        tracing::debug!(user_id, "fetched user profile");
        Ok(UserProfile {
            user_id: user_id.to_string(),
            ..seeded.clone()
        })
    }

    /// Every reserved book, regardless of `user_id`.
    pub async fn get_user_reservations(&self, user_id: &str) -> Vec<UserReservation> {
        self.latency.wait(Operation::UserReservations).await;
        let books = self.store.unavailable().await;
        let views = reservations::user_reservations(&books, today(), &mut rand::thread_rng());
        tracing::debug!(user_id, count = views.len(), "fetched user reservations");
        views
    }

    pub async fn list_users(&self) -> Vec<UserProfile> {
        self.latency.wait(Operation::ListUsers).await;
        self.users.to_vec()
    }

    pub async fn list_reservations(&self) -> Vec<ReservationView> {
        self.latency.wait(Operation::ListReservations).await;
        let books = self.store.unavailable().await;
        let views =
            reservations::admin_reservations(&books, &self.users, today(), &mut rand::thread_rng());
        tracing::debug!(count = views.len(), "listed reservations");
        views
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{models::ReservationStatus, seed};

    fn service() -> QueryService {
        QueryService::new(
            Arc::new(CatalogueStore::seeded()),
            seed::users().into(),
            LatencyProfile::None,
        )
    }

    #[tokio::test]
    async fn list_books_returns_independent_copies() {
        let service = service();
        let mut first = service.list_books().await;
        let second = service.list_books().await;
        assert_eq!(first, second);

        first[1].available = true;
        first.pop();
        assert_eq!(service.list_books().await, second);
    }

    #[tokio::test]
    async fn profile_ignores_which_member_asked() {
        let service = service();
        let profile = service.get_user_profile("user3").await.unwrap();
        assert_eq!(profile.user_id, "user3");
        assert_eq!(profile.name, "Alex Reader");
        assert_eq!(profile.member_id, "LIBMEMBER-001");
    }

    #[tokio::test]
    async fn profile_requires_an_id() {
        assert!(matches!(
            service().get_user_profile(" ").await,
            Err(CatalogueError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn profile_without_seeded_users_is_not_found() {
        let service = QueryService::new(
            Arc::new(CatalogueStore::seeded()),
            Vec::<UserProfile>::new().into(),
            LatencyProfile::None,
        );
        assert_eq!(
            service.get_user_profile("user1").await,
            Err(CatalogueError::user_not_found("user1"))
        );
    }

    #[tokio::test]
    async fn every_member_sees_every_reservation() {
        let service = service();
        let alex = service.get_user_reservations("user1").await;
        let casey = service.get_user_reservations("user3").await;

        let ids = |views: &[UserReservation]| views.iter().map(|v| v.book.id).collect::<Vec<_>>();
        assert_eq!(ids(alex.as_slice()), vec![2, 5, 9]);
        assert_eq!(ids(casey.as_slice()), ids(alex.as_slice()));
        assert!(alex
            .iter()
            .all(|v| v.status == ReservationStatus::ReadyForPickup));
    }

    #[tokio::test]
    async fn staff_view_covers_users_and_reservations() {
        let service = service();
        assert_eq!(service.list_users().await.len(), 3);

        let views = service.list_reservations().await;
        let ids: Vec<_> = views.iter().map(|v| v.reservation_id.as_str()).collect();
        assert_eq!(ids, vec!["RES-2", "RES-5", "RES-9"]);
    }
}
