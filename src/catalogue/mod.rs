//! In-memory library catalogue: book store, read views and the reservation
//! state machine.
//!
//! A book is either available or reserved. `MutationService::reserve` moves
//! it to reserved; a terminal reservation status or a `BookPatch` with
//! `available: Some(true)` moves it back. Reservations have no storage of
//! their own and are derived from the availability flag on every read.

pub mod error;
pub mod latency;
pub mod models;
pub mod mutation;
pub mod query;
pub mod reservations;
pub mod search;
pub mod seed;
pub mod store;

use std::sync::Arc;

pub use error::CatalogueError;
pub use latency::LatencyProfile;
pub use models::{
    Book, BookId, BookPatch, Confirmation, NewBook, ReservationStatus, ReservationView,
    UserProfile, UserReservation,
};
pub use mutation::MutationService;
pub use query::QueryService;
pub use store::CatalogueStore;

/// Handle shared by the HTTP modules and the CLI.
#[derive(Debug, Clone)]
pub struct Library {
    pub query: QueryService,
    pub mutation: MutationService,
}

impl Library {
    pub fn new(store: CatalogueStore, users: Vec<UserProfile>, latency: LatencyProfile) -> Self {
        let store = Arc::new(store);
        Self {
            query: QueryService::new(Arc::clone(&store), users.into(), latency),
            mutation: MutationService::new(store, latency),
        }
    }

    /// Catalogue and member directory populated with the seed data.
    pub fn seeded(latency: LatencyProfile) -> Self {
        Self::new(CatalogueStore::seeded(), seed::users(), latency)
    }
}
