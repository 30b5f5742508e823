//! Reservations are not stored: they are computed from books whose
//! availability flag is off.

use rand::Rng;
use time::{Date, Duration};

use super::error::CatalogueError;
use super::models::{Book, BookId, ReservationStatus, ReservationView, UserProfile, UserReservation};

pub const RESERVATION_ID_PREFIX: &str = "RES-";

/// `reserved_on` window for a member's own view.
pub const USER_WINDOW_DAYS: i64 = 5;
/// `reserved_on` window for the staff view.
pub const ADMIN_WINDOW_DAYS: i64 = 7;

/// Member shown on the staff view when no members are registered.
pub const UNASSIGNED_USER_ID: &str = "unassigned";
pub const UNASSIGNED_USER_NAME: &str = "Unassigned";

pub fn reservation_id(book_id: BookId) -> String {
    format!("{RESERVATION_ID_PREFIX}{book_id}")
}

pub fn parse_reservation_id(raw: &str) -> Result<BookId, CatalogueError> {
    raw.strip_prefix(RESERVATION_ID_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<BookId>().ok())
        .ok_or_else(|| CatalogueError::MalformedId(raw.to_string()))
}

/// Reservations as shown on a member profile. Every reserved book is listed,
/// whoever the member is.
pub fn user_reservations<R: Rng + ?Sized>(
    books: &[Book],
    today: Date,
    rng: &mut R,
) -> Vec<UserReservation> {
    books
        .iter()
        .filter(|book| !book.available)
        .map(|book| UserReservation {
            book: book.clone(),
            reserved_on: reserved_on(today, USER_WINDOW_DAYS, rng),
            status: ReservationStatus::ReadyForPickup,
        })
        .collect()
}

/// Reservations as shown on the staff dashboard, assigned to members in
/// round-robin order. Every reserved book gets a row, even with no members.
pub fn admin_reservations<R: Rng + ?Sized>(
    books: &[Book],
    users: &[UserProfile],
    today: Date,
    rng: &mut R,
) -> Vec<ReservationView> {
    books
        .iter()
        .filter(|book| !book.available)
        .enumerate()
        .map(|(index, book)| {
            let (user_id, user_name) = match users.get(index % users.len().max(1)) {
                Some(user) => (user.user_id.clone(), user.name.clone()),
                None => (UNASSIGNED_USER_ID.to_string(), UNASSIGNED_USER_NAME.to_string()),
            };
            ReservationView {
                reservation_id: reservation_id(book.id),
                book_id: book.id,
                book_title: book.title.clone(),
                user_id,
                user_name,
                reserved_on: reserved_on(today, ADMIN_WINDOW_DAYS, rng),
                status: if rng.gen_bool(0.5) {
                    ReservationStatus::ReadyForPickup
                } else {
                    ReservationStatus::Processing
                },
            }
        })
        .collect()
}

fn reserved_on<R: Rng + ?Sized>(today: Date, window_days: i64, rng: &mut R) -> Date {
    let days_ago = rng.gen_range(0..=window_days);
    today.checked_sub(Duration::days(days_ago)).unwrap_or(today)
}
