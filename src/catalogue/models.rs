use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use super::error::CatalogueError;

pub type BookId = u64;

/// A catalogue entry. `available == false` means the book is reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub available: bool,
}

/// Payload for adding a book to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), CatalogueError> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;
        require_text("genre", &self.genre)
    }
}

/// Partial update of a book; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl BookPatch {
    pub fn validate(&self) -> Result<(), CatalogueError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        Ok(())
    }

    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
        if let Some(available) = self.available {
            book.available = available;
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), CatalogueError> {
    if value.trim().is_empty() {
        return Err(CatalogueError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub member_id: String,
}

/// Lifecycle label attached to a reservation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
    #[serde(rename = "Processing")]
    Processing,
    #[serde(rename = "Checked Out")]
    CheckedOut,
    #[serde(rename = "Cancelled")]
    Cancelled,
    #[serde(rename = "Expired")]
    Expired,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        ReservationStatus::ReadyForPickup,
        ReservationStatus::Processing,
        ReservationStatus::CheckedOut,
        ReservationStatus::Cancelled,
        ReservationStatus::Expired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::ReadyForPickup => "Ready for Pickup",
            ReservationStatus::Processing => "Processing",
            ReservationStatus::CheckedOut => "Checked Out",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Expired => "Expired",
        }
    }

    /// Terminal statuses hand the book back to the shelf.
    pub fn releases_book(self) -> bool {
        matches!(
            self,
            ReservationStatus::CheckedOut | ReservationStatus::Cancelled | ReservationStatus::Expired
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReservationStatus {
    type Err = CatalogueError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CatalogueError::Validation(format!("unknown reservation status '{raw}'"))
            })
    }
}

/// A reserved book as shown on a member's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReservation {
    #[serde(flatten)]
    pub book: Book,
    pub reserved_on: Date,
    pub status: ReservationStatus,
}

/// A reservation row on the staff dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationView {
    pub reservation_id: String,
    pub book_id: BookId,
    pub book_title: String,
    pub user_id: String,
    pub user_name: String,
    pub reserved_on: Date,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book {
            id: 3,
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            genre: "Dystopian".to_string(),
            available: true,
        }
    }

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut book = sample();
        BookPatch {
            genre: Some("Classic".to_string()),
            available: Some(false),
            ..BookPatch::default()
        }
        .apply(&mut book);

        assert_eq!(book.title, "1984");
        assert_eq!(book.genre, "Classic");
        assert!(!book.available);
    }

    #[test]
    fn blank_fields_fail_validation() {
        let input = NewBook {
            title: "  ".to_string(),
            author: "Y".to_string(),
            genre: "Z".to_string(),
        };
        assert!(matches!(input.validate(), Err(CatalogueError::Validation(_))));

        let patch = BookPatch {
            author: Some(String::new()),
            ..BookPatch::default()
        };
        assert!(matches!(patch.validate(), Err(CatalogueError::Validation(_))));
        assert!(BookPatch::default().validate().is_ok());
    }

    #[test]
    fn status_parses_labels_case_insensitively() {
        assert_eq!(
            "checked out".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::CheckedOut
        );
        assert_eq!(
            "Ready for Pickup".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::ReadyForPickup
        );
        assert!("Lost".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn only_terminal_statuses_release_books() {
        let releasing: Vec<_> = ReservationStatus::ALL
            .into_iter()
            .filter(|s| s.releases_book())
            .collect();
        assert_eq!(
            releasing,
            vec![
                ReservationStatus::CheckedOut,
                ReservationStatus::Cancelled,
                ReservationStatus::Expired
            ]
        );
    }

    #[test]
    fn status_serializes_to_its_label() {
        let json = serde_json::to_string(&ReservationStatus::ReadyForPickup).unwrap();
        assert_eq!(json, "\"Ready for Pickup\"");
    }
}
