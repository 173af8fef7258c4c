//! Core domain types for the helpdesk
//!
//! Tickets, users, comments, and their identifiers. Records are serialized
//! to YAML by the file store, so the serde shapes here define the on-disk
//! format as well.

mod builders;

pub use builders::TicketBuilder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an identifier from its string form
            pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_str(s)
            }
        }
    };
}

id_type!(
    /// Opaque unique ticket identifier, issued by the store on creation
    TicketId
);
id_type!(
    /// Opaque unique user identifier, issued by the auth provider at sign-up
    UserId
);
id_type!(
    /// Identifier for a comment under a ticket
    CommentId
);

/// User role, deciding which permission path applies
///
/// Kept as a closed enum so both paths are exhaustive; a third accidental
/// role cannot silently fall into either branch. On the wire this is the
/// stored `is_technician` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Regular,
    Technician,
}

impl Role {
    #[must_use]
    pub const fn is_technician(self) -> bool {
        matches!(self, Self::Technician)
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_technician())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let is_technician = bool::deserialize(deserializer)?;
        Ok(if is_technician {
            Self::Technician
        } else {
            Self::Regular
        })
    }
}

/// A directory entry for an authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(rename = "is_technician")]
    pub role: Role,
}

impl User {
    /// Create a user with a fresh identity
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            role,
        }
    }

    /// "name surname", falling back to the email when the profile is blank
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() && self.surname.trim().is_empty() {
            self.email.clone()
        } else {
            format!("{} {}", self.name, self.surname).trim().to_string()
        }
    }
}

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Initial state, set at creation
    #[default]
    Open,
    /// Terminal state; only technicians may set it
    Resolved,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!(
                "invalid status: {other}. Must be one of: open, resolved"
            )),
        }
    }
}

/// Creation timestamp of a ticket
///
/// Stored data carries both forms: a pre-formatted display string and raw
/// epoch milliseconds. Both must be accepted and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoggedAt {
    Millis(i64),
    Text(String),
}

impl LoggedAt {
    /// Current time in the display-string form
    #[must_use]
    pub fn now() -> Self {
        Self::Text(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())
    }

    /// Human-readable rendering; numeric timestamps are converted
    #[must_use]
    pub fn to_display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Millis(millis) => DateTime::<Utc>::from_timestamp_millis(*millis)
                .map_or_else(|| "N/A".to_string(), |at| {
                    at.format("%Y-%m-%d %H:%M:%S").to_string()
                }),
        }
    }
}

impl Default for LoggedAt {
    fn default() -> Self {
        Self::now()
    }
}

/// A comment appended under a ticket, ordered by insertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: CommentId,
    pub text: String,
    /// Display string for the author, typically their email
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            text: text.into(),
            author: author.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Reasons a ticket record is rejected at write time
///
/// The store has no schema enforcement of its own, so these invariants are
/// checked in the core before every create.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTicket {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("a ticket flagged as technician-logged must name the beneficiary")]
    MissingBeneficiary,
    #[error("a ticket with a beneficiary must be flagged as technician-logged")]
    UnflaggedBeneficiary,
}

/// A reported issue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub created_at: LoggedAt,
    /// The authenticated actor who performed the create call, never the
    /// beneficiary
    pub logged_by_uid: UserId,
    /// Display string denormalized at creation time (full name or email)
    pub logged_by: String,
    /// Beneficiary, set only when a technician logs on behalf of another user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_for: Option<UserId>,
    #[serde(default)]
    pub is_logged_by_tech: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Ticket {
    /// Check the record invariants enforced at write time
    pub fn validate(&self) -> Result<(), InvalidTicket> {
        if self.title.trim().is_empty() {
            return Err(InvalidTicket::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(InvalidTicket::EmptyDescription);
        }
        match (self.is_logged_by_tech, self.logged_for.is_some()) {
            (true, false) => Err(InvalidTicket::MissingBeneficiary),
            (false, true) => Err(InvalidTicket::UnflaggedBeneficiary),
            _ => Ok(()),
        }
    }
}
