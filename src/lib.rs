// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Domain Primitives
//!
//! Immutable, validated value types for domain modeling.
//!
//! # Features
//!
//! - [`DateRange`]: inclusive date interval with an optional open end,
//!   a canonical `yyyy-MM-dd|yyyy-MM-dd` text form and JSON codec
//! - Calendar algorithms: membership, overlap, intersection, day and
//!   week enumeration, duration
//! - [`EmailAddress`]: normalized address with IDN domains and
//!   case-insensitive equality
//! - [`Mailbox`]: address plus title-cased display name, with
//!   presentation helpers and [`MailAddress`] conversion
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_primitives::{DateRange, Mailbox};
//!
//! let range = DateRange::parse("2025-08-01|∞").unwrap();
//! assert!(range.is_open_ended());
//! assert!(range.contains(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
//!
//! let mailbox = Mailbox::parse("Jane Smith <Jane@Example.com>").unwrap();
//! assert_eq!(mailbox.address(), "jane@example.com");
//! assert_eq!(mailbox.username(), "jane");
//! ```

mod calendar;
mod culture;
mod date_range;
mod email_address;
mod error;
mod guard;
mod mail_address;
mod mailbox;
mod presentation;
mod syntax;

pub use calendar::{Days, Weeks};
pub use culture::Culture;
pub use date_range::{DateRange, INFINITY, MAX_DATE, MIN_DATE, SEPARATOR};
pub use email_address::{
    EmailAddress, MAX_ADDRESS_LENGTH, MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH, MAX_LOCAL_PART_LENGTH,
};
pub use error::{
    BufferTooSmall, DATE_RANGE_EMPTY, EXPECTED_JSON_STRING, Error, INVALID_DATE_RANGE_FORMAT,
    Result,
};
pub use mail_address::{HeaderEncoding, MailAddress};
pub use mailbox::Mailbox;
