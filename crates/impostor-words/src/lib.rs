//! Word categories for Impostor.
//!
//! The session engine never owns the word dataset. It asks a
//! [`WordProvider`] for the candidate words of a category and picks the
//! secret word from whatever comes back.
//!
//! - **Provider** ([`WordProvider`]): the read-only lookup seam.
//! - **Catalog** ([`Catalog`], [`Category`]): a static, in-memory provider,
//!   optionally loaded from JSON.
//! - **Errors** ([`WordsError`]): what can go wrong while building a catalog.
//!
//! # The random sentinel
//!
//! A category name equal to [`RANDOM_CATEGORY`] (or an empty / unknown
//! name) resolves to the union of every category's words, in catalog order.

mod catalog;
mod error;
mod provider;

pub use catalog::{Catalog, Category};
pub use error::WordsError;
pub use provider::{RANDOM_CATEGORY, WordProvider, is_random_category};
