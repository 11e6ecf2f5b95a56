//! Storefront error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::money::Currency;

/// Errors raised by storefront operations.
///
/// Cart mutations themselves are total; these cover id lookups, catalog
/// and promotion table construction, and the checkout guard.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Item id not present in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The same item id appears twice while building a catalog.
    #[error("Duplicate catalog item: {0}")]
    DuplicateItem(String),

    /// A promotion definition is malformed.
    #[error("Invalid promotion {code}: {reason}")]
    InvalidPromotion { code: String, reason: String },

    /// A catalog item is priced in a different currency than the cart.
    #[error("Item {item} is priced in {found}, storefront uses {expected}")]
    CurrencyMismatch {
        item: String,
        expected: Currency,
        found: Currency,
    },

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Reading a data file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl StoreError {
    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        StoreError::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
