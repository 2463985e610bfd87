//! Error types for the cart store and its collaborators.
//!
//! [`CartError`] is internal to the store operations: the public mutation
//! methods absorb every variant and convert it into a user notification, so
//! callers never see these errors directly.

use thiserror::Error;

use shopcart_core::ProductId;

/// Errors from the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Product or stock record does not exist.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend returned a non-success status.
    #[error("Unexpected status: {0}")]
    Status(u16),
}

/// Errors from the persistent cart store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the blob failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a cart mutation did not go through.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds available stock.
    #[error("requested quantity exceeds available stock")]
    OutOfStock,

    /// The target product has no entry in the cart.
    #[error("product not in cart")]
    NotInCart,

    /// Catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the new cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound(ProductId::new(123));
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = CatalogError::Status(502);
        assert_eq!(err.to_string(), "Unexpected status: 502");
    }

    #[test]
    fn test_cart_error_wraps_collaborator_errors() {
        let err = CartError::from(CatalogError::Status(500));
        assert!(matches!(err, CartError::Catalog(_)));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CartError::from(StorageError::Io(io));
        assert!(matches!(err, CartError::Storage(_)));
    }
}
