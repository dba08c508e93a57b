//! Error handling for the dispatch registry.

/// Specialized error type for registry and dispatch operations.
///
/// Every public operation in the crate fails with one of these kinds; the
/// caller (e.g. an HTTP layer) is responsible for mapping kinds to
/// user-facing statuses. Errors are terminal for the request that produced
/// them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// A requested address, firestation, person or medical record is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// A mutating request is missing required fields or carries a malformed value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Attempted to create a mapping that already exists
    #[error("mapping already exists: {0}")]
    AlreadyExists(String),

    /// Attempted to delete a firestation that still has attached addresses
    #[error("firestation {station_id} still covers: {}", .attached.join(", "))]
    NonEmpty {
        /// Station whose deletion was refused
        station_id: u32,
        /// Streets still attached to the station
        attached: Vec<String>,
    },

    /// Attempted to delete a mapping or station that does not exist
    #[error("nothing to delete: {0}")]
    NothingToDelete(String),

    /// A bulk read found zero entities
    #[error("no {0} found")]
    EmptyCollection(String),
}

impl DispatchError {
    /// Create a `NotFound` error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an `AlreadyExists` error
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    /// Create a `NothingToDelete` error
    pub fn nothing_to_delete(message: impl Into<String>) -> Self {
        Self::NothingToDelete(message.into())
    }

    /// Create an `EmptyCollection` error for the named entity kind
    pub fn empty_collection(what: impl Into<String>) -> Self {
        Self::EmptyCollection(what.into())
    }
}

/// Result type for dispatch registry operations
pub type Result<T> = std::result::Result<T, DispatchError>;
