//! Error type returned by store operations.
//!
//! Nothing here is fatal: the UI turns every variant into an error popup and
//! carries on with the state it already has.

/// Error codes as constants to avoid stringly-typed matching in callers.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DUPLICATE: &str = "DUPLICATE";
    pub const CATEGORY_IN_USE: &str = "CATEGORY_IN_USE";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Required field missing or malformed
    Validation(String),
    /// No record with the given id or name
    NotFound(String),
    /// Name already taken
    Duplicate(String),
    /// Category still referenced by ideas
    CategoryInUse { category: String, count: usize },
    /// Local storage write failed
    Storage(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => codes::VALIDATION_ERROR,
            StoreError::NotFound(_) => codes::NOT_FOUND,
            StoreError::Duplicate(_) => codes::DUPLICATE,
            StoreError::CategoryInUse { .. } => codes::CATEGORY_IN_USE,
            StoreError::Storage(_) => codes::STORAGE_ERROR,
        }
    }

    /// Message suitable for showing to the user as-is.
    pub fn message(&self) -> String {
        match self {
            StoreError::Validation(msg) => msg.clone(),
            StoreError::NotFound(msg) => msg.clone(),
            StoreError::Duplicate(msg) => msg.clone(),
            StoreError::CategoryInUse { count, .. } => format!(
                "Cannot delete: {} {} using this category",
                count,
                if *count == 1 { "idea is" } else { "ideas are" }
            ),
            StoreError::Storage(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        StoreError::Storage(format!("Failed to save changes: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        StoreError::Storage(format!("Failed to serialize data: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_use_message_pluralizes() {
        let one = StoreError::CategoryInUse {
            category: "Art".to_string(),
            count: 1,
        };
        assert_eq!(one.message(), "Cannot delete: 1 idea is using this category");

        let many = StoreError::CategoryInUse {
            category: "Art".to_string(),
            count: 3,
        };
        assert_eq!(many.message(), "Cannot delete: 3 ideas are using this category");
        assert_eq!(many.code(), codes::CATEGORY_IN_USE);
    }

    #[test]
    fn display_prefixes_code() {
        let err = StoreError::NotFound("Idea not found".to_string());
        assert_eq!(err.to_string(), "NOT_FOUND: Idea not found");
    }
}
