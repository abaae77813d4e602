#![forbid(unsafe_code)]

//! Error types.
//!
//! Only catalog construction and configuration loading can fail. Tour
//! transitions absorb every runtime condition through documented fallbacks.

use thiserror::Error;

/// A catalog failed validation.
///
/// These are authoring mistakes: the engine refuses to operate on the
/// catalog instead of repairing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no pages")]
    Empty,

    #[error("page {path:?} has no steps")]
    EmptyPage { path: String },

    #[error("route path {path:?} is used by more than one page")]
    DuplicatePath { path: String },

    #[error("page id {id:?} is used by more than one page")]
    DuplicatePageId { id: String },

    #[error("step id {id:?} is used by more than one step")]
    DuplicateStepId { id: String },

    #[error("step {step:?} on page {page:?} has order {found}, expected {expected}")]
    OrderMismatch {
        page: String,
        step: String,
        expected: u32,
        found: u32,
    },

    #[error("step {step:?} claims page {found:?} but belongs to page {expected:?}")]
    PageMismatch {
        step: String,
        expected: String,
        found: String,
    },

    #[error("{what} is blank at {at}")]
    BlankField { what: &'static str, at: String },
}

/// A catalog document could not be loaded.
#[cfg(feature = "catalog-file")]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// A configuration document could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_name_the_offender() {
        let err = CatalogError::OrderMismatch {
            page: "/goals".into(),
            step: "goals-chart".into(),
            expected: 2,
            found: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("goals-chart"));
        assert!(msg.contains("expected 2"));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }
}
