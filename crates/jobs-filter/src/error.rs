use thiserror::Error;

/// Errors raised while parsing filter input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown combinator '{0}' (expected and, or, not)")]
    UnknownCombinator(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown restricted mode '{0}' (expected include, exclude, only)")]
    UnknownRestrictedMode(String),

    #[error("malformed filter '{0}' (expected combinator:field:text)")]
    MalformedLink(String),
}
