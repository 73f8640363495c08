use thiserror::Error;

/// Errors raised at the codec boundary.
///
/// Blank/absent input is never one of these — it is a first-class
/// `None` result at every entry point. Zone-resolution ambiguity is not
/// one either: a fragment whose `zone` and `offset` both fail to resolve
/// decodes in UTC.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StampError {
    /// The input could not be coerced to an absolute instant.
    #[error("cannot coerce `{0}` to a point in time")]
    ConversionFailed(String),
    /// A fragment-shaped stored value has no `time` field.
    #[error("stored fragment is missing its `time` field")]
    MissingTime,
    /// The `time` field is present but not a datetime, or its value is
    /// outside the representable range.
    #[error("stored `time` field is not a valid datetime")]
    MalformedTime,
    /// The stored value is neither null, a datetime, nor a fragment
    /// document.
    #[error("stored value is not time-like")]
    NotTimeLike,
}
