//! Accumulating per-position validation results.

use dns_batcher_record::ChangeError;

/// The result of validating one batch position.
///
/// Unlike `Result`, this type is built for error *accumulation*: stages map
/// over a `Vec<Validated<T>>` without short-circuiting, and every stage may
/// append further errors to an already-invalid position. A batch is
/// acceptable iff every position is `Valid`.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(Vec<ChangeError>),
}

impl<T> Validated<T> {
    /// Wraps `value` unless any errors were collected against it.
    #[must_use]
    pub fn from_errors(value: T, errors: Vec<ChangeError>) -> Self {
        if errors.is_empty() {
            Self::Valid(value)
        } else {
            Self::Invalid(errors)
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The accumulated errors; empty for a valid position.
    #[must_use]
    pub fn errors(&self) -> &[ChangeError] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Transforms the carried value, leaving errors untouched.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        match self {
            Self::Valid(value) => Validated::Valid(f(value)),
            Self::Invalid(errors) => Validated::Invalid(errors),
        }
    }

    /// Feeds a valid value into the next validation stage.
    ///
    /// An invalid position passes through unchanged, so earlier errors are
    /// never discarded by later stages.
    #[must_use]
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Validated<U>) -> Validated<U> {
        match self {
            Self::Valid(value) => f(value),
            Self::Invalid(errors) => Validated::Invalid(errors),
        }
    }

    /// Appends stage errors to this position, concatenating with any
    /// already present. With no new errors the position is unchanged.
    #[must_use]
    pub fn accumulate(self, new_errors: Vec<ChangeError>) -> Self {
        if new_errors.is_empty() {
            return self;
        }
        match self {
            Self::Valid(_) => Self::Invalid(new_errors),
            Self::Invalid(mut errors) => {
                errors.extend(new_errors);
                Self::Invalid(errors)
            }
        }
    }

    /// The carried value, if valid.
    #[must_use]
    pub fn into_valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// A reference to the carried value, if valid.
    #[must_use]
    pub fn as_valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}
