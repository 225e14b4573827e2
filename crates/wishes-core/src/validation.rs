use thiserror::Error;

use crate::model::NewWish;

/// Client input defect in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or both required fields were absent or empty.
    #[error("name and wish are required (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// The body could not be read as a submission at all.
    #[error("name and wish are required (unreadable body: {0})")]
    Malformed(String),
}

/// A submission whose required fields are present and non-empty.
///
/// Only [`validate_new_wish`] can produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidWish {
    name: String,
    wish: String,
}

impl ValidWish {
    /// Submitter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text wish.
    pub fn wish(&self) -> &str {
        &self.wish
    }

    /// Consumes the submission into `(name, wish)`.
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.wish)
    }
}

/// Checks that both `name` and `wish` are present and non-empty.
///
/// Whitespace is significant: `" "` is a valid name. Uniqueness is not
/// checked here; only the store can decide that without racing.
pub fn validate_new_wish(req: NewWish) -> Result<ValidWish, ValidationError> {
    let name = req.name.filter(|s| !s.is_empty());
    let wish = req.wish.filter(|s| !s.is_empty());

    match (name, wish) {
        (Some(name), Some(wish)) => Ok(ValidWish { name, wish }),
        (name, wish) => {
            let mut missing = Vec::with_capacity(2);
            if name.is_none() {
                missing.push("name");
            }
            if wish.is_none() {
                missing.push("wish");
            }
            Err(ValidationError::MissingFields(missing))
        }
    }
}
