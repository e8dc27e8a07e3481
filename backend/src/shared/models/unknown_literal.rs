use thiserror::Error;

/// A string that is not one of an enum's accepted literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("must be one of the following values: {}", expected.join(", "))]
pub struct UnknownLiteral {
    pub found: String,
    pub expected: Vec<&'static str>,
}

impl UnknownLiteral {
    pub fn new(found: &str, expected: &[&'static str]) -> Self {
        Self {
            found: found.to_string(),
            expected: expected.to_vec(),
        }
    }
}
