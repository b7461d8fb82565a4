//! Discount code condition

/// The code supplied by the shopper equals the expected code, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCodeCondition {
    expected_code: String,
    provided_code: String,
}

impl DiscountCodeCondition {
    /// Create a code condition.
    pub fn new(expected_code: impl Into<String>, provided_code: impl Into<String>) -> Self {
        Self {
            expected_code: expected_code.into(),
            provided_code: provided_code.into(),
        }
    }

    /// Returns the expected code
    pub fn expected_code(&self) -> &str {
        &self.expected_code
    }

    /// Returns the provided code
    pub fn provided_code(&self) -> &str {
        &self.provided_code
    }

    pub(crate) fn is_satisfied(&self) -> bool {
        self.provided_code == self.expected_code
    }
}
