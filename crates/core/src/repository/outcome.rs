use super::CacheWarning;

/// A successful repository result together with any cache warnings raised
/// while producing it.
///
/// Warnings never change `value`: the store result always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an outcome may carry cache warnings"]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<CacheWarning>,
}

impl<T> Outcome<T> {
    /// Creates an outcome with the given warnings.
    pub fn new(value: T, warnings: Vec<CacheWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if no cache warning was raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Discards the warnings and returns the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning() -> CacheWarning {
        CacheWarning::CacheWriteFailed {
            key: "entities:list".to_string(),
            reason: "down".to_string(),
        }
    }

    #[test]
    fn test_clean_outcome() {
        let outcome = Outcome::new(7, Vec::new());
        assert!(outcome.is_clean());
        assert_eq!(outcome.into_value(), 7);
    }

    #[test]
    fn test_outcome_with_warnings_keeps_value() {
        let outcome = Outcome::new("id", vec![warning()]);
        assert!(!outcome.is_clean());

        assert_eq!(outcome.warnings, vec![warning()]);
        assert_eq!(outcome.into_value(), "id");
    }
}
