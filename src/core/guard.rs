//! Guard predicates used by junctures.
//!
//! Guards are pure boolean functions over a borrowed value. Event junctures
//! use them to decide whether a machine's latest event satisfies a rule.

/// Pure predicate over `T`.
///
/// # Example
///
/// ```rust
/// use junction::core::Guard;
///
/// let large = Guard::new(|cents: &u32| *cents >= 100);
///
/// assert!(large.check(&100));
/// assert!(!large.check(&25));
/// ```
pub struct Guard<T: ?Sized> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T: ?Sized> std::fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_allows_matching_values() {
        let guard = Guard::new(|name: &str| name.starts_with("Coin"));

        assert!(guard.check("CoinDime"));
        assert!(!guard.check("SelectedSoda"));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|n: &i32| n % 2 == 0);

        assert_eq!(guard.check(&4), guard.check(&4));
        assert_eq!(guard.check(&5), guard.check(&5));
    }

    #[test]
    fn guard_can_capture_configuration() {
        let threshold = 3;
        let guard = Guard::new(move |n: &usize| *n > threshold);

        assert!(guard.check(&4));
        assert!(!guard.check(&3));
    }
}
