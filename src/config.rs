//! Configuration types for experience forms.
//!
//! The [`Config`] struct controls controller behavior:
//! - how often listing experiences is retried before giving up
//! - how long to wait between those retries
//! - how many pending forms a collection may hold
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use expforms::Config;
//!
//! // Use defaults (3 retries, 200 ms backoff, 50 forms)
//! let config = Config::default();
//!
//! // Customize
//! let config = Config {
//!     list_retries: 1,
//!     retry_backoff: Duration::from_millis(50),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::error::ValidationError;

/// Upper bound accepted for [`Config::list_retries`].
pub const MAX_LIST_RETRIES: u32 = 10;

/// Controller configuration options.
///
/// All fields have sensible defaults. Use struct update syntax to override
/// specific settings:
///
/// ```rust
/// use expforms::Config;
///
/// let config = Config {
///     max_forms: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Extra attempts made by [`ExperienceBoard::load`](crate::ExperienceBoard::load)
    /// after a failed listing.
    ///
    /// Mutations are never retried. Default: 3
    pub list_retries: u32,

    /// Delay between listing attempts. Doubles after each failure.
    ///
    /// Default: 200 ms
    pub retry_backoff: Duration,

    /// Maximum number of forms a collection holds at once.
    ///
    /// Default: 50
    pub max_forms: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list_retries: 3,
            retry_backoff: Duration::from_millis(200),
            max_forms: 50,
        }
    }
}

impl Config {
    /// Creates a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Config that lists exactly once.
    ///
    /// # Example
    /// ```rust
    /// use expforms::Config;
    ///
    /// let config = Config::without_retries();
    /// assert_eq!(config.list_retries, 0);
    /// ```
    pub fn without_retries() -> Self {
        Self {
            list_retries: 0,
            ..Default::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Called by [`FormCollection::with_config`](crate::FormCollection::with_config)
    /// and [`ExperienceBoard::load`](crate::ExperienceBoard::load).
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - `max_forms` is 0
    /// - `list_retries` exceeds [`MAX_LIST_RETRIES`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_forms == 0 {
            return Err(ValidationError::invalid_field(
                "max_forms",
                "must be greater than 0",
            ));
        }

        if self.list_retries > MAX_LIST_RETRIES {
            return Err(ValidationError::invalid_field(
                "list_retries",
                format!("must not exceed {}", MAX_LIST_RETRIES),
            ));
        }

        Ok(())
    }

    /// Returns the backoff to wait before retry number `attempt` (0-based).
    pub(crate) fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.list_retries, 3);
        assert_eq!(config.retry_backoff, Duration::from_millis(200));
        assert_eq!(config.max_forms, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_without_retries() {
        let config = Config::without_retries();
        assert_eq!(config.list_retries, 0);
        assert_eq!(config.max_forms, 50);
    }

    #[test]
    fn test_validate_zero_max_forms() {
        let config = Config {
            max_forms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_forms"));
    }

    #[test]
    fn test_validate_too_many_retries() {
        let config = Config {
            list_retries: MAX_LIST_RETRIES + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            list_retries: MAX_LIST_RETRIES,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backoff_doubles() {
        let config = Config::default();
        assert_eq!(config.backoff_for(0), Duration::from_millis(200));
        assert_eq!(config.backoff_for(1), Duration::from_millis(400));
        assert_eq!(config.backoff_for(2), Duration::from_millis(800));
    }
}
