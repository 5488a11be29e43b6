//! Error types for control configuration.

use thiserror::Error;

/// Error raised when a control is configured with a value it cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A value was assigned that is not one of the control's item keys.
    #[error("value '{value}' is out of allowed set [{allowed}] in field '{name}'")]
    ValueOutOfSet {
        /// Control name
        name: String,
        /// Rejected value
        value: String,
        /// Comma separated allowed keys
        allowed: String,
    },
}
