//! Error types for the fallible edges of the crate.
//!
//! Tokenizing never fails: every exotic, cyclic or oversized value is
//! expressed as a token. Errors only surface where the crate talks to the
//! outside world:
//!
//! - **Invalid URLs**: [`Realm::url`](crate::Realm::url) could not parse its input
//! - **I/O Errors**: writing a dump to an [`io::Write`](std::io::Write) failed
//! - **Custom**: a `Serialize` implementation reported an error through the serde bridge
//!
//! ## Examples
//!
//! ```rust
//! use dumper::{Error, Realm};
//!
//! let realm = Realm::new();
//! let result = realm.url("not a url");
//! assert!(matches!(result, Err(Error::InvalidUrl { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents every error the crate can report.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing a dump
    #[error("IO error: {0}")]
    Io(String),

    /// The input handed to [`Realm::url`](crate::Realm::url) is not an absolute URL
    #[error("Invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid URL error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dumper::Error;
    ///
    /// let err = Error::invalid_url("foo", "relative URL without a base");
    /// assert!(err.to_string().contains("relative URL"));
    /// ```
    pub fn invalid_url(input: &str, reason: &str) -> Self {
        Error::InvalidUrl {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
