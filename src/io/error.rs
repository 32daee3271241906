//! Error types and context management for weaving operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all weaving operations
#[derive(Debug)]
pub enum WeaveError {
    /// A size argument was zero
    InvalidDimension {
        /// Name of the offending dimension
        parameter: &'static str,
        /// Provided value
        value: usize,
    },

    /// External input failed validation
    InvalidArgument {
        /// Name of the invalid argument
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A stripe block left its legal range
    ///
    /// Transitions keep every block inside its bounds by construction, so this
    /// always points at a logic bug rather than bad input.
    InvariantViolation {
        /// Stripe width of the offending state
        stripe_width: usize,
        /// Offset of the offending state
        offset: usize,
        /// Cell width of the offending state
        block_width: usize,
        /// Which bound was broken
        reason: &'static str,
        /// Pick (row) being woven when the violation surfaced
        pick: Option<usize>,
    },

    /// Failed to encode or save an image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for WeaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { parameter, value } => {
                write!(f, "Invalid dimension '{parameter}' = {value}: must be positive")
            }
            Self::InvalidArgument {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid argument '{parameter}' = '{value}': {reason}")
            }
            Self::InvariantViolation {
                stripe_width,
                offset,
                block_width,
                reason,
                pick,
            } => {
                write!(
                    f,
                    "Stripe block invariant violated ({reason}): width {stripe_width}, offset {offset}, cell {block_width}"
                )?;
                if let Some(pick) = pick {
                    write!(f, " at pick {pick}")?;
                }
                Ok(())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for WeaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for weaving results
pub type Result<T> = std::result::Result<T, WeaveError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Pick (row) being woven
    pub pick: Option<usize>,
}

/// Enriches error messages with weaving state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the pick context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the pick index applied
    fn at_pick(self, pick: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<WeaveError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only invariant violations carry a pick position
            if let WeaveError::InvariantViolation { pick, .. } = &mut error {
                if let Some(index) = context.pick {
                    *pick = Some(index);
                }
            }
            error
        })
    }

    fn at_pick(self, pick: usize) -> Result<T> {
        self.with_context(ErrorContext { pick: Some(pick) })
    }
}

/// Create an invalid argument error
pub fn invalid_argument(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WeaveError {
    WeaveError::InvalidArgument {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Reject a zero-sized dimension
///
/// # Errors
///
/// Returns `InvalidDimension` if `value` is zero
pub const fn require_positive(parameter: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        Err(WeaveError::InvalidDimension { parameter, value })
    } else {
        Ok(value)
    }
}
