use thiserror::Error;

macro_rules! invalid_state {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidState {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidState {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Graph construction and analysis are pure, deterministic in-memory operations, so the
/// taxonomy is small: faults in the arguments a caller supplied, and internal invariant
/// breaches detected while an analysis is running. Both are reported at the point of the
/// offending call; no partial results are produced.
///
/// # Error Categories
///
/// - [`Error::InvalidArgument`] - A caller-supplied argument is out of range
/// - [`Error::InvalidState`] - An analysis observed a state that must not occur
///
/// Errors raised by user callbacks during
/// [`Graph::to_representative_forest`](crate::Graph::to_representative_forest) are not wrapped;
/// they travel back to the caller unchanged in the callback's own error type.
///
/// # Examples
///
/// ```rust
/// use cycleforest::{Error, Graph, NaturalComparer};
///
/// match Graph::<u32, _>::create(-1, NaturalComparer) {
///     Ok(_) => unreachable!(),
///     Err(Error::InvalidArgument(message)) => eprintln!("rejected: {message}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument was outside of its accepted range.
    ///
    /// Raised, for example, when a graph is created with a negative capacity.
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// An analysis reached a state that its invariants rule out.
    ///
    /// This indicates a bug rather than bad input. The error includes the source
    /// location where the breach was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the violated invariant
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Invalid state - {file}:{line}: {message}")]
    InvalidState {
        /// The message to be printed for the InvalidState error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
