/// Default nesting limit for validation and tree construction.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration for validating input and building a [`Reader`].
///
/// # Examples
///
/// ```rust
/// use jsonpeek::{Reader, ReaderOptions};
///
/// let options = ReaderOptions { max_depth: 2 };
/// assert!(Reader::with_options(b"[[1]]", options).is_ok());
/// assert!(Reader::with_options(b"[[[1]]]", options).is_err());
/// ```
///
/// [`Reader`]: crate::Reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Maximum number of containers that may be open at once.
    ///
    /// Input nested deeper than this fails validation and tree construction
    /// fails with [`Error::DepthExceeded`]. This bounds stack use on
    /// adversarial input.
    ///
    /// # Default
    ///
    /// `1024`
    ///
    /// [`Error::DepthExceeded`]: crate::Error::DepthExceeded
    pub max_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
