//! Configuration for how decodes combine failures and split work.
//!
//! - [`Aggregation`]: whether composite decodes stop at the first failing field
//!   or collect every failure into [`DecodeError::Multiple`]
//! - [`DecodeOptions`]: settings for collection decodes, including the failure
//!   policy for elements and the optional chunked parallel decode of large arrays
//!
//! ## Examples
//!
//! ```rust
//! use decodable::{Aggregation, DecodeOptions};
//!
//! let options = DecodeOptions::new()
//!     .with_chunk_size(256)
//!     .with_parallel_threshold(4096)
//!     .with_aggregation(Aggregation::Accumulate);
//!
//! assert_eq!(options.chunk_size, 256);
//! assert!(options.should_parallelize(10_000));
//! assert!(!options.should_parallelize(100));
//! ```

use crate::DecodeError;

/// Failure policy used when several independent decodes are combined.
///
/// # Examples
///
/// ```rust
/// use decodable::{Aggregation, DecodeError};
///
/// let first = DecodeError::missing_key("id");
/// let second = DecodeError::missing_key("name");
///
/// assert_eq!(
///     Aggregation::ShortCircuit.merge(first.clone(), second.clone()),
///     first
/// );
/// assert_eq!(
///     Aggregation::Accumulate.merge(first.clone(), second.clone()),
///     DecodeError::Multiple(vec![first, second])
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Report only the first failure, left to right.
    ShortCircuit,
    /// Report every failure, in field order.
    #[default]
    Accumulate,
}

impl Aggregation {
    /// Combines an earlier failure with a later one under this policy.
    #[must_use]
    pub fn merge(self, earlier: DecodeError, later: DecodeError) -> DecodeError {
        match self {
            Aggregation::ShortCircuit => earlier,
            Aggregation::Accumulate => earlier.combine(later),
        }
    }
}

/// Default number of elements handed to each worker in a chunked decode.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Options for collection decodes.
///
/// By default a collection decode is all-or-nothing and reports the error of
/// the first failing element; [`Aggregation::Accumulate`] reports every failing
/// element instead. Decoding runs sequentially on the calling thread unless a
/// parallel threshold lets arrays at least that long be decoded in fixed-size
/// chunks on scoped worker threads. The outcome is identical either way: the
/// same values in the same order, and failures reported by original index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Policy for merging element failures.
    pub aggregation: Aggregation,
    /// Elements per chunk when decoding in parallel. Zero is treated as one.
    pub chunk_size: usize,
    /// Minimum array length that triggers a parallel decode. `None` disables it.
    pub parallel_threshold: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            aggregation: Aggregation::ShortCircuit,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: None,
        }
    }
}

impl DecodeOptions {
    /// Creates the default options: sequential, first failure wins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequential decoding that reports every failing element.
    #[must_use]
    pub fn accumulating() -> Self {
        DecodeOptions {
            aggregation: Aggregation::Accumulate,
            ..Self::default()
        }
    }

    /// Parallel decoding for any array longer than one chunk.
    #[must_use]
    pub fn parallel() -> Self {
        DecodeOptions {
            parallel_threshold: Some(DEFAULT_CHUNK_SIZE + 1),
            ..Self::default()
        }
    }

    /// Sets the policy for merging element failures.
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Sets the chunk size. A size of zero is treated as one.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Enables parallel decoding for arrays of at least `threshold` elements.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Disables parallel decoding; every array is decoded on the calling thread.
    #[must_use]
    pub fn without_parallelism(mut self) -> Self {
        self.parallel_threshold = None;
        self
    }

    /// The chunk size actually used, never zero even when the field is.
    #[inline]
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }

    /// Whether an array of `len` elements should be split across workers.
    #[must_use]
    pub fn should_parallelize(&self, len: usize) -> bool {
        match self.parallel_threshold {
            Some(threshold) => len >= threshold && len > self.effective_chunk_size(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecodeOptions::new();
        assert_eq!(options.aggregation, Aggregation::ShortCircuit);
        assert_eq!(options.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(!options.should_parallelize(usize::MAX));
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            DecodeOptions::accumulating().aggregation,
            Aggregation::Accumulate
        );
        let parallel = DecodeOptions::parallel();
        assert!(!parallel.should_parallelize(DEFAULT_CHUNK_SIZE));
        assert!(parallel.should_parallelize(DEFAULT_CHUNK_SIZE * 4));
        assert!(!parallel.without_parallelism().should_parallelize(1 << 20));
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        assert_eq!(DecodeOptions::new().with_chunk_size(0).chunk_size, 1);
    }

    #[test]
    fn test_zero_chunk_size_literal_is_treated_as_one() {
        let options = DecodeOptions {
            chunk_size: 0,
            parallel_threshold: Some(0),
            ..DecodeOptions::default()
        };
        assert_eq!(options.effective_chunk_size(), 1);
        assert!(!options.should_parallelize(1));
        assert!(options.should_parallelize(2));
    }

    #[test]
    fn test_single_chunk_stays_sequential() {
        let options = DecodeOptions::new()
            .with_chunk_size(100)
            .with_parallel_threshold(0);
        assert!(!options.should_parallelize(100));
        assert!(options.should_parallelize(101));
    }
}
