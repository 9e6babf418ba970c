//! Lifting collections of decodes into decodes of collections.
//!
//! [`sequence`] is all-or-nothing: it succeeds with every unwrapped value in
//! the original order, or fails with the error of the first failing element.
//! It never drops elements. Dropping failures is the job of the separate
//! [`cat_decoded`] family.
//!
//! Large arrays can optionally be decoded on scoped worker threads with
//! [`sequence_chunked`]; the result is the same as the sequential decode.

use crate::{Aggregation, DecodeOptions, Decodable, Decoded, Value};
use indexmap::IndexMap;
use std::num::NonZeroUsize;
use std::panic;
use std::thread;

/// Turns decodes into a decoded list, failing with the first error by index.
///
/// # Examples
///
/// ```rust
/// use decodable::{pure, sequence, DecodeError, Decoded};
///
/// assert_eq!(sequence(vec![pure(1), pure(2)]), pure(vec![1, 2]));
///
/// let failed = sequence(vec![pure(1), Decoded::missing_key("b"), Decoded::missing_key("c")]);
/// assert_eq!(failed.into_error(), Some(DecodeError::missing_key("b")));
/// ```
pub fn sequence<T, I>(items: I) -> Decoded<Vec<T>>
where
    I: IntoIterator<Item = Decoded<T>>,
{
    sequence_with(items, Aggregation::ShortCircuit)
}

/// Like [`sequence`], but under an explicit failure policy.
///
/// With [`Aggregation::Accumulate`] every element is evaluated and all
/// failures are reported, in index order.
pub fn sequence_with<T, I>(items: I, aggregation: Aggregation) -> Decoded<Vec<T>>
where
    I: IntoIterator<Item = Decoded<T>>,
{
    let items = items.into_iter();
    let mut values = Vec::with_capacity(items.size_hint().0);
    let mut failure: Option<crate::DecodeError> = None;

    for (index, item) in items.enumerate() {
        match item {
            Decoded::Success(value) => {
                if failure.is_none() {
                    values.push(value);
                }
            }
            Decoded::Failure(error) => {
                tracing::debug!(index, %error, "element failed to decode");
                failure = Some(match failure {
                    Some(earlier) => aggregation.merge(earlier, error),
                    None => error,
                });
                if aggregation == Aggregation::ShortCircuit {
                    break;
                }
            }
        }
    }

    match failure {
        Some(error) => Decoded::Failure(error),
        None => Decoded::Success(values),
    }
}

/// Turns keyed decodes into a decoded map, preserving keys.
///
/// # Examples
///
/// ```rust
/// use decodable::{pure, sequence_map, DecodeError, Decoded};
///
/// let ok = sequence_map(vec![("a".to_string(), pure(1)), ("b".to_string(), pure(2))]);
/// assert_eq!(ok.into_value().and_then(|m| m.get("b").copied()), Some(2));
///
/// let failed = sequence_map(vec![
///     ("a".to_string(), pure(1)),
///     ("b".to_string(), Decoded::<i32>::custom("bad")),
/// ]);
/// assert_eq!(failed.into_error(), Some(DecodeError::custom("bad")));
/// ```
pub fn sequence_map<T, I>(entries: I) -> Decoded<IndexMap<String, T>>
where
    I: IntoIterator<Item = (String, Decoded<T>)>,
{
    let entries = entries.into_iter();
    let mut values = IndexMap::with_capacity(entries.size_hint().0);

    for (key, item) in entries {
        match item {
            Decoded::Success(value) => {
                values.insert(key, value);
            }
            Decoded::Failure(error) => {
                tracing::debug!(%key, %error, "map value failed to decode");
                return Decoded::Failure(error);
            }
        }
    }

    Decoded::Success(values)
}

/// Keeps the successes and silently drops the failures.
pub fn cat_decoded<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = Decoded<T>>,
{
    items.into_iter().filter_map(Decoded::into_value).collect()
}

/// Keeps the successful entries, keyed as before, and drops the rest.
pub fn cat_decoded_map<T, I>(entries: I) -> IndexMap<String, T>
where
    I: IntoIterator<Item = (String, Decoded<T>)>,
{
    entries
        .into_iter()
        .filter_map(|(key, item)| item.into_value().map(|value| (key, value)))
        .collect()
}

/// Decodes a slice of values, splitting the work across scoped threads when
/// `options` allows it.
///
/// The input is cut into fixed-size chunks, and the chunks are handed out in
/// contiguous runs to at most one worker per available CPU. After all workers
/// have joined, their results are folded in input order, so the output order
/// and the reported error are exactly those of the sequential decode. A panic
/// inside `decode` is propagated to the caller.
///
/// # Examples
///
/// ```rust
/// use decodable::{sequence_chunked, DecodeOptions, Decodable, Value};
///
/// let values: Vec<Value> = (0..10_000).map(Value::from).collect();
/// let options = DecodeOptions::new()
///     .with_chunk_size(1_000)
///     .with_parallel_threshold(2_000);
///
/// let decoded = sequence_chunked(&values, i32::decode, &options);
/// assert_eq!(decoded.into_value().map(|v| v.len()), Some(10_000));
/// ```
pub fn sequence_chunked<T, F>(values: &[Value], decode: F, options: &DecodeOptions) -> Decoded<Vec<T>>
where
    T: Send,
    F: Fn(&Value) -> Decoded<T> + Sync,
{
    let aggregation = options.aggregation;
    if !options.should_parallelize(values.len()) {
        return sequence_with(values.iter().map(&decode), aggregation);
    }

    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let span = worker_span(values.len(), options.effective_chunk_size(), workers);
    if span >= values.len() {
        return sequence_with(values.iter().map(&decode), aggregation);
    }

    tracing::debug!(
        len = values.len(),
        chunk_size = options.effective_chunk_size(),
        workers,
        span,
        "decoding array in parallel chunks"
    );

    let decode = &decode;
    let spans: Vec<Decoded<Vec<T>>> = thread::scope(|scope| {
        let handles: Vec<_> = values
            .chunks(span)
            .map(|run| scope.spawn(move || sequence_with(run.iter().map(decode), aggregation)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    });

    sequence_with(spans, aggregation).map(|spans| spans.into_iter().flatten().collect())
}

/// Number of elements each worker decodes: a whole number of chunks, chosen
/// so that no more than `workers` runs are needed to cover `len` elements.
fn worker_span(len: usize, chunk_size: usize, workers: usize) -> usize {
    let chunk_size = chunk_size.max(1);
    let chunks = (len + chunk_size - 1) / chunk_size;
    let workers = workers.max(1);
    let chunks_per_worker = (chunks + workers - 1) / workers;
    chunks_per_worker.max(1).saturating_mul(chunk_size)
}

/// Decodes an array into a `Vec<T>` under `options`.
pub fn decode_vec_with_options<T>(value: &Value, options: &DecodeOptions) -> Decoded<Vec<T>>
where
    T: Decodable + Send,
{
    match value {
        Value::Array(items) => sequence_chunked(items, T::decode, options),
        _ => Decoded::type_mismatch("Array", value),
    }
}
