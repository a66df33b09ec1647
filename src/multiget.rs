//! Sequential multi-get.
//!
//! Endpoints such as `GET /albums?ids=` accept a bounded number of ids per
//! request. [`sequential_multiget`] splits an arbitrary input list into
//! chunks of at most `page_size` entries, fetches them one after another
//! through a pager and concatenates the results in input order. The first
//! failing chunk aborts the whole call.

use std::{collections::VecDeque, future::Future};

use log::debug;

use crate::error::{Error, Result};

/// Per-call aggregation state.
struct MultigetJob<I, T> {
    remaining: VecDeque<Vec<I>>,
    page_size: usize,
    accumulated: Vec<T>,
    first_error: Option<Error>,
}

impl<I: Clone, T> MultigetJob<I, T> {
    fn new(inputs: &[I], page_size: usize) -> Self {
        Self {
            remaining: inputs.chunks(page_size).map(<[I]>::to_vec).collect(),
            page_size,
            accumulated: Vec::with_capacity(inputs.len()),
            first_error: None,
        }
    }

    fn next_chunk(&mut self) -> Option<Vec<I>> {
        if self.first_error.is_some() {
            return None;
        }
        self.remaining.pop_front()
    }

    fn record(&mut self, result: Result<Vec<T>>) {
        match result {
            Ok(items) => self.accumulated.extend(items),
            Err(e) => {
                self.first_error = Some(e);
                self.remaining.clear();
            }
        }
    }

    fn finish(self) -> Result<Vec<T>> {
        match self.first_error {
            Some(e) => Err(e),
            None => Ok(self.accumulated),
        }
    }
}

/// Resolves `inputs` through `pager`, `page_size` entries at a time.
///
/// Chunks are fetched strictly one after another. On success the results of
/// all chunks are returned in input order; on failure the first error is
/// returned and nothing else. A `page_size` of zero is rejected before any
/// request is made.
pub async fn sequential_multiget<I, T, F, Fut>(
    inputs: &[I],
    page_size: usize,
    mut pager: F,
) -> Result<Vec<T>>
where
    I: Clone,
    F: FnMut(Vec<I>) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    if page_size == 0 {
        return Err(Error::invalid_argument("multiget page size must be positive"));
    }

    let mut job = MultigetJob::new(inputs, page_size);
    let chunks = job.remaining.len();
    let mut dispatched = 0;

    while let Some(chunk) = job.next_chunk() {
        dispatched += 1;
        debug!(
            "multiget chunk {}/{} ({} of at most {} inputs)",
            dispatched,
            chunks,
            chunk.len(),
            job.page_size
        );
        let result = pager(chunk).await;
        job.record(result);
    }

    job.finish()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn echo_pager_preserves_order() {
        let calls = Cell::new(0);
        let inputs = ["a", "b", "c", "d", "e"];

        let result = sequential_multiget(&inputs, 2, |chunk| {
            calls.set(calls.get() + 1);
            async move { Ok(chunk) }
        })
        .await
        .unwrap();

        assert_eq!(result, inputs);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn chunks_never_exceed_page_size() {
        let inputs: Vec<u32> = (0..45).collect();
        let mut sizes = Vec::new();

        let result = sequential_multiget(&inputs, 20, |chunk| {
            sizes.push(chunk.len());
            async move { Ok(chunk.into_iter().map(|n| n * 2).collect::<Vec<_>>()) }
        })
        .await
        .unwrap();

        assert_eq!(sizes, vec![20, 20, 5]);
        assert_eq!(result, inputs.iter().map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn first_failure_stops_dispatch() {
        let calls = Cell::new(0);
        let inputs: Vec<u32> = (0..10).collect();

        let err = sequential_multiget(&inputs, 3, |chunk| {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n == 2 {
                    Err(Error::http(500, "boom"))
                } else {
                    Ok(chunk)
                }
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.code(), 500);
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn empty_inputs_make_no_calls() {
        let calls = Cell::new(0);
        let inputs: Vec<String> = Vec::new();

        let result = sequential_multiget(&inputs, 5, |chunk| {
            calls.set(calls.get() + 1);
            async move { Ok(chunk) }
        })
        .await
        .unwrap();

        assert!(result.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn zero_page_size_is_rejected() {
        let err = sequential_multiget(&["a"], 0, |chunk| async move { Ok(chunk) })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
