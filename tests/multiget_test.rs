use std::cell::Cell;

use spotmeta::{
    Error, sequential_multiget,
    error::{ErrorKind, Result},
};

async fn echo(inputs: &[u32], page_size: usize, calls: &Cell<usize>) -> Result<Vec<u32>> {
    sequential_multiget(inputs, page_size, |chunk| {
        calls.set(calls.get() + 1);
        async move { Ok(chunk) }
    })
    .await
}

#[tokio::test]
async fn pager_runs_once_per_chunk_and_keeps_order() {
    for n in [1usize, 2, 19, 20, 21, 45, 100] {
        for page_size in [1usize, 2, 7, 20, 50] {
            let inputs: Vec<u32> = (0..n as u32).collect();
            let calls = Cell::new(0);

            let out = echo(&inputs, page_size, &calls).await.unwrap();

            assert_eq!(out, inputs, "n={} page_size={}", n, page_size);
            assert_eq!(calls.get(), n.div_ceil(page_size), "n={} page_size={}", n, page_size);
        }
    }
}

#[tokio::test]
async fn first_failure_stops_dispatch() {
    let inputs: Vec<u32> = (0..10).collect();

    for failing in 0..5usize {
        let calls = Cell::new(0);
        let result: Result<Vec<u32>> = sequential_multiget(&inputs, 2, |chunk| {
            let index = calls.get();
            calls.set(index + 1);
            async move {
                if index == failing {
                    Err(Error::http(500, format!("chunk {}", index)))
                } else {
                    Ok(chunk)
                }
            }
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.message(), format!("chunk {}", failing));
        assert_eq!(calls.get(), failing + 1);
    }
}

#[tokio::test]
async fn chunk_results_may_differ_in_length() {
    let inputs = vec!["a", "b", "c", "d", "e"];
    let out = sequential_multiget(&inputs, 2, |chunk| async move {
        Ok(chunk.iter().map(|s| s.len()).collect::<Vec<_>>())
    })
    .await
    .unwrap();
    assert_eq!(out, vec![1, 1, 1, 1, 1]);

    let out: Vec<&str> = sequential_multiget(&inputs, 2, |chunk| async move {
        Ok(chunk.into_iter().take(1).collect())
    })
    .await
    .unwrap();
    assert_eq!(out, vec!["a", "c", "e"]);
}

#[tokio::test]
async fn empty_input_and_zero_page_size() {
    let calls = Cell::new(0);
    let out = echo(&[], 20, &calls).await.unwrap();
    assert!(out.is_empty());
    assert_eq!(calls.get(), 0);

    let err = echo(&[1, 2, 3], 0, &calls).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(calls.get(), 0);
}
