//! Cursor pagination
//!
//! Every listing endpoint follows the same shape: fetch a page with an
//! optional cursor, read the next cursor from the response, stop when there
//! is none. [`collect_all`] walks every page and concatenates the items;
//! [`page_stream`] and [`item_stream`] expose the same walk lazily so callers
//! can stop early without fetching the remaining pages.
//!
//! Pages are always requested one after another; a request for page `n + 1`
//! is only issued once page `n` has been received.

use std::future::Future;

use futures::stream::{self, Stream, TryStreamExt};
use spgate_domain::{Page, Result, SpApiError};
use tracing::debug;

/// Fetch every page and concatenate the items in the order received.
///
/// The first call receives `None`. An empty cursor is treated like an absent
/// one, so no request is ever issued for it.
///
/// # Errors
/// The first fetch error aborts the walk; items gathered so far are dropped.
pub async fn collect_all<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(cursor.take()).await?;
        pages += 1;

        let next = page.next_cursor.filter(|next| !next.is_empty());
        debug!(page = pages, items = page.items.len(), has_next = next.is_some(), "Fetched page");
        items.extend(page.items);

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(pages, total = items.len(), "Pagination complete");
    Ok(items)
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazily fetch pages as the stream is polled.
///
/// The stream ends after the page without a cursor, or right after yielding
/// the first error.
pub fn page_stream<T, F, Fut>(fetch: F) -> impl Stream<Item = Result<Page<T>>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    stream::unfold((fetch, Cursor::Start), |(mut fetch, cursor)| async move {
        let request = match cursor {
            Cursor::Start => None,
            Cursor::Next(next) => Some(next),
            Cursor::Done => return None,
        };

        match fetch(request).await {
            Ok(page) => {
                let next = match page.next_cursor.as_deref() {
                    Some(next) if !next.is_empty() => Cursor::Next(next.to_string()),
                    _ => Cursor::Done,
                };
                debug!(
                    items = page.items.len(),
                    has_next = matches!(next, Cursor::Next(_)),
                    "Fetched page"
                );
                Some((Ok(page), (fetch, next)))
            }
            Err(err) => Some((Err(err), (fetch, Cursor::Done))),
        }
    })
}

/// Lazily yield individual items across pages.
pub fn item_stream<T, F, Fut>(fetch: F) -> impl Stream<Item = Result<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    page_stream(fetch)
        .map_ok(|page| stream::iter(page.items.into_iter().map(Ok::<T, SpApiError>)))
        .try_flatten()
}

/// Drain a page stream into one vector.
///
/// # Errors
/// Returns the first error the stream yields.
pub async fn collect_stream<T, S>(pages: S) -> Result<Vec<T>>
where
    S: Stream<Item = Result<Page<T>>>,
{
    let pages: Vec<Page<T>> = pages.try_collect().await?;
    Ok(pages.into_iter().flat_map(|page| page.items).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use futures::{pin_mut, StreamExt};

    use super::*;

    /// Serves P1 -> P2 -> P3 and records the cursor of every request.
    struct ThreePages {
        seen: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl ThreePages {
        fn new() -> Self {
            Self { seen: Arc::new(Mutex::new(Vec::new())) }
        }

        fn fetcher(
            &self,
        ) -> impl FnMut(Option<String>) -> futures::future::Ready<Result<Page<u32>>> {
            let seen = Arc::clone(&self.seen);
            move |cursor| {
                seen.lock().unwrap().push(cursor.clone());
                let page = match cursor.as_deref() {
                    None => Page::new(vec![1, 2], Some("p2".into())),
                    Some("p2") => Page::new(vec![3], Some("p3".into())),
                    Some("p3") => Page::new(vec![4, 5], None),
                    Some(other) => panic!("unexpected cursor {other}"),
                };
                futures::future::ready(Ok(page))
            }
        }

        fn cursors(&self) -> Vec<Option<String>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_collect_all_concatenates_pages_in_order() {
        let source = ThreePages::new();

        let items = collect_all(source.fetcher()).await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(source.cursors(), vec![None, Some("p2".into()), Some("p3".into())]);
    }

    #[tokio::test]
    async fn test_single_page_issues_one_request() {
        let calls = AtomicUsize::new(0);
        let items = collect_all(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Page::last(vec!["only"])) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec!["only"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_cursor_stops_the_walk() {
        let calls = AtomicUsize::new(0);
        let items = collect_all(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Page { items: vec![7], next_cursor: Some(String::new()) }) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![7]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_aborts_without_partial_result() {
        let calls = AtomicUsize::new(0);
        let result: Result<Vec<u32>> = collect_all(|cursor| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match cursor {
                    None => Ok(Page::new(vec![1], Some("next".into()))),
                    Some(_) => Err(SpApiError::api(500, "boom")),
                }
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), SpApiError::api(500, "boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_page_stream_is_lazy() {
        let source = ThreePages::new();
        let pages = page_stream(source.fetcher());
        pin_mut!(pages);

        let first = pages.next().await.unwrap().unwrap();
        assert_eq!(first.items, vec![1, 2]);
        // Only the first page has been requested so far.
        assert_eq!(source.cursors().len(), 1);

        let second = pages.next().await.unwrap().unwrap();
        assert_eq!(second.items, vec![3]);
        assert_eq!(source.cursors().len(), 2);
    }

    #[tokio::test]
    async fn test_item_stream_matches_collect_all() {
        let source = ThreePages::new();

        let items: Vec<u32> = item_stream(source.fetcher()).try_collect().await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);

        let again = collect_stream(page_stream(ThreePages::new().fetcher())).await.unwrap();
        assert_eq!(again, items);
    }

    #[tokio::test]
    async fn test_page_stream_ends_after_error() {
        let pages = page_stream(|cursor: Option<String>| async move {
            match cursor {
                None => Ok(Page::new(vec![1u8], Some("next".into()))),
                Some(_) => Err(SpApiError::Network("reset".into())),
            }
        });
        let results: Vec<Result<Page<u8>>> = pages.collect().await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SpApiError::Network(_))));
    }
}
