//! Collection pagination
//!
//! Converts a paged listing primitive into a single bounded sequence. The
//! API serves listings in offset/limit pages; [`get_collection`] fetches
//! fixed-size pages until the data is exhausted or the requested maximum
//! is satisfied, then truncates to the maximum.

use std::future::Future;

use crate::error::Result;

/// Fixed page size used for every fetch. Requests always ask for exactly
/// this many items, regardless of how close the maximum is.
pub const PAGE_SIZE: usize = 100;

/// Slicing parameters for a collection fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionSlice {
    /// Starting index into the collection.
    pub offset: u64,
    /// Upper bound on the number of items returned. `None` fetches until
    /// the server returns a short page. A value below 1 yields an empty
    /// result without issuing any request.
    pub maximum: Option<i64>,
}

impl CollectionSlice {
    pub fn new(offset: u64, maximum: Option<i64>) -> Self {
        Self { offset, maximum }
    }
}

/// Accumulate a collection by repeatedly calling `fetch_page(offset, limit)`.
///
/// Stops when a page comes back shorter than [`PAGE_SIZE`] (end of data)
/// or once at least `maximum` items have been accumulated. A `maximum`
/// larger than the available data returns all available data. Errors from
/// `fetch_page` propagate immediately; pages accumulated before a failure
/// are discarded.
pub async fn get_collection<T, F, Fut>(slice: CollectionSlice, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u64, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    if let Some(maximum) = slice.maximum {
        if maximum < 1 {
            return Ok(Vec::new());
        }
    }

    let mut results = Vec::new();
    let mut offset = slice.offset;

    loop {
        let page = fetch_page(offset, PAGE_SIZE).await?;
        let page_len = page.len();
        results.extend(page);
        offset += PAGE_SIZE as u64;

        // A page smaller than the chunk we asked for is the last of the
        // data available.
        if page_len < PAGE_SIZE {
            break;
        }

        if let Some(maximum) = slice.maximum {
            if results.len() as i64 >= maximum {
                break;
            }
        }
    }

    if let Some(maximum) = slice.maximum {
        results.truncate(maximum as usize);
    }

    Ok(results)
}
