//! Sequential walk over the paged stop directory.
//!
//! Pages are requested one after the other, starting at page 0, until the
//! upstream pagination block says every result has been seen. Any failing
//! page fails the whole walk and the stops gathered so far are dropped.
//!
//! The walk trusts `total_result`; there is no separate cap on the number of
//! pages.

use tracing::debug;

use crate::domain::Stop;

use super::convert::StopsPage;
use super::error::NavitiaError;
use super::types::Pagination;

/// Progress through the directory.
#[derive(Debug, Default)]
struct PaginationState {
    /// Index of the next page to request.
    page_index: u64,
    /// Results covered by the pages fetched so far, per upstream accounting.
    items_seen: u64,
    /// Total declared by the most recent page.
    total_expected: u64,
    accumulator: Vec<Stop>,
}

impl PaginationState {
    /// Fold a page in. Returns whether another page should be fetched.
    fn absorb(&mut self, page: StopsPage) -> bool {
        self.items_seen = items_covered(&page.pagination);
        self.total_expected = page.pagination.total_result;
        self.accumulator.extend(page.stops);
        self.items_seen < self.total_expected
    }
}

/// Results covered once the page described by `pagination` has been read.
fn items_covered(pagination: &Pagination) -> u64 {
    pagination
        .items_per_page
        .saturating_mul(pagination.start_page)
        .saturating_add(pagination.items_on_page)
}

/// Fetch every page with `fetch_page` and concatenate their stops.
///
/// `fetch_page` receives the page index. Pages are awaited strictly in order.
pub async fn collect_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<Stop>, NavitiaError>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<StopsPage, NavitiaError>>,
{
    let mut state = PaginationState::default();

    loop {
        let page = fetch_page(state.page_index).await?;
        let more = state.absorb(page);

        debug!(
            page = state.page_index,
            items_seen = state.items_seen,
            total = state.total_expected,
            stops = state.accumulator.len(),
            "fetched stop directory page"
        );

        if !more {
            return Ok(state.accumulator);
        }
        state.page_index += 1;
    }
}
