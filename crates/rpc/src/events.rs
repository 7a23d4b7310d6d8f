//! Cursor-walking fetcher for the ledger event log.

use tracing::debug;

use crate::client::RpcClient;
use crate::error::RpcResult;
use crate::models::{Event, GetEventsRequest, Pagination};

/// Number of consecutive empty pages after which pagination gives up.
///
/// The event log can return empty pages with a live cursor when matching
/// events are sparse; without a cap, a contract with no matching events
/// would walk the entire remaining ledger history.
pub const MAX_EMPTY_PAGES: u32 = 5;

impl RpcClient {
    /// Walks the event-log cursor until exhaustion and returns the
    /// concatenation of all non-empty batches, in response order.
    ///
    /// The starting ledger bound in `request` is sent on the first call
    /// only; continuation calls carry the server cursor instead, unmodified.
    /// Pagination stops when the server stops returning a cursor or after
    /// [`MAX_EMPTY_PAGES`] consecutive empty batches.
    pub async fn fetch_all_events(&self, request: GetEventsRequest) -> RpcResult<Vec<Event>> {
        let GetEventsRequest {
            filters,
            start_ledger,
            pagination,
        } = request;
        let limit = pagination.limit;

        let mut collected: Vec<Event> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut empty_pages: u32 = 0;
        let mut first_call = true;

        loop {
            let page_request = GetEventsRequest {
                filters: filters.clone(),
                start_ledger: if first_call { start_ledger } else { None },
                pagination: Pagination {
                    cursor: cursor.clone(),
                    limit,
                },
            };
            first_call = false;

            let page = self.get_events(&page_request).await?;

            if page.events.is_empty() {
                empty_pages += 1;
                debug!(empty_pages, "empty event page");
                if empty_pages >= MAX_EMPTY_PAGES {
                    debug!("reached consecutive empty-page cap, stopping pagination");
                    break;
                }
            } else {
                empty_pages = 0;
                debug!(batch = page.events.len(), total = collected.len(), "event page received");
                collected.extend(page.events);
            }

            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(collected)
    }
}
