//! Paginated catalog sync
//!
//! Iterates the remote catalog page by page, carrying the cursor forward
//! from each page's last snapshot. Local apply of a page is detached onto a
//! task so the next page's network fetch overlaps it; apply outcomes are
//! logged, not surfaced. Only catalog-fetch failures short-circuit.

use crate::core_conversation::RemoteConversationId;
use crate::core_sync::result::SyncResult;
use crate::core_sync::traits::{ConversationApi, ConversationStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Run a full or cursor-resumed catalog sync to completion
pub(crate) async fn run_catalog_sync(
    api: &Arc<dyn ConversationApi>,
    store: &Arc<dyn ConversationStore>,
    mut cursor: Option<RemoteConversationId>,
) -> SyncResult {
    let mut pages = 0usize;
    loop {
        let page = match api.load_catalog_page(cursor.as_ref()).await {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, pages, "catalog page fetch failed");
                return SyncResult::failure(err);
            }
        };
        pages += 1;

        let next_cursor = page.next_cursor();
        let has_more = page.has_more;
        debug!(
            page = pages,
            conversations = page.conversations.len(),
            has_more,
            "catalog page received"
        );

        if !page.conversations.is_empty() {
            let store = Arc::clone(store);
            let snapshots = page.conversations;
            tokio::spawn(async move {
                if let Err(err) = store.apply_snapshots(snapshots).await {
                    warn!(error = %err, "catalog page apply failed");
                }
            });
        }

        if !has_more {
            debug!(pages, "catalog sync complete");
            return SyncResult::success();
        }

        match next_cursor {
            Some(next) => cursor = Some(next),
            // An empty page cannot advance the cursor; stop instead of
            // refetching the same page.
            None => {
                warn!(pages, "catalog page claimed more results but was empty");
                return SyncResult::success();
            }
        }
    }
}
