use crate::pages::PageHandle;
use crate::routes::table::RouteTable;
use crate::{AppState, handlers};
use axum::{Router, response::Redirect, routing::get};
use std::collections::HashSet;

/// Portal Router Module
///
/// Turns the finished route table into mountable axum routes: the home
/// redirect at `/` plus one GET route per page descriptor.
///
/// The table itself tolerates duplicate derived paths (two identifiers can
/// collapse onto the same `/day<n>`), but axum panics when the same path is
/// mounted twice. The first descriptor in table order wins here; later
/// duplicates are skipped with a warning.
pub fn portal_routes(table: &RouteTable<PageHandle>) -> Router<AppState> {
    let mut router = Router::new();
    let mut mounted: HashSet<&str> = HashSet::new();

    // GET /
    // The home entry never renders a page itself. It issues a temporary
    // redirect to the first page of the ordered table, or to the fallback
    // target when no pages were discovered at all.
    let target = table.home().target.clone();
    router = router.route(
        "/",
        get(move || {
            let target = target.clone();
            async move { Redirect::temporary(&target) }
        }),
    );

    for page in table.pages() {
        if !mounted.insert(page.path.as_str()) {
            tracing::warn!(
                path = %page.path,
                identifier = %page.raw_identifier,
                "duplicate page path, keeping the earlier page"
            );
            continue;
        }

        // GET /day{n}
        // Each page route captures its view handle at mount time; the actual
        // rendering happens per request in `serve_page`.
        let view = page.handle.clone();
        router = router.route(
            page.path.as_str(),
            get(move || handlers::serve_page(view.clone())),
        );
        tracing::debug!(path = %page.path, name = %page.name, "mounted page route");
    }

    router
}
