use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a trailing `Day<digits>.<extension>` component in a page identifier,
/// e.g. `views/Day12.html` or `../views/Day3.vue`. The single capture group holds
/// the digit run used for route naming and ordering.
static DAY_PAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Day(\d+)\.\w+$").expect("day page pattern is valid"));

/// Redirect target used by the home entry when no pages were discovered at all.
pub const FALLBACK_TARGET: &str = "/day1";

/// PageDescriptor
///
/// One derived route entry. Everything except `handle` is computed from the raw
/// page identifier by `from_identifier`; the handle is carried through untouched.
#[derive(Debug, Clone)]
pub struct PageDescriptor<H> {
    /// The identifier exactly as the page source reported it (e.g. a relative file path).
    pub raw_identifier: String,
    /// Numeric interpretation of the digit run. `None` when the identifier did not
    /// match the day-page pattern, or when the digit run does not fit in a `u64`.
    pub index: Option<u64>,
    /// Route name, `"Day"` plus the captured digits (so `"Day"` for a non-matching identifier).
    pub name: String,
    /// Route path, `"/day"` plus the captured digits (so `"/day"` for a non-matching identifier).
    pub path: String,
    /// Opaque page handle, passed straight through to whoever mounts the route.
    pub handle: H,
}

impl<H> PageDescriptor<H> {
    /// from_identifier
    ///
    /// Derives a descriptor from a raw page identifier. The digit run is taken from
    /// the last `Day<digits>.<extension>` component; identifiers without one produce
    /// the degenerate (but still routable) `"Day"` / `"/day"` entry.
    pub fn from_identifier(raw_identifier: String, handle: H) -> Self {
        let digits = DAY_PAGE
            .captures(&raw_identifier)
            .map(|captures| captures[1].to_string())
            .unwrap_or_default();

        // The name and path keep the digits verbatim, leading zeros included.
        // Only the ordering key below interprets them numerically.
        let name = format!("Day{}", digits);
        let path = format!("/day{}", digits);

        // An empty digit run and a u64 overflow both land on None and sort last.
        let index = digits.parse::<u64>().ok();

        Self {
            raw_identifier,
            index,
            name,
            path,
            handle,
        }
    }
}

/// HomeRoute
///
/// The synthesized entry at `"/"`. It never renders anything itself; it only
/// redirects to the first page of the ordered table (or to `FALLBACK_TARGET`
/// when the table is empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeRoute {
    /// Path of the page the home entry redirects to.
    pub target: String,
}

impl HomeRoute {
    /// Route path of the home entry.
    pub const PATH: &'static str = "/";
    /// Route name of the home entry.
    pub const NAME: &'static str = "Home";
}

/// RouteTable
///
/// The complete, ordered routing plan for one process start: the home redirect
/// plus one descriptor per discovered page, sorted by numeric day index.
/// Construction is a pure function of the discovered pages and never fails;
/// malformed identifiers degrade into degenerate entries instead of errors.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    home: HomeRoute,
    pages: Vec<PageDescriptor<H>>,
}

impl<H> RouteTable<H> {
    /// build
    ///
    /// Derives a descriptor per discovered page, orders them, and synthesizes the
    /// home entry. Ordering is ascending by numeric index (`Day2` before `Day10`);
    /// entries without a numeric index sort after all numbered ones. Ties on the
    /// index fall back to the raw identifier, so equal input always produces an
    /// identical table regardless of iteration order.
    pub fn build<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = (String, H)>,
    {
        let mut entries: Vec<PageDescriptor<H>> = pages
            .into_iter()
            .map(|(raw_identifier, handle)| PageDescriptor::from_identifier(raw_identifier, handle))
            .collect();

        entries.sort_by(|a, b| match (a.index, b.index) {
            (Some(left), Some(right)) => left
                .cmp(&right)
                .then_with(|| a.raw_identifier.cmp(&b.raw_identifier)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.raw_identifier.cmp(&b.raw_identifier),
        });

        // Home points at the first entry of the ordered table. An empty table
        // still gets a well-formed home entry via the fallback target.
        let target = entries
            .first()
            .map(|page| page.path.clone())
            .unwrap_or_else(|| FALLBACK_TARGET.to_string());

        Self {
            home: HomeRoute { target },
            pages: entries,
        }
    }

    /// The synthesized home entry.
    pub fn home(&self) -> &HomeRoute {
        &self.home
    }

    /// All page descriptors in their final serving order.
    pub fn pages(&self) -> &[PageDescriptor<H>] {
        &self.pages
    }

    /// Number of page descriptors (the home entry is not counted).
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
