use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

// 1. PageView Contract
/// PageView
///
/// Defines the abstract contract for rendering a single day page. The route
/// table only carries these as opaque handles; rendering happens per request,
/// so a page backed by a file on disk reflects edits without a restart.
#[async_trait]
pub trait PageView: Send + Sync {
    /// Produces the full HTML body for the page.
    async fn render(&self) -> io::Result<String>;
}

/// PageHandle
///
/// The concrete handle type carried through the route table and captured by
/// the mounted page handlers.
pub type PageHandle = Arc<dyn PageView>;

// 2. Concrete Views
/// InlineView
///
/// A page whose HTML lives in memory. Used for the built-in starter pages and
/// heavily in tests, where a page body needs no backing file.
#[derive(Clone)]
pub struct InlineView {
    html: String,
}

impl InlineView {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

#[async_trait]
impl PageView for InlineView {
    async fn render(&self) -> io::Result<String> {
        Ok(self.html.clone())
    }
}

/// FileView
///
/// A page backed by a file on disk. The file is read lazily on every render,
/// not at discovery time, so a file deleted after startup surfaces as a render
/// error rather than a startup failure.
#[derive(Clone)]
pub struct FileView {
    path: PathBuf,
}

impl FileView {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageView for FileView {
    async fn render(&self) -> io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

// 3. PageSource Contract
/// PageSource
///
/// Defines the abstract contract for page discovery. A source reports each
/// page as a raw identifier plus its view handle; the route table derives
/// names, paths, and ordering from the identifiers alone.
///
/// Discovery runs exactly once, synchronously, during startup. The returned
/// snapshot is what the route table is built from; sources are never polled
/// again while the process runs.
pub trait PageSource {
    fn pages(&self) -> io::Result<Vec<(String, PageHandle)>>;
}

// 4. The Static Registry
const DAY1_HTML: &str = "<!doctype html>\n<html>\n  <head><title>Day 1</title></head>\n  <body>\n    <h1>Day 1</h1>\n    <p>First entry of the daybook.</p>\n  </body>\n</html>\n";

const DAY2_HTML: &str = "<!doctype html>\n<html>\n  <head><title>Day 2</title></head>\n  <body>\n    <h1>Day 2</h1>\n    <p>Second entry of the daybook.</p>\n  </body>\n</html>\n";

/// StaticPages
///
/// A page source whose entries are registered in code. This is the default
/// source when no pages directory is configured, and the workhorse of the
/// integration tests, where exact page sets need to be pinned down.
#[derive(Clone)]
pub struct StaticPages {
    entries: Vec<(String, PageHandle)>,
}

impl StaticPages {
    /// An empty registry. Pages are added with `register`.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// with_defaults
    ///
    /// The built-in starter set: two inline day pages, enough for the portal
    /// to serve something meaningful out of the box.
    pub fn with_defaults() -> Self {
        let mut source = Self::new();
        source.register("views/Day1.html", Arc::new(InlineView::new(DAY1_HTML)));
        source.register("views/Day2.html", Arc::new(InlineView::new(DAY2_HTML)));
        source
    }

    /// register
    ///
    /// Adds one page under a raw identifier. Registration order is irrelevant;
    /// the route table imposes the serving order later.
    pub fn register(&mut self, identifier: impl Into<String>, view: PageHandle) {
        self.entries.push((identifier.into(), view));
    }
}

impl Default for StaticPages {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for StaticPages {
    fn pages(&self) -> io::Result<Vec<(String, PageHandle)>> {
        Ok(self.entries.clone())
    }
}

// 5. The Filesystem Source
/// DirectoryPages
///
/// A page source that scans one directory, shallowly, at startup. Every plain
/// file found becomes a page whose identifier is its path, so `Day<n>.<ext>`
/// filenames produce the numbered day routes. Subdirectories are not descended
/// into.
#[derive(Clone)]
pub struct DirectoryPages {
    dir: PathBuf,
}

impl DirectoryPages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PageSource for DirectoryPages {
    /// pages
    ///
    /// Lists the configured directory. A missing or unreadable directory is a
    /// hard error (the caller decides whether that is fatal); an individual
    /// entry that cannot be inspected is skipped with a warning so one bad
    /// file cannot take the whole portal down.
    fn pages(&self) -> io::Result<Vec<(String, PageHandle)>> {
        let mut found: Vec<(String, PageHandle)> = Vec::new();

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, dir = %self.dir.display(), "skipping unreadable directory entry");
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    tracing::warn!(error = %err, entry = %entry.path().display(), "skipping entry with unreadable metadata");
                    continue;
                }
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let identifier = path.to_string_lossy().into_owned();
            found.push((identifier, Arc::new(FileView::new(path)) as PageHandle));
        }

        Ok(found)
    }
}
