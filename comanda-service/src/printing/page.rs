//! Full page output
//!
//! The A4 channel ends at a page renderer: the document is handed off and
//! whatever happens afterwards (print dialog, browser, archive) is outside
//! the dispatcher's view.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

/// Hands full page documents to whatever displays or prints them
pub trait PageRenderer: Send + Sync {
    fn render_markup(&self, markup: &str) -> io::Result<()>;
}

/// Writes each document as an `.html` file into a spool directory
#[derive(Debug, Clone)]
pub struct SpoolPageRenderer {
    dir: PathBuf,
}

impl SpoolPageRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_path(&self) -> PathBuf {
        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.dir.join(format!("{}-{}.html", stamp, &id[..8]))
    }
}

impl PageRenderer for SpoolPageRenderer {
    #[instrument(skip(self, markup), fields(dir = %self.dir.display(), bytes = markup.len()))]
    fn render_markup(&self, markup: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.next_path();
        std::fs::write(&path, markup)?;
        debug!(path = %path.display(), "Page spooled");
        Ok(())
    }
}
