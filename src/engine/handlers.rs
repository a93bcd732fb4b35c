use crate::engine::command::Command;
use crate::engine::Engine;
use crate::report::ResultRecord;
use crate::{Result, TallyError};

/// The literal marker counted in fetched documents
///
/// This is a raw text scan, not a structural count; downstream consumers
/// depend on exactly this semantics, malformed markup and all.
const IMG_MARKER: &str = "<img ";

/// Counts literal occurrences of the image-tag marker
pub fn marker_count(body: &str) -> u64 {
    body.matches(IMG_MARKER).count() as u64
}

impl Engine {
    /// Routes a command to its handler
    ///
    /// An error return is contained at the worker loop; it fails this one
    /// command, never the pool.
    pub async fn dispatch(&self, cmd: Command) -> Result<()> {
        match cmd {
            Command::FetchPage { page } => self.handle_page(page).await,
            Command::ResolveAndCount { entry_id, title } => {
                self.handle_resolve(&entry_id, &title).await
            }
            Command::CountImages {
                entry_id,
                title,
                imdb_id,
            } => self.handle_count(&entry_id, &title, &imdb_id).await,
        }
    }

    /// Fetches one catalog page and fans out per-entry commands
    async fn handle_page(&self, page: u32) -> Result<()> {
        // The orchestrator seeds pages speculatively while the total is
        // unknown; drop the ones that turn out to lie beyond the catalog.
        if self.page_out_of_range(page) {
            tracing::debug!("Short circuit 1: page {}", page);
            return Ok(());
        }

        let fetched = self.catalog.fetch_page(page).await?;

        // First successful read fixes the total for the whole run.
        self.total.set(fetched.total);

        // Second chance now that the total is authoritative.
        if self.page_out_of_range(page) {
            tracing::debug!("Short circuit 2: page {}", page);
            return Ok(());
        }

        tracing::debug!(
            "Page {}: {} entries, catalog total {}",
            page,
            fetched.entries.len(),
            fetched.total
        );

        for entry in fetched.entries {
            let cmd = match entry.imdb_id {
                Some(imdb_id) => Command::CountImages {
                    entry_id: entry.id,
                    title: entry.title,
                    imdb_id,
                },
                None => Command::ResolveAndCount {
                    entry_id: entry.id,
                    title: entry.title,
                },
            };
            self.queue.submit(cmd)?;
        }

        Ok(())
    }

    /// Resolves a title to an IMDB id by progressively shorter searches,
    /// then delegates to counting
    async fn handle_resolve(&self, entry_id: &str, title: &str) -> Result<()> {
        // Another worker may already own this entry via a direct id.
        if self.registry.contains(entry_id) {
            return Ok(());
        }

        // Trim the last word on each miss; titles with substitutions
        // ("And" for "&") often only match a shorter prefix.
        let mut words: Vec<&str> = title.split_whitespace().collect();

        while !words.is_empty() {
            if let Some(imdb_id) = self.resolver.search(&words).await? {
                return self.count_entry(entry_id, &imdb_id).await;
            }
            words.pop();
        }

        Err(TallyError::ResolutionFailed {
            title: title.to_string(),
        })
    }

    /// Counts image tags for an entry with a known IMDB id
    async fn handle_count(&self, entry_id: &str, title: &str, imdb_id: &str) -> Result<()> {
        tracing::trace!("Counting {:?} (tt{})", title, imdb_id);
        self.count_entry(entry_id, imdb_id).await
    }

    /// Shared counting tail for both the direct and the resolved path
    async fn count_entry(&self, entry_id: &str, imdb_id: &str) -> Result<()> {
        // Claim before any network work, so a duplicate dispatched
        // milliseconds later is already caught.
        if !self.registry.claim(entry_id) {
            return Ok(());
        }

        let document = self.documents.fetch_document(imdb_id).await?;
        let count = marker_count(&document.body);

        self.sink.push(ResultRecord {
            url: document.url,
            count,
            imdb_id: imdb_id.to_string(),
        });

        Ok(())
    }
}
