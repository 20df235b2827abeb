use crate::config::Config;
use anyhow::Result;
use pagekit_catalog::Catalog;
use pagekit_editor::{EditSession, JsonFileStore, MutationOutcome, PageDocument};
use tracing::debug;

/// Config, catalog and page store for one working directory
pub struct Project {
    pub config: Config,
    pub catalog: Catalog,
    pub store: JsonFileStore,
}

impl Project {
    pub fn open(cwd: &str) -> Result<Self> {
        let config = Config::load(cwd)?;
        let pages_dir = config.get_pages_dir(cwd);
        debug!(pages_dir = %pages_dir.display(), "Opening project");

        Ok(Self {
            store: JsonFileStore::new(pages_dir),
            catalog: Catalog::builtin(),
            config,
        })
    }

    pub fn session(&self, page_id: &str) -> Result<EditSession<'_>> {
        let document = PageDocument::load(&self.store, page_id)?;
        Ok(EditSession::new(&self.catalog, document))
    }

    /// Load `page_id`, run `edit` against it and save when anything changed
    pub fn edit_page<F>(&mut self, page_id: &str, edit: F) -> Result<MutationOutcome>
    where
        F: FnOnce(&mut EditSession<'_>) -> Result<MutationOutcome>,
    {
        let document = PageDocument::load(&self.store, page_id)?;
        let mut session = EditSession::new(&self.catalog, document);

        let outcome = edit(&mut session)?;
        if session.is_dirty() {
            session.save(&mut self.store)?;
        }
        Ok(outcome)
    }
}
