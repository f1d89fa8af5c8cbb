//! User actions as explicit commands

use super::batch::{self, BatchReport, SearchBatch};
use super::Combination;
use crate::cache::{CacheStorage, CachedSerpClient, ClearStats};
use crate::client::SerpApi;
use crate::error::Result;

/// An action the front end asks the core to perform
#[derive(Debug, Clone)]
pub enum Command {
    /// Search every combination and check the target
    SearchBatch(SearchBatch),
    /// Delete every cached entry
    ClearCache,
}

/// What a command produced
#[derive(Debug)]
pub enum CommandOutcome {
    Search(BatchReport),
    CacheCleared(ClearStats),
}

/// The core: a cached search client plus the storage behind it
pub struct SearchService<C: SerpApi> {
    client: CachedSerpClient<C>,
    storage: CacheStorage,
}

impl<C: SerpApi> SearchService<C> {
    pub fn new(client: CachedSerpClient<C>, storage: CacheStorage) -> Self {
        Self { client, storage }
    }

    /// Storage this service clears
    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    /// Execute a command, reporting progress of search batches through `on_start`
    pub async fn execute(
        &self,
        command: Command,
        on_start: impl FnMut(usize, usize, &Combination),
    ) -> Result<CommandOutcome> {
        match command {
            Command::SearchBatch(search) => {
                let report = batch::run_batch(&self.client, &search, on_start).await;
                Ok(CommandOutcome::Search(report))
            }
            Command::ClearCache => {
                let stats = self.storage.clear_all()?;
                log::debug!(
                    "Cleared {} cache entries from {}",
                    stats.entries_removed,
                    self.storage.dir().display()
                );
                Ok(CommandOutcome::CacheCleared(stats))
            }
        }
    }
}
