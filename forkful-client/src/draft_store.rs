use std::{cmp::Reverse, collections::HashSet};

use anyhow::Context;

use crate::{
    api::{Action, Draft, DraftId, Error},
    Storage,
};

pub const DEFAULT_DRAFTS_KEY: &str = "forkful-blog-drafts";

/// Locally persisted blog post drafts
///
/// The whole list lives as a single JSON array under one storage key. Storage
/// failures never reach the caller: reads degrade to "no drafts" and writes
/// are dropped, both with a warning in the logs. Concurrent writers (eg. two
/// browser tabs) overwrite each other's whole list.
pub struct DraftStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> DraftStore<S> {
    pub fn new(storage: S) -> DraftStore<S> {
        DraftStore::with_key(storage, DEFAULT_DRAFTS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> DraftStore<S> {
        DraftStore {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Returns an id not used by any currently stored draft
    pub fn generate_id(&self) -> DraftId {
        let used = self
            .list_drafts()
            .into_iter()
            .map(|d| d.id)
            .collect::<HashSet<_>>();
        loop {
            let id = DraftId::generate();
            if !used.contains(&id) {
                return id;
            }
            tracing::debug!(%id, "generated draft id collides with a stored draft, retrying");
        }
    }

    /// All stored drafts, in no particular order
    pub fn list_drafts(&self) -> Vec<Draft> {
        match self.load() {
            Ok(drafts) => drafts,
            Err(err) => {
                tracing::warn!(?err, key = %self.key, "failed loading drafts, treating as empty");
                Vec::new()
            }
        }
    }

    /// Most recently saved first
    pub fn list_drafts_by_recency(&self) -> Vec<Draft> {
        let mut drafts = self.list_drafts();
        drafts.sort_by_key(|d| Reverse(d.updated_at));
        drafts
    }

    pub fn get_draft(&self, id: &DraftId) -> Option<Draft> {
        self.list_drafts().into_iter().find(|d| d.id == *id)
    }

    /// Insert or replace the draft with the same id, stamping `updated_at` with the current time
    pub fn save_draft(&mut self, mut draft: Draft) {
        draft.touch();
        let mut drafts = self.list_drafts();
        match drafts.iter_mut().find(|d| d.id == draft.id) {
            Some(existing) => *existing = draft,
            None => drafts.push(draft),
        }
        self.store_or_warn(&drafts);
    }

    pub fn delete_draft(&mut self, id: &DraftId) {
        let mut drafts = self.list_drafts();
        let num_before = drafts.len();
        drafts.retain(|d| d.id != *id);
        if drafts.len() == num_before {
            tracing::trace!(%id, "no stored draft to delete");
            return;
        }
        self.store_or_warn(&drafts);
    }

    /// To be called once the remote API accepted the publication of draft `id`
    pub fn mark_published(&mut self, id: &DraftId) {
        tracing::info!(%id, "draft published, dropping local copy");
        self.delete_draft(id);
    }

    fn load(&self) -> anyhow::Result<Vec<Draft>> {
        let raw = match self
            .storage
            .get(&self.key)
            .with_context(|| format!("reading drafts from storage key {:?}", self.key))?
        {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&raw).context("parsing stored drafts list")?;
        let mut drafts: Vec<Draft> = Vec::with_capacity(entries.len());
        for entry in entries {
            let draft = match serde_json::from_value::<Draft>(entry) {
                Ok(d) => d,
                Err(err) => {
                    tracing::warn!(?err, "skipping malformed stored draft");
                    continue;
                }
            };
            match drafts.iter_mut().find(|d| d.id == draft.id) {
                Some(existing) => {
                    tracing::warn!(id = %draft.id, "duplicate stored draft, keeping the newest");
                    if draft.updated_at > existing.updated_at {
                        *existing = draft;
                    }
                }
                None => drafts.push(draft),
            }
        }
        Ok(drafts)
    }

    fn store(&mut self, drafts: &[Draft]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(drafts).context("serializing drafts list")?;
        self.storage
            .set(&self.key, &raw)
            .with_context(|| format!("writing drafts to storage key {:?}", self.key))
    }

    fn store_or_warn(&mut self, drafts: &[Draft]) {
        match self.store(drafts) {
            Ok(()) => tracing::trace!(num_drafts = drafts.len(), "drafts list saved"),
            Err(err) => tracing::warn!(?err, key = %self.key, "failed saving drafts, change is lost"),
        }
    }
}

/// The publication to send for `draft`; once the API accepts it, call
/// [`DraftStore::mark_published`] with the draft's id
pub fn request_publish(draft: &Draft) -> Result<Action, Error> {
    let action = Action::PublishDraft {
        draft: draft.clone(),
    };
    action.validate()?;
    Ok(action)
}
