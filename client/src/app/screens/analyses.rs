//! # Saved Analyses List
//!
//! Selection, single delete and bulk delete. Both deletes go through a
//! confirmation step ([`PendingDelete`]); only ids the server confirmed as
//! deleted leave the cached list.

use crate::core::service::ApiService;
use shared::Analysis;
use std::collections::BTreeSet;

pub const LOAD_FAILED: &str = "Failed to load analyses";
pub const DELETE_FAILED: &str = "Failed to delete analysis";
pub const BULK_DELETE_FAILED: &str = "Failed to bulk delete analyses";

/// Delete awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Single(i64),
    Bulk(Vec<i64>),
}

impl PendingDelete {
    pub fn ids(&self) -> Vec<i64> {
        match self {
            PendingDelete::Single(id) => vec![*id],
            PendingDelete::Bulk(ids) => ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisListScreen {
    pub analyses: Vec<Analysis>,
    pub selected: BTreeSet<i64>,
    pub pending_delete: Option<PendingDelete>,
    pub deleting: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AnalysisListScreen {
    pub async fn load(&mut self, api: &dyn ApiService) -> bool {
        self.loading = true;
        self.error = None;
        let outcome = api.list_analyses().await;
        self.loading = false;

        match outcome {
            Ok(analyses) => {
                tracing::debug!(count = analyses.len(), "Analyses loaded");
                // Selection of ids that no longer exist is dropped
                self.selected
                    .retain(|id| analyses.iter().any(|a| a.id == *id));
                self.analyses = analyses;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error loading analyses");
                self.error = Some(e.user_message(LOAD_FAILED));
                false
            }
        }
    }

    pub fn toggle(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn all_selected(&self) -> bool {
        !self.analyses.is_empty() && self.selected.len() == self.analyses.len()
    }

    /// Select everything, or clear the selection when everything is selected.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.analyses.iter().map(|a| a.id).collect();
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(PendingDelete::Single(id));
    }

    /// Ask to delete the current selection. Nothing happens with an empty selection.
    pub fn request_bulk_delete(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.pending_delete = Some(PendingDelete::Bulk(self.selected.iter().copied().collect()));
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Run the pending delete. Returns false with nothing pending or on failure.
    pub async fn confirm_delete(&mut self, api: &dyn ApiService) -> bool {
        let Some(pending) = self.pending_delete.take() else {
            return false;
        };

        self.deleting = true;
        self.error = None;
        let outcome = match &pending {
            PendingDelete::Single(id) => api
                .delete_analysis(*id)
                .await
                .map_err(|e| e.user_message(DELETE_FAILED)),
            PendingDelete::Bulk(ids) => api
                .bulk_delete_analyses(ids)
                .await
                .map(|response| {
                    tracing::info!(deleted = response.deleted_count, "Bulk delete finished");
                })
                .map_err(|e| e.user_message(BULK_DELETE_FAILED)),
        };
        self.deleting = false;

        match outcome {
            Ok(()) => {
                self.remove(&pending.ids());
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    fn remove(&mut self, ids: &[i64]) {
        self.analyses.retain(|a| !ids.contains(&a.id));
        for id in ids {
            self.selected.remove(id);
        }
    }
}
