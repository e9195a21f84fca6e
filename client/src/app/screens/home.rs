//! Landing page: recent analyses and quota usage.

use crate::core::service::ApiService;
use shared::{quota_percent, Analysis, HomeSummary, UserProfile, MAX_ANALYSES_PER_USER};

#[derive(Debug, Clone, Default)]
pub struct HomeScreen {
    pub summary: HomeSummary,
    /// Extended profile for the greeting and avatar, logged-in users only
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
}

impl HomeScreen {
    /// Fetch the summary, and the profile when `authenticated`.
    ///
    /// A failed summary leaves the page empty rather than showing an error.
    pub async fn load(&mut self, api: &dyn ApiService, authenticated: bool) -> bool {
        self.loading = true;
        self.error = None;

        let loaded = match api.home().await {
            Ok(summary) => {
                self.summary = summary;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch home data");
                self.summary = HomeSummary::default();
                false
            }
        };

        self.profile = None;
        if authenticated {
            match api.profile().await {
                Ok(profile) => self.profile = Some(profile),
                Err(e) => tracing::debug!(error = %e, "Home profile unavailable"),
            }
        }

        self.loading = false;
        loaded
    }

    pub fn recent(&self) -> &[Analysis] {
        &self.summary.recent_analyses
    }

    /// Quota as `(used, total, percent)`, computed locally when the server omits it.
    pub fn quota(&self) -> (u32, u32, u32) {
        let used = self.summary.total_analyses;
        let total = self.summary.quota_total.unwrap_or(MAX_ANALYSES_PER_USER);
        let percent = self
            .summary
            .quota_percent
            .unwrap_or_else(|| quota_percent(used, total));
        (used, total, percent)
    }
}
