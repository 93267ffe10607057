//! Dashboard screen.

use crate::api::ApiClient;
use crate::models::DashboardMetrics;
use crate::session::TokenStore;

pub const METRICS_ERROR_MESSAGE: &str = "Error loading metrics";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    Ready(DashboardMetrics),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct DashboardScreen {
    state: DashboardState,
}

impl DashboardScreen {
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    pub const fn metrics(&self) -> Option<&DashboardMetrics> {
        match &self.state {
            DashboardState::Ready(metrics) => Some(metrics),
            _ => None,
        }
    }

    /// Fetches metrics; also serves as the manual retry after a failure.
    pub async fn refresh<S: TokenStore>(&mut self, api: &ApiClient<S>) -> &DashboardState {
        self.state = DashboardState::Loading;
        self.state = match api.dashboard_metrics().await {
            Ok(metrics) => DashboardState::Ready(metrics),
            Err(error) => {
                tracing::error!("{}: {}", METRICS_ERROR_MESSAGE, error);
                DashboardState::Failed(METRICS_ERROR_MESSAGE.to_string())
            }
        };
        &self.state
    }
}
