// Dashboard service - Use case for building dashboards
use crate::application::widget_service::{WidgetRequest, WidgetService};
use crate::domain::dashboard::Dashboard;
use crate::domain::period::Period;
use crate::domain::widget::{WidgetKind, WidgetView};
use crate::error::{ApiError, Result};
use crate::infrastructure::config::{WidgetConfig, WidgetsConfig};
use futures::future::join_all;

#[derive(Clone)]
pub struct DashboardService {
    widget_service: WidgetService,
    widgets_config: WidgetsConfig,
}

impl DashboardService {
    pub fn new(widget_service: WidgetService, widgets_config: WidgetsConfig) -> Self {
        Self {
            widget_service,
            widgets_config,
        }
    }

    pub async fn get_dashboard(&self, period: Period, refresh: bool) -> Dashboard {
        let loads = self.widgets_config.widgets.iter().map(|widget| {
            self.widget_service
                .load(widget, WidgetRequest::for_period(period, refresh))
        });
        let widgets = join_all(loads).await;

        let failed = widgets
            .iter()
            .filter(|w| w.error.is_some())
            .count();
        tracing::debug!(
            "Built dashboard for {} with {} widgets ({} failed)",
            period,
            widgets.len(),
            failed
        );

        Dashboard::new(period, widgets)
    }

    /// Load one widget by configured id, or by kind when no widget has that id.
    pub async fn get_widget(&self, id: &str, request: WidgetRequest) -> Result<WidgetView> {
        let widget = self.resolve(id)?;
        Ok(self.widget_service.load(&widget, request).await)
    }

    pub async fn invalidate(&self) -> u64 {
        self.widget_service.invalidate().await
    }

    fn resolve(&self, id: &str) -> Result<WidgetConfig> {
        if let Some(widget) = self.widgets_config.find(id) {
            return Ok(widget.clone());
        }
        id.parse::<WidgetKind>()
            .map(WidgetConfig::for_kind)
            .map_err(|_| ApiError::InvalidArgument(format!("unknown widget '{}'", id)))
    }
}
