// Dashboard domain model
use super::period::Period;
use super::widget::WidgetView;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub period: Period,
    pub widgets: Vec<WidgetView>,
}

impl Dashboard {
    pub fn new(period: Period, widgets: Vec<WidgetView>) -> Self {
        Self {
            title: format!("Smart link analytics (last {})", period),
            period,
            widgets,
        }
    }
}
