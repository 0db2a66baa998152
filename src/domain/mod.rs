// Domain layer - Plain data models and pure helpers
pub mod analytics;
pub mod dashboard;
pub mod datetime;
pub mod period;
pub mod widget;
pub mod workspace;
