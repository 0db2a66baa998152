use crate::domain::analytics::SeriesResource;
use crate::domain::widget::WidgetKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const ENV_PREFIX: &str = "SMARTLINK";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub analytics: AnalyticsSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AnalyticsSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Identity provider settings. Only the access token is used for requests.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthSettings {
    pub provider_url: Option<String>,
    pub anon_key: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetsConfig {
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,
    #[serde(default = "default_fallback_on_error")]
    pub fallback_on_error: bool,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

impl WidgetsConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn find(&self, id: &str) -> Option<&WidgetConfig> {
        self.widgets.iter().find(|w| w.id == id)
    }
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            fallback_on_error: default_fallback_on_error(),
            widgets: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub id: String,
    pub title: String,
    pub kind: WidgetKind,
    pub top_n: Option<usize>,
    #[serde(default)]
    pub resource: SeriesResource,
    /// UTM parameter for `utm` widgets
    pub dimension: Option<String>,
}

impl WidgetConfig {
    /// Ad-hoc definition for a widget requested by kind only.
    pub fn for_kind(kind: WidgetKind) -> Self {
        Self {
            id: kind.as_str().to_string(),
            title: kind.as_str().replace('_', " "),
            kind,
            top_n: None,
            resource: SeriesResource::default(),
            dimension: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_cache_max_entries() -> u64 {
    1_000
}

fn default_fallback_on_error() -> bool {
    true
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app"))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_widgets_config() -> anyhow::Result<WidgetsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widgets"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace `${name}` placeholders in a path template with URL-encoded values
pub fn prepare_path(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}
