// Widget service - One fetch/fallback policy for every dashboard widget
use crate::application::analytics_repository::AnalyticsRepository;
use crate::application::fallback::fallback_for;
use crate::application::remote_resource::{ResourceCache, ResourceState};
use crate::domain::analytics::SeriesResource;
use crate::domain::period::{Interval, Period};
use crate::domain::widget::{DataSource, WidgetData, WidgetKind, WidgetStatus, WidgetView};
use crate::error::Result;
use crate::infrastructure::config::WidgetConfig;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TOP_COUNTRIES: usize = 5;
const DEFAULT_UTM_DIMENSION: &str = "utm_source";
/// Upper bound for a requested top-N
pub const MAX_TOP_N: usize = 100;

/// Parameters that identify one cached widget result. Only the
/// top-countries widget sends its limit upstream, so `limit` is unset for
/// every other kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetKey {
    kind: WidgetKind,
    period: Period,
    limit: Option<usize>,
    interval: Option<Interval>,
    resource: SeriesResource,
    dimension: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WidgetRequest {
    pub period: Period,
    pub top_n: Option<usize>,
    pub interval: Option<Interval>,
    /// Skip the cache and always hit the backend
    pub refresh: bool,
    /// Data handed in by the caller; no fetch is made
    pub supplied: Option<WidgetData>,
}

impl WidgetRequest {
    pub fn for_period(period: Period, refresh: bool) -> Self {
        Self {
            period,
            refresh,
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct WidgetService {
    repository: Arc<dyn AnalyticsRepository>,
    cache: Arc<ResourceCache<WidgetKey, WidgetData>>,
    fallback_on_error: bool,
}

impl WidgetService {
    pub fn new(
        repository: Arc<dyn AnalyticsRepository>,
        cache_ttl: Duration,
        cache_max_entries: u64,
        fallback_on_error: bool,
    ) -> Self {
        Self {
            repository,
            cache: Arc::new(ResourceCache::new(cache_ttl, cache_max_entries)),
            fallback_on_error,
        }
    }

    pub async fn load(&self, widget: &WidgetConfig, request: WidgetRequest) -> WidgetView {
        let top_n = request.top_n.or(widget.top_n).map(|n| n.clamp(1, MAX_TOP_N));
        let period = request.period;

        if let Some(supplied) = request.supplied {
            return Self::supplied_view(widget, period, supplied, top_n);
        }

        let interval = match widget.kind {
            WidgetKind::TimeSeries => Some(request.interval.unwrap_or(period.default_interval())),
            _ => None,
        };
        let key = WidgetKey {
            kind: widget.kind,
            period,
            limit: match widget.kind {
                WidgetKind::TopCountries => Some(top_n.unwrap_or(DEFAULT_TOP_COUNTRIES)),
                _ => None,
            },
            interval,
            resource: widget.resource,
            dimension: widget.dimension.clone(),
        };

        let fallback_on_error = self.fallback_on_error;
        let state = self
            .cache
            .fetch(
                &key,
                request.refresh,
                || self.fetch_live(&key),
                || fallback_on_error.then(|| fallback_for(widget.kind)),
            )
            .await;

        if let ResourceState::Failed { error, .. } = &state {
            tracing::warn!(
                "Widget {} ({}) failed for {}: {}",
                widget.id,
                widget.kind.as_str(),
                period,
                error
            );
        }

        let view = Self::view(widget, period, state, top_n);
        tracing::debug!(
            "Widget {} served {:?} rows from {:?}",
            widget.id,
            view.data.as_ref().and_then(WidgetData::len),
            view.source
        );
        view
    }

    /// Drop every cached widget result
    pub async fn invalidate(&self) -> u64 {
        let cached = self.cache.len().await;
        self.cache.clear();
        tracing::info!("Cleared {} cached widget results", cached);
        cached
    }

    async fn fetch_live(&self, key: &WidgetKey) -> Result<WidgetData> {
        let repo = &self.repository;
        let period = key.period;
        let data = match key.kind {
            WidgetKind::Overview => WidgetData::Overview(repo.overview(period).await?),
            WidgetKind::TimeSeries => {
                let interval = key.interval.unwrap_or(period.default_interval());
                WidgetData::TimeSeries(repo.time_series(key.resource, period, interval).await?)
            }
            WidgetKind::Devices => WidgetData::Devices(repo.device_breakdown(period).await?),
            WidgetKind::Geography => WidgetData::Geography(repo.geo_breakdown(period).await?),
            WidgetKind::TopCountries => {
                let limit = key.limit.unwrap_or(DEFAULT_TOP_COUNTRIES);
                WidgetData::TopCountries(repo.top_countries(period, limit).await?)
            }
            WidgetKind::TrafficSources => {
                WidgetData::TrafficSources(repo.traffic_sources(period).await?)
            }
            WidgetKind::Utm => {
                let dimension = key.dimension.as_deref().unwrap_or(DEFAULT_UTM_DIMENSION);
                WidgetData::Utm(repo.utm_breakdown(period, dimension).await?)
            }
            WidgetKind::Targets => WidgetData::Targets(repo.target_performance(period).await?),
        };
        Ok(data)
    }

    fn supplied_view(
        widget: &WidgetConfig,
        period: Period,
        supplied: WidgetData,
        top_n: Option<usize>,
    ) -> WidgetView {
        let mut view = Self::empty_view(widget, period);
        if supplied.kind() == widget.kind {
            view.status = WidgetStatus::Success;
            view.source = DataSource::External;
            view.data = Some(supplied.truncate(top_n));
        } else {
            view.status = WidgetStatus::Error;
            view.error = Some(format!(
                "supplied {} data does not fit a {} widget",
                supplied.kind().as_str(),
                widget.kind.as_str()
            ));
        }
        view
    }

    fn view(
        widget: &WidgetConfig,
        period: Period,
        state: ResourceState<WidgetData>,
        top_n: Option<usize>,
    ) -> WidgetView {
        let shown = |data: Option<&Arc<WidgetData>>| {
            data.map(|d| d.as_ref().clone().truncate(top_n))
        };

        let mut view = Self::empty_view(widget, period);
        match state {
            ResourceState::Ready { data } => {
                view.status = WidgetStatus::Success;
                view.source = DataSource::Live;
                view.data = shown(Some(&data));
            }
            ResourceState::Failed { error, data } => {
                view.status = WidgetStatus::Error;
                view.error = Some(error);
                view.data = shown(data.as_ref());
                if view.data.is_some() {
                    view.source = DataSource::Fallback;
                }
            }
        }
        view
    }

    fn empty_view(widget: &WidgetConfig, period: Period) -> WidgetView {
        WidgetView {
            id: widget.id.clone(),
            title: widget.title.clone(),
            kind: widget.kind,
            period,
            status: WidgetStatus::Loading,
            source: DataSource::None,
            data: None,
            error: None,
        }
    }
}
