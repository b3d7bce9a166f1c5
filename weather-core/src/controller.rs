//! Query lifecycle: Idle -> Loading -> Success / Failed.

use std::sync::Arc;

use chrono::Locale;

use crate::{
    error::WeatherError,
    model::{Theme, WeatherReport},
    present::{derive_theme, weather_report},
    provider::WeatherProvider,
};

/// Lifecycle of the latest query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryPhase {
    #[default]
    Idle,
    Loading,
    Success(WeatherReport),
    Failed(String),
}

/// Everything the view needs to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub city_input: String,
    pub phase: QueryPhase,
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QueryPhase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            QueryPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.phase {
            QueryPhase::Success(report) => Some(report),
            _ => None,
        }
    }

    /// Theme for the shown report at the given local hour; `None` without a report.
    pub fn theme_at(&self, hour: u32) -> Option<Theme> {
        derive_theme(self.report().map(|r| &r.current), hour)
    }
}

/// Handle for one issued query. Only the ticket of the most recent query
/// may change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

/// Fetch current conditions, then the forecast, and derive the report.
/// The first failure aborts the whole lookup.
pub async fn fetch_report<P>(
    provider: &P,
    city: &str,
    locale: Locale,
) -> Result<WeatherReport, WeatherError>
where
    P: WeatherProvider + ?Sized,
{
    let current = provider.current(city).await?;
    let forecast = provider.forecast(city).await?;
    Ok(weather_report(&current, &forecast, locale))
}

#[derive(Debug)]
pub struct QueryController<P: ?Sized> {
    provider: Arc<P>,
    locale: Locale,
    state: QueryState,
    generation: u64,
}

impl<P> QueryController<P>
where
    P: WeatherProvider + ?Sized,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            locale: Locale::en_US,
            state: QueryState::default(),
            generation: 0,
        }
    }

    /// Locale used for forecast day labels.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn provider(&self) -> Arc<P> {
        Arc::clone(&self.provider)
    }

    /// Start a query. Blank input is ignored and leaves the state untouched.
    pub fn begin(&mut self, city: &str) -> Option<QueryTicket> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        self.generation += 1;
        self.state.city_input = city.to_string();
        self.state.phase = QueryPhase::Loading;

        tracing::debug!(city, generation = self.generation, "query started");
        Some(QueryTicket { generation: self.generation })
    }

    /// Apply the outcome of a query. Returns `false` when a newer query has
    /// been started since, in which case the outcome is dropped.
    pub fn complete(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<WeatherReport, WeatherError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.generation,
                "dropping stale query result"
            );
            return false;
        }

        self.state.phase = match outcome {
            Ok(report) => QueryPhase::Success(report),
            Err(err) => {
                tracing::info!(city = %self.state.city_input, error = %err, "query failed");
                QueryPhase::Failed(err.to_string())
            }
        };
        true
    }

    /// Run a full query for `city` and apply its outcome.
    pub async fn submit_query(&mut self, city: &str) {
        let Some(ticket) = self.begin(city) else {
            return;
        };

        let city = self.state.city_input.clone();
        let outcome = fetch_report(self.provider.as_ref(), &city, self.locale).await;
        self.complete(ticket, outcome);
    }
}
