use chrono::Datelike;
use uuid::Uuid;

use crate::error::Result;
use crate::event::Event;
use crate::grid::{build_grid, map_events, CalendarMonth};
use crate::navigate::{shift_month, MonthShift};
use crate::provider::{default_provider, DateProvider, EventSource};

/// Owns the currently displayed month and drives the grid/fetch/map cycle.
///
/// Every navigation replaces the grid wholesale and issues a fresh fetch
/// token; a fetch result is only applied while its token is still current,
/// so a slow response for an older month can never overwrite a newer grid.
pub struct MonthController<S: EventSource> {
    source: S,
    provider: &'static dyn DateProvider,
    month: u32,
    year: i32,
    token: Uuid,
    grid: CalendarMonth,
}

impl<S: EventSource> MonthController<S> {
    /// Start on the current month according to the process-wide provider.
    pub fn new(source: S) -> Result<Self> {
        let provider = default_provider();
        let today = provider.today();

        Self::with_provider(source, provider, today.month(), today.year())
    }

    pub fn with_provider(
        source: S,
        provider: &'static dyn DateProvider,
        month: u32,
        year: i32,
    ) -> Result<Self> {
        let grid = build_grid(month, year, provider.today(), provider)?;

        Ok(MonthController {
            source,
            provider,
            month,
            year,
            token: Uuid::new_v4(),
            grid,
        })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The render-ready grid for the current month.
    pub fn view(&self) -> &CalendarMonth {
        &self.grid
    }

    /// Token that a fetch result must present to be applied.
    pub fn fetch_token(&self) -> Uuid {
        self.token
    }

    /// Step to the adjacent month: recompute the grid from scratch with
    /// empty event lists, invalidate any in-flight fetch, then refetch.
    ///
    /// Month, year, grid and token are committed together only once the
    /// new grid exists; a provider failure leaves the controller on the
    /// month it was showing.
    pub async fn navigate(&mut self, shift: MonthShift) -> Result<()> {
        let (month, year) = shift_month(self.month, self.year, shift)?;
        let grid = build_grid(month, year, self.provider.today(), self.provider)?;

        self.month = month;
        self.year = year;
        self.grid = grid;
        self.token = Uuid::new_v4();

        self.refresh().await
    }

    /// Refetch events for the current month and overlay them on the grid.
    ///
    /// On fetch failure the grid is left rendered with empty event lists
    /// and the error is returned to the caller; re-navigating or calling
    /// again retries.
    pub async fn refresh(&mut self) -> Result<()> {
        let token = self.token;

        match self.source.fetch_events(self.month, self.year).await {
            Ok(events) => {
                if !self.apply_events(token, events) {
                    log::debug!(
                        "discarding stale event fetch for {}-{:02}",
                        self.year,
                        self.month
                    );
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("event fetch for {}-{:02} failed: {}", self.year, self.month, err);
                self.rebuild()?;
                Err(err)
            }
        }
    }

    /// Overlay `events` if `token` is still the current one. Returns
    /// whether the result was applied; stale tokens are a no-op.
    pub fn apply_events(&mut self, token: Uuid, events: Vec<Event>) -> bool {
        if token != self.token {
            return false;
        }

        self.grid = map_events(&self.grid, &events, self.provider);
        true
    }

    fn rebuild(&mut self) -> Result<()> {
        self.token = Uuid::new_v4();
        self.grid = build_grid(self.month, self.year, self.provider.today(), self.provider)?;
        Ok(())
    }
}

impl<S: EventSource> std::fmt::Debug for MonthController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonthController")
            .field("month", &self.month)
            .field("year", &self.year)
            .field("token", &self.token)
            .field("grid", &self.grid)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::provider::{ChronoDateProvider, StaticEventSource};
    use async_trait::async_trait;
    use chrono::{DateTime, Month, NaiveDate, TimeZone, Utc};
    use once_cell::sync::Lazy;
    use std::sync::atomic::{AtomicBool, Ordering};

    static PROVIDER: Lazy<ChronoDateProvider> = Lazy::new(ChronoDateProvider::new);

    /// Delegates to chrono until flipped down, then fails date queries.
    struct OutageProvider {
        down: AtomicBool,
    }

    impl DateProvider for OutageProvider {
        fn first_weekday_offset(&self, month: Month, year: i32) -> Result<u32> {
            if self.down.load(Ordering::SeqCst) {
                return Err(Error::from(ErrorKind::DateProviderUnavailable));
            }
            PROVIDER.first_weekday_offset(month, year)
        }

        fn days_in_month(&self, month: Month, year: i32) -> Result<u32> {
            if self.down.load(Ordering::SeqCst) {
                return Err(Error::from(ErrorKind::DateProviderUnavailable));
            }
            PROVIDER.days_in_month(month, year)
        }

        fn components(&self, stamp: &DateTime<Utc>) -> (i32, u32, u32) {
            PROVIDER.components(stamp)
        }

        fn today(&self) -> NaiveDate {
            PROVIDER.today()
        }
    }

    static OUTAGE: Lazy<OutageProvider> = Lazy::new(|| OutageProvider {
        down: AtomicBool::new(false),
    });

    struct FailingSource;

    #[async_trait]
    impl EventSource for FailingSource {
        async fn fetch_events(&self, _month: u32, _year: i32) -> Result<Vec<Event>> {
            Err(Error::new(ErrorKind::EventFetchFailed, "backend down"))
        }
    }

    fn event_on(day: u32) -> Event {
        Event::at(Utc.with_ymd_and_hms(2024, 2, day, 10, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn navigation_refetches_and_overlays() {
        let source = StaticEventSource::new(vec![event_on(3)]);
        let mut ctrl = MonthController::with_provider(source, &*PROVIDER, 1, 2024).unwrap();

        ctrl.navigate(MonthShift::Next).await.unwrap();

        assert_eq!((ctrl.month(), ctrl.year()), (2, 2024));
        let cell = ctrl
            .view()
            .cells()
            .iter()
            .find(|c| c.date() == Some(3))
            .unwrap();
        assert_eq!(cell.events().len(), 1);
    }

    #[tokio::test]
    async fn year_rollover_both_directions() {
        let mut ctrl =
            MonthController::with_provider(StaticEventSource::empty(), &*PROVIDER, 1, 2024)
                .unwrap();

        ctrl.navigate(MonthShift::Prev).await.unwrap();
        assert_eq!((ctrl.month(), ctrl.year()), (12, 2023));

        ctrl.navigate(MonthShift::Next).await.unwrap();
        assert_eq!((ctrl.month(), ctrl.year()), (1, 2024));
    }

    #[tokio::test]
    async fn stale_fetch_result_is_ignored() {
        let mut ctrl =
            MonthController::with_provider(StaticEventSource::empty(), &*PROVIDER, 2, 2024)
                .unwrap();

        // fetch issued for February, but navigation moves on before it lands
        let stale = ctrl.fetch_token();
        ctrl.navigate(MonthShift::Next).await.unwrap();

        assert!(!ctrl.apply_events(stale, vec![event_on(3)]));
        assert!(ctrl.view().cells().iter().all(|c| c.events().is_empty()));

        // a current token still applies
        let current = ctrl.fetch_token();
        assert!(ctrl.apply_events(current, Vec::new()));
    }

    #[tokio::test]
    async fn fetch_failure_leaves_grid_rendered_empty() {
        let mut ctrl =
            MonthController::with_provider(FailingSource, &*PROVIDER, 2, 2024).unwrap();

        let err = ctrl.refresh().await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EventFetchFailed));

        // grid still present, all cells empty
        assert_eq!(ctrl.view().cells().len(), 4 + 29);
        assert!(ctrl.view().cells().iter().all(|c| c.events().is_empty()));
    }

    #[tokio::test]
    async fn failed_navigate_keeps_month_and_grid_consistent() {
        let mut ctrl =
            MonthController::with_provider(StaticEventSource::empty(), &*OUTAGE, 1, 2024)
                .unwrap();

        OUTAGE.down.store(true, Ordering::SeqCst);
        let err = ctrl.navigate(MonthShift::Next).await.unwrap_err();
        OUTAGE.down.store(false, Ordering::SeqCst);

        assert!(matches!(err.kind, ErrorKind::DateProviderUnavailable));

        // still on January, grid and counters in agreement
        assert_eq!((ctrl.month(), ctrl.year()), (1, 2024));
        assert_eq!(ctrl.view().month_num(), ctrl.month());
        assert_eq!(ctrl.view().year(), ctrl.year());
    }

    #[test]
    fn invalid_start_month_fails_fast() {
        let err = MonthController::with_provider(StaticEventSource::empty(), &*PROVIDER, 13, 2024)
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidMonthYear));
    }
}
