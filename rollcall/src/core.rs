use std::sync::{Arc, PoisonError, RwLock};

use rollcall_core::{
    AreaAggregate, CanonicalOrder, ChartSeries, LoadReport, RefreshSummary, RollcallConfig,
    RollcallError, Roster, RosterSchema, RosterSource, Selection, Student, StudentFilter,
    StudentId, TeamAggregate, area_stats, build_roster, build_series_with_target,
    filter_students, team_stats,
};
use serde_json::Value;
use tokio::sync::Mutex;

/// Attendance engine bound to one roster source.
///
/// Queries read an immutable [`Roster`] snapshot; [`Rollcall::refresh`]
/// replaces it wholesale.
pub struct Rollcall {
    pub(crate) source: Arc<dyn RosterSource>,
    pub(crate) cfg: RollcallConfig,
    roster: RwLock<Current>,
    // Serializes refreshes so swaps land in call order.
    refresh_gate: Mutex<()>,
}

/// Visible roster plus a counter bumped on every swap.
struct Current {
    generation: u64,
    roster: Arc<Roster>,
}

/// Builder for constructing a [`Rollcall`] with custom configuration.
pub struct RollcallBuilder {
    source: Option<Arc<dyn RosterSource>>,
    cfg: RollcallConfig,
}

impl Default for RollcallBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RollcallBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: teams `FRC, Aztech 1, Aztech 2, Aztech 3`, no canonical
    /// areas, metadata under `"datos personales"`, 10s fetch timeout, 8h
    /// daily target. A source must be registered via [`Self::with_source`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: RollcallConfig::default(),
        }
    }

    /// Register the roster source. A later call replaces the earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn RosterSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: RollcallConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the canonical team order. Duplicates keep their first position.
    #[must_use]
    pub fn teams<I, S>(mut self, teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.teams = CanonicalOrder::new(teams);
        self
    }

    /// Set the canonical area list. Duplicates keep their first position.
    #[must_use]
    pub fn areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.areas = CanonicalOrder::new(areas);
        self
    }

    /// Set the raw payload schema.
    #[must_use]
    pub fn schema(mut self, schema: RosterSchema) -> Self {
        self.cfg.schema = schema;
        self
    }

    /// Set the timeout applied to each roster fetch.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.fetch_timeout = timeout;
        self
    }

    /// Set the daily target drawn as the monthly reference line.
    #[must_use]
    pub const fn daily_target_hours(mut self, hours: f64) -> Self {
        self.cfg.daily_target_hours = hours;
        self
    }

    /// Build the [`Rollcall`] with an empty roster.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no source was registered, the fetch timeout is
    /// zero, or the daily target is negative or not finite.
    pub fn build(self) -> Result<Rollcall, RollcallError> {
        let Some(source) = self.source else {
            return Err(RollcallError::InvalidArg(
                "no roster source registered; add one via with_source(...)".to_string(),
            ));
        };
        if self.cfg.fetch_timeout.is_zero() {
            return Err(RollcallError::InvalidArg(
                "fetch_timeout must be greater than zero".to_string(),
            ));
        }
        let target = self.cfg.daily_target_hours;
        if !target.is_finite() || target < 0.0 {
            return Err(RollcallError::InvalidArg(format!(
                "daily_target_hours must be a non-negative number, got {target}"
            )));
        }

        Ok(Rollcall {
            source,
            cfg: self.cfg,
            roster: RwLock::new(Current {
                generation: 0,
                roster: Arc::new(Roster::empty()),
            }),
            refresh_gate: Mutex::new(()),
        })
    }
}

impl Rollcall {
    /// Start building a new `Rollcall` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use rollcall::{Rollcall, StaticSource};
    ///
    /// let rollcall = Rollcall::builder()
    ///     .with_source(Arc::new(StaticSource::new("export", payload)))
    ///     .teams(["FRC", "Aztech 1"])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> RollcallBuilder {
        RollcallBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RollcallConfig {
        &self.cfg
    }

    /// Name of the registered source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Wrap a source future with the fetch timeout and map elapsed to `SourceTimeout`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rollcall::core::fetch_with_timeout",
            skip(fut),
            fields(
                source = source_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn fetch_with_timeout<Fut>(
        source_name: &'static str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<Value, RollcallError>
    where
        Fut: std::future::Future<Output = Result<Value, RollcallError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(RollcallError::source_timeout(source_name)))
    }

    /// Fetch the raw roster, normalize it, and swap it in.
    ///
    /// On any error the current roster stays in place. Source errors other
    /// than `Source`/`SourceTimeout`/`RosterLoad` are tagged with the source
    /// name.
    ///
    /// If [`Rollcall::load`] or [`Rollcall::replace_roster`] swaps a roster in
    /// while the fetch is in flight, that newer roster is kept and the fetched
    /// one is dropped; the summary still describes the fetched payload.
    ///
    /// # Errors
    /// - `SourceTimeout` if the fetch exceeds the configured timeout.
    /// - `Source` if the source fails.
    /// - `RosterLoad` if the payload is not a JSON object keyed by student.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rollcall::core::refresh", skip(self), fields(source = self.source.name()))
    )]
    pub async fn refresh(&self) -> Result<RefreshSummary, RollcallError> {
        let _gate = self.refresh_gate.lock().await;
        let started = self.generation();
        let name = self.source.name();
        let raw = Self::fetch_with_timeout(name, self.cfg.fetch_timeout, self.source.fetch())
            .await
            .map_err(|e| tag_err(name, e))?;
        let report = build_roster(&raw, &self.cfg.schema)?;
        let summary = summarize(name, &report);
        if !self.swap_if_unchanged(started, Arc::new(report.roster)) {
            #[cfg(feature = "tracing")]
            tracing::debug!("roster replaced during fetch; keeping the newer one");
            return Ok(summary);
        }

        #[cfg(feature = "tracing")]
        log_summary(&summary);

        Ok(summary)
    }

    /// Normalize `raw` and swap it in without going through the source.
    ///
    /// # Errors
    /// Returns `RosterLoad` if `raw` is not a JSON object.
    pub fn load(&self, raw: &Value) -> Result<RefreshSummary, RollcallError> {
        let report = build_roster(raw, &self.cfg.schema)?;
        let summary = summarize("inline", &report);
        self.swap(Arc::new(report.roster));
        Ok(summary)
    }

    /// Swap in a roster built elsewhere.
    pub fn replace_roster(&self, roster: Roster) {
        self.swap(Arc::new(roster));
    }

    fn generation(&self) -> u64 {
        self.roster
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    fn swap(&self, next: Arc<Roster>) {
        let mut guard = self.roster.write().unwrap_or_else(PoisonError::into_inner);
        guard.generation += 1;
        guard.roster = next;
    }

    /// Swap `next` in only if nothing was swapped since `seen`.
    fn swap_if_unchanged(&self, seen: u64, next: Arc<Roster>) -> bool {
        let mut guard = self.roster.write().unwrap_or_else(PoisonError::into_inner);
        if guard.generation != seen {
            return false;
        }
        guard.generation += 1;
        guard.roster = next;
        true
    }

    /// Current roster. The returned snapshot is unaffected by later refreshes.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Roster> {
        Arc::clone(
            &self
                .roster
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .roster,
        )
    }

    /// Team rollup for `selection.range`, one row per canonical team.
    #[must_use]
    pub fn team_stats(&self, selection: &Selection) -> Vec<TeamAggregate> {
        team_stats(&self.snapshot(), &self.cfg.teams, selection.range)
    }

    /// Area rollup for `selection.range`, sorted by total hours descending.
    #[must_use]
    pub fn area_stats(&self, selection: &Selection) -> Vec<AreaAggregate> {
        area_stats(&self.snapshot(), &self.cfg.areas, selection.range)
    }

    /// Chart series for one student.
    ///
    /// # Errors
    /// - `NotFound` if no student has `id`.
    /// - `MissingMonth` for a monthly selection on a student with no months.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rollcall::core::series", skip(self, id, selection), fields(student = %id, range = %selection.range))
    )]
    pub fn series(&self, id: StudentId, selection: &Selection) -> Result<ChartSeries, RollcallError> {
        let roster = self.snapshot();
        let student = roster
            .get(id)
            .ok_or_else(|| RollcallError::not_found(format!("student {id}")))?;
        build_series_with_target(student, selection, self.cfg.daily_target_hours)
    }

    /// Students matching `filter`, in roster order.
    #[must_use]
    pub fn students(&self, filter: &StudentFilter) -> Vec<Student> {
        filter_students(&self.snapshot(), filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// One student by id.
    ///
    /// # Errors
    /// Returns `NotFound` if no student has `id`.
    pub fn student(&self, id: StudentId) -> Result<Student, RollcallError> {
        self.snapshot()
            .get(id)
            .cloned()
            .ok_or_else(|| RollcallError::not_found(format!("student {id}")))
    }
}

fn summarize(source: &str, report: &LoadReport) -> RefreshSummary {
    RefreshSummary {
        source: source.to_string(),
        students: report.roster.len(),
        omitted: report.omitted,
        warnings: report.warnings.clone(),
    }
}

#[cfg(feature = "tracing")]
fn log_summary(summary: &RefreshSummary) {
    if summary.is_clean() {
        tracing::info!(students = summary.students, "roster refreshed");
    } else {
        tracing::warn!(
            students = summary.students,
            omitted = summary.omitted,
            warnings = summary.warnings.len(),
            "roster refreshed with skipped records"
        );
    }
}

/// Attach the source name to errors that do not already carry one.
pub(crate) fn tag_err(source: &str, e: RollcallError) -> RollcallError {
    match e {
        e @ (RollcallError::Source { .. }
        | RollcallError::SourceTimeout { .. }
        | RollcallError::RosterLoad(_)) => e,
        other => RollcallError::source_failed(source, other.to_string()),
    }
}
