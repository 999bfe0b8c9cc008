//! Search session: owns the committed filters, the free-text context and the
//! current batch, and decides when a request goes out and which response is
//! allowed to land.
//!
//! Every request carries a sequence number taken at issue time. A completion
//! is applied only when its number is the latest issued, so a slow response
//! can never overwrite a newer one. Nothing here depends on the terminal UI.

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::JobSearch;
use crate::error::SearchError;
use crate::filters::{FilterDimension, FilterDraft, FilterState, FilterTag};
use crate::models::{JobRecord, SortMode};
use crate::present::sort_jobs;
use crate::query::{build_params, SearchContext};

/// A request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub params: Vec<(String, String)>,
}

/// A finished request, tagged with the sequence number it was issued under.
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub result: Result<Vec<JobRecord>, SearchError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// Quiescence timer for query typing. Each keystroke pushes the deadline out.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True exactly once, the first time `now` reaches the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

pub struct Session {
    filters: FilterState,
    context: SearchContext,
    draft: Option<FilterDraft>,
    received: Vec<JobRecord>,
    jobs: Vec<JobRecord>,
    sort: SortMode,
    load: LoadState,
    issued: u64,
    debounce: Debounce,
    last_updated: Option<DateTime<Local>>,
}

impl Session {
    pub fn new(context: SearchContext, debounce: Duration) -> Self {
        Self {
            filters: FilterState::default(),
            context,
            draft: None,
            received: Vec::new(),
            jobs: Vec::new(),
            sort: SortMode::default(),
            load: LoadState::Loading,
            issued: 0,
            debounce: Debounce::new(debounce),
            last_updated: None,
        }
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Current batch in display order.
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn job(&self, id: &str) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    #[cfg(test)]
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    pub fn filter_count(&self) -> usize {
        self.filters.active_filter_count()
    }

    pub fn filter_tags(&self) -> Vec<FilterTag> {
        self.filters.describe_active_filters()
    }

    // --- Requests ---

    /// Snapshots filters and context into a new request. Any pending debounce
    /// is dropped since this request already covers it.
    pub fn issue_search(&mut self) -> SearchRequest {
        self.debounce.cancel();
        self.issued += 1;
        self.load = LoadState::Loading;
        let params = build_params(&self.filters, &self.context);
        tracing::debug!(seq = self.issued, "Issuing search");
        SearchRequest {
            seq: self.issued,
            params,
        }
    }

    /// Applies a completion if it belongs to the newest request. Returns
    /// whether it was applied.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if completion.seq != self.issued {
            tracing::debug!(
                seq = completion.seq,
                latest = self.issued,
                "Discarding stale search result"
            );
            return false;
        }

        match completion.result {
            Ok(jobs) => {
                tracing::info!(seq = completion.seq, count = jobs.len(), "Search completed");
                self.received = jobs;
                self.load = LoadState::Ready;
                self.last_updated = Some(Local::now());
            }
            Err(err) => {
                tracing::warn!(seq = completion.seq, kind = err.kind(), error = %err, "Search failed");
                self.received.clear();
                self.load = LoadState::Failed;
            }
        }
        self.resort();
        true
    }

    // --- Search context ---

    /// Query typing only arms the debounce; `poll_debounce` issues the request.
    pub fn set_query(&mut self, query: String, now: Instant) {
        self.context.query = query;
        self.debounce.arm(now);
    }

    pub fn poll_debounce(&mut self, now: Instant) -> Option<SearchRequest> {
        if self.debounce.fire(now) {
            Some(self.issue_search())
        } else {
            None
        }
    }

    pub fn debounce_time_left(&self, now: Instant) -> Option<Duration> {
        self.debounce.time_left(now)
    }

    pub fn set_location(&mut self, location: String) -> SearchRequest {
        self.context.location = location;
        self.issue_search()
    }

    // --- Sorting ---

    pub fn set_sort(&mut self, mode: SortMode) {
        self.sort = mode;
        self.resort();
    }

    fn resort(&mut self) {
        self.jobs = self.received.clone();
        sort_jobs(&mut self.jobs, self.sort);
    }

    // --- Filters ---

    pub fn remove_filter(&mut self, dimension: FilterDimension) -> SearchRequest {
        self.filters.remove_dimension(dimension);
        self.issue_search()
    }

    pub fn clear_all_filters(&mut self) -> SearchRequest {
        self.filters.reset_to_defaults();
        self.issue_search()
    }

    pub fn open_filters(&mut self) {
        self.draft = Some(FilterDraft::from_committed(&self.filters));
    }

    pub fn draft(&self) -> Option<&FilterDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut FilterDraft> {
        self.draft.as_mut()
    }

    /// Commits the staged panel edits and searches. `None` when no panel is open.
    pub fn apply_filters(&mut self) -> Option<SearchRequest> {
        let draft = self.draft.take()?;
        draft.apply(&mut self.filters);
        Some(self.issue_search())
    }

    pub fn cancel_filters(&mut self) {
        self.draft = None;
    }
}

/// Runs a request on the runtime and reports back on `tx`. The request is
/// never cancelled; `Session::complete` discards it if it went stale.
pub fn dispatch<S: JobSearch>(
    handle: &Handle,
    searcher: Arc<S>,
    request: SearchRequest,
    tx: UnboundedSender<Completion>,
) {
    handle.spawn(async move {
        let SearchRequest { seq, params } = request;
        let result = searcher.search(params).await;
        if tx.send(Completion { seq, result }).is_err() {
            tracing::debug!(seq, "Search finished after the session closed");
        }
    });
}
