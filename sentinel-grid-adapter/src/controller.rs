use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use sentinel_grid::{
    Boundary, DataSource, GateRun, IgnoreReason, IncrementalLoader, PageRequest, RefreshTicket,
    Row, RowClass, ScrollGate, SignalOutcome, VirtualisationOptions, VirtualisationState,
    boundary_crossed, classify_row, for_each_sentinel_row, parse_row_index,
};

use crate::{ObserveRequest, ObserverCommand, SentinelEvent};

/// A debounced refresh that fired: the host should re-render with `state`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Refresh {
    pub ticket: RefreshTicket,
    pub state: VirtualisationState,
}

/// A framework-neutral controller for one virtualized grid.
///
/// The controller owns the options, the range state and the loaded rows. It holds no UI
/// objects; the host drives it by:
/// - forwarding observer signals (`handle`, or the `on_*` methods)
/// - calling `tick(now_ms)` on a timer, which returns a [`Refresh`] once a burst of boundary
///   crossings has settled
/// - draining [`ObserverCommand`]s with `take_commands` after each render pass
/// - reading classified rows with `for_each_row`
///
/// Every entry point takes `&mut self`, so boundary crossings are already serialized by the
/// borrow and never report [`IgnoreReason::Busy`]; the scroll gate's in-progress flag only
/// matters to hosts driving the core crate directly. `Busy` is reported for a load that overlaps
/// one started with `begin_load`.
///
/// Load-on-demand signals re-render immediately: an `Applied` outcome from
/// `on_scroll_near_end` or `on_target_row_requested` means new rows are available.
///
/// With load-on-demand off, every row is read from the source once at construction and rows
/// outside the current range are classified as skeletons. With it on, nothing is loaded until
/// the first `on_scroll_near_end`.
pub struct GridController<S: DataSource> {
    options: VirtualisationOptions,
    state: VirtualisationState,
    gate: ScrollGate,
    loader: IncrementalLoader<S::Key>,
    source: S,
    outbox: VecDeque<ObserverCommand>,
    refresh_count: u64,
    disposed: bool,
}

impl<S: DataSource> GridController<S> {
    pub fn new(options: VirtualisationOptions, source: S) -> Self {
        let state = VirtualisationState::new(&options, source.total_row_count());
        alog!(
            debug,
            grid_id = %options.grid_id,
            total = state.total_count,
            page_size = options.page_size,
            overflow = options.overflow,
            load_on_demand = options.is_load_on_demand,
            "GridController::new"
        );
        let mut c = Self {
            gate: ScrollGate::new(options.refresh_delay_ms),
            loader: IncrementalLoader::new(&options),
            state,
            options,
            source,
            outbox: VecDeque::new(),
            refresh_count: 0,
            disposed: false,
        };
        c.materialize();
        c.queue_observe();
        c
    }

    fn materialize(&mut self) {
        if !self.options.is_load_on_demand {
            self.loader.replace_all(self.source.all_rows());
        }
        self.sync_loaded_count();
    }

    fn sync_loaded_count(&mut self) {
        self.state.loaded_count = self.loader.loaded_count().min(self.state.total_count);
        debug_assert!(self.state.is_consistent(), "{:?}", self.state);
    }

    pub fn options(&self) -> &VirtualisationOptions {
        &self.options
    }

    pub fn state(&self) -> VirtualisationState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn rows(&self) -> &[Row<S::Key>] {
        self.loader.rows()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Number of debounced refreshes that fired so far.
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.gate.debouncer().is_pending()
    }

    /// Whether the renderer should place the scroll sentinel after the last loaded row.
    pub fn needs_scroll_sentinel(&self) -> bool {
        !self.disposed && self.options.is_load_on_demand && !self.state.is_fully_loaded()
    }

    /// Routes an observer signal to the matching entry point.
    pub fn handle(&mut self, event: &SentinelEvent, now_ms: u64) -> SignalOutcome {
        match event {
            SentinelEvent::ScrollNearEnd => self.on_scroll_near_end(),
            SentinelEvent::UpperBoundaryCrossed { raw } => {
                self.on_upper_boundary_crossed(raw, now_ms)
            }
            SentinelEvent::LowerBoundaryCrossed { raw } => {
                self.on_lower_boundary_crossed(raw, now_ms)
            }
            SentinelEvent::TargetRowRequested { index } => self.on_target_row_requested(*index),
        }
    }

    /// The *above* sentinel at `raw` entered the viewport.
    pub fn on_upper_boundary_crossed(&mut self, raw: &str, now_ms: u64) -> SignalOutcome {
        self.on_boundary_crossed(Boundary::Upper, raw, now_ms)
    }

    /// The *below* sentinel at `raw` entered the viewport.
    pub fn on_lower_boundary_crossed(&mut self, raw: &str, now_ms: u64) -> SignalOutcome {
        self.on_boundary_crossed(Boundary::Lower, raw, now_ms)
    }

    fn on_boundary_crossed(&mut self, boundary: Boundary, raw: &str, now_ms: u64) -> SignalOutcome {
        if self.disposed {
            return SignalOutcome::Ignored(IgnoreReason::Disposed);
        }
        if self.options.is_load_on_demand {
            return SignalOutcome::Ignored(IgnoreReason::WrongMode);
        }
        let index = match parse_row_index(raw) {
            Ok(index) => index,
            Err(_err) => {
                alog!(trace, ?boundary, error = %_err, "dropping malformed boundary signal");
                return SignalOutcome::Ignored(IgnoreReason::Malformed);
            }
        };

        let state = &self.state;
        let options = &self.options;
        let run = self
            .gate
            .run(now_ms, || boundary_crossed(state, options, boundary, index));

        match run {
            // The gate is private and `&mut self` is held, so nothing else can be inside it.
            None => SignalOutcome::Ignored(IgnoreReason::Busy),
            Some(GateRun::Unchanged) => {
                alog!(
                    trace,
                    ?boundary,
                    index,
                    range_start = self.state.range_start,
                    range_end = self.state.range_end,
                    "dropping stale boundary signal"
                );
                SignalOutcome::Ignored(IgnoreReason::Stale)
            }
            Some(GateRun::Changed { value, ticket: _ticket }) => {
                alog!(
                    trace,
                    ?boundary,
                    index,
                    range_start = value.range_start,
                    range_end = value.range_end,
                    ticket = _ticket.0,
                    "range updated"
                );
                self.state = value;
                SignalOutcome::Applied
            }
        }
    }

    /// The scroll sentinel entered the viewport: load the next page.
    pub fn on_scroll_near_end(&mut self) -> SignalOutcome {
        let request = match self.begin_load() {
            Ok(request) => request,
            Err(reason) => return SignalOutcome::Ignored(reason),
        };
        let rows = self.source.rows(request.start, request.count);
        self.complete_load(request, rows)
    }

    /// Materializes rows up to and including `index`.
    pub fn on_target_row_requested(&mut self, index: usize) -> SignalOutcome {
        if let Err(reason) = self.check_loadable() {
            return SignalOutcome::Ignored(reason);
        }
        let Some(request) = self.loader.begin_target_row(index, self.state.total_count) else {
            return SignalOutcome::Ignored(if index < self.loader.loaded_count() {
                IgnoreReason::Stale
            } else {
                IgnoreReason::Exhausted
            });
        };
        let rows = self.source.rows(request.start, request.count);
        self.complete_load(request, rows)
    }

    fn check_loadable(&self) -> Result<(), IgnoreReason> {
        if self.disposed {
            return Err(IgnoreReason::Disposed);
        }
        if !self.options.is_load_on_demand {
            return Err(IgnoreReason::WrongMode);
        }
        if self.loader.is_loading() {
            return Err(IgnoreReason::Busy);
        }
        Ok(())
    }

    /// Starts loading the next page without fetching it.
    ///
    /// For hosts whose data source is asynchronous: run the returned request, then hand the rows
    /// to [`GridController::complete_load`] (or call [`GridController::abort_load`] on failure).
    pub fn begin_load(&mut self) -> Result<PageRequest, IgnoreReason> {
        self.check_loadable()?;
        self.loader
            .begin_next_page(self.state.total_count)
            .ok_or(IgnoreReason::Exhausted)
    }

    pub fn complete_load(&mut self, request: PageRequest, rows: Vec<Row<S::Key>>) -> SignalOutcome {
        if self.disposed {
            self.loader.abort(request);
            return SignalOutcome::Ignored(IgnoreReason::Disposed);
        }
        if self.loader.in_flight() != Some(request) {
            return SignalOutcome::Ignored(IgnoreReason::Stale);
        }
        let _appended = self.loader.complete(request, rows);
        self.sync_loaded_count();
        alog!(
            trace,
            appended = _appended,
            loaded = self.state.loaded_count,
            total = self.state.total_count,
            "rows loaded"
        );
        self.queue_observe();
        SignalOutcome::Applied
    }

    /// Gives up on an in-flight load. The loaded rows are unchanged.
    pub fn abort_load(&mut self, request: PageRequest) -> bool {
        self.loader.abort(request)
    }

    /// Fires the debounced refresh once it is due.
    ///
    /// A fired refresh re-issues the observer registration, since the re-render moves sentinels.
    pub fn tick(&mut self, now_ms: u64) -> Option<Refresh> {
        if self.disposed {
            return None;
        }
        let ticket = self.gate.poll_refresh(now_ms)?;
        self.refresh_count = self.refresh_count.saturating_add(1);
        alog!(
            debug,
            ticket = ticket.0,
            range_start = self.state.range_start,
            range_end = self.state.range_end,
            "refresh"
        );
        self.queue_observe();
        Some(Refresh {
            ticket,
            state: self.state,
        })
    }

    /// Re-reads the source after its contents changed.
    ///
    /// The range goes back to its initial window, loaded rows are dropped (and re-materialized
    /// when load-on-demand is off), and any pending refresh is cancelled.
    pub fn reload(&mut self) {
        if self.disposed {
            return;
        }
        self.gate.cancel_refresh();
        self.loader.clear();
        self.state = VirtualisationState::new(&self.options, self.source.total_row_count());
        alog!(debug, total = self.state.total_count, "GridController::reload");
        self.materialize();
        self.queue_observe();
    }

    /// Tears the grid down: cancels the pending refresh and detaches from the observer layer.
    ///
    /// Idempotent. Returns `true` on the first call only.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.gate.cancel_refresh();
        if let Some(request) = self.loader.in_flight() {
            self.loader.abort(request);
        }
        // A registration that was never delivered need not be undone.
        self.outbox
            .retain(|cmd| !matches!(cmd, ObserverCommand::Observe(_)));
        self.outbox.push_back(ObserverCommand::Dispose {
            container_id: self.options.grid_id.clone(),
        });
        alog!(debug, grid_id = %self.options.grid_id, "GridController::dispose");
        true
    }

    pub fn observe_request(&self) -> ObserveRequest {
        ObserveRequest {
            container_id: self.options.grid_id.clone(),
            scroll_sentinel_class: self.options.scroll_sentinel_id.clone(),
            below_sentinel_class: self.options.below_sentinel_id.clone(),
            above_sentinel_class: self.options.above_sentinel_id.clone(),
            is_load_on_demand: self.options.is_load_on_demand,
        }
    }

    fn queue_observe(&mut self) {
        // Registration is idempotent; one pending copy is enough.
        if matches!(self.outbox.back(), Some(ObserverCommand::Observe(_))) {
            return;
        }
        self.outbox
            .push_back(ObserverCommand::Observe(self.observe_request()));
    }

    /// Takes every queued observer command, oldest first.
    pub fn take_commands(&mut self) -> Vec<ObserverCommand> {
        self.outbox.drain(..).collect()
    }

    pub fn pending_commands(&self) -> impl Iterator<Item = &ObserverCommand> + '_ {
        self.outbox.iter()
    }

    pub fn classify(&self, index: usize) -> RowClass {
        classify_row(&self.state, &self.options, index)
    }

    /// Iterates over the loaded rows with their classification, without allocations.
    pub fn for_each_row(&self, mut f: impl FnMut(&Row<S::Key>, RowClass)) {
        for row in self.loader.rows() {
            f(row, self.classify(row.index));
        }
    }

    pub fn row_classes(&self) -> Vec<RowClass> {
        let mut out = Vec::with_capacity(self.loader.loaded_count());
        self.for_each_row(|_, class| out.push(class));
        out
    }

    /// Rows that currently carry an above or below sentinel, ascending.
    pub fn for_each_sentinel_row(&self, f: impl FnMut(RowClass)) {
        for_each_sentinel_row(
            &self.state,
            &self.options,
            self.loader.loaded_count(),
            f,
        );
    }

    pub fn sentinel_rows(&self) -> Vec<RowClass> {
        let mut out = Vec::new();
        self.for_each_sentinel_row(|class| out.push(class));
        out
    }
}

impl<S: DataSource> fmt::Debug for GridController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridController")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("is_loading", &self.loader.is_loading())
            .field("pending_refresh", &self.gate.debouncer().pending_ticket())
            .field("pending_commands", &self.outbox.len())
            .field("refresh_count", &self.refresh_count)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
