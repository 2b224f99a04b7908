use alloc::vec::Vec;

use crate::{Row, RowKey, VirtualisationOptions};

/// A read-only source of rows.
///
/// The engine never mutates the source. `rows(start, count)` must return rows in index order and
/// may return fewer than `count` rows near the end.
pub trait DataSource {
    type Key;

    fn total_row_count(&self) -> usize;

    fn rows(&self, start_index: usize, count: usize) -> Vec<Row<Self::Key>>;

    /// Materializes every row. Used once at startup when load-on-demand is off.
    fn all_rows(&self) -> Vec<Row<Self::Key>> {
        self.rows(0, self.total_row_count())
    }
}

impl<S: DataSource + ?Sized> DataSource for &S {
    type Key = S::Key;

    fn total_row_count(&self) -> usize {
        (**self).total_row_count()
    }

    fn rows(&self, start_index: usize, count: usize) -> Vec<Row<Self::Key>> {
        (**self).rows(start_index, count)
    }

    fn all_rows(&self) -> Vec<Row<Self::Key>> {
        (**self).all_rows()
    }
}

/// A fetch the loader wants performed: `count` rows starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    pub start: usize,
    pub count: usize,
}

impl PageRequest {
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.count)
    }
}

/// Pulls successive slices of a [`DataSource`] into a locally held, contiguous prefix.
///
/// The collection always holds rows `[0, loaded_count)` in source order. Loading is split in two
/// steps so asynchronous hosts can run the fetch themselves:
///
/// 1. `begin_*` computes a [`PageRequest`] and marks a load in progress (or returns `None`).
/// 2. `complete` appends the fetched rows, or `abort` gives up; either ends the load.
///
/// While a load is in progress every `begin_*` call returns `None`.
#[derive(Clone, Debug)]
pub struct IncrementalLoader<K = RowKey> {
    page_size: usize,
    overflow: usize,
    rows: Vec<Row<K>>,
    in_flight: Option<PageRequest>,
}

impl<K> IncrementalLoader<K> {
    pub fn new(options: &VirtualisationOptions) -> Self {
        Self {
            page_size: options.page_size.max(1),
            overflow: options.overflow,
            rows: Vec::new(),
            in_flight: None,
        }
    }

    pub fn rows(&self) -> &[Row<K>] {
        &self.rows
    }

    pub fn loaded_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    /// Drops every loaded row and any in-flight request.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.in_flight = None;
    }

    /// Replaces the collection with a fully materialized one.
    pub fn replace_all(&mut self, rows: Vec<Row<K>>) {
        self.rows = rows;
        self.in_flight = None;
    }

    /// Starts loading the next page.
    ///
    /// The request covers `loaded + page_size` rows (plus `overflow` for the very first batch)
    /// starting at `loaded`, clamped so it never reaches past `total_count`.
    pub fn begin_next_page(&mut self, total_count: usize) -> Option<PageRequest> {
        if self.is_loading() {
            glog!(debug, "IncrementalLoader: load in progress, ignoring next page");
            return None;
        }
        let loaded = self.loaded_count();
        if loaded >= total_count {
            glog!(trace, loaded, total_count, "IncrementalLoader: fully loaded");
            return None;
        }

        let mut limit = loaded.saturating_add(self.page_size);
        if loaded == 0 {
            limit = limit.saturating_add(self.overflow);
        }
        let count = limit.min(total_count - loaded);
        Some(self.start(PageRequest {
            start: loaded,
            count,
        }))
    }

    /// Starts loading up to and including `target`.
    ///
    /// With `target == loaded_count` this requests exactly one row. A target beyond the loaded
    /// prefix requests the gap as well, so the collection stays contiguous. Targets that are
    /// already loaded, or past `total_count`, are ignored.
    pub fn begin_target_row(&mut self, target: usize, total_count: usize) -> Option<PageRequest> {
        if self.is_loading() {
            glog!(debug, target, "IncrementalLoader: load in progress, ignoring target row");
            return None;
        }
        if target >= total_count {
            glog!(trace, target, total_count, "IncrementalLoader: target out of bounds");
            return None;
        }
        let loaded = self.loaded_count();
        if target < loaded {
            return None;
        }
        Some(self.start(PageRequest {
            start: loaded,
            count: target - loaded + 1,
        }))
    }

    fn start(&mut self, request: PageRequest) -> PageRequest {
        glog!(
            trace,
            start = request.start,
            count = request.count,
            "IncrementalLoader: begin"
        );
        self.in_flight = Some(request);
        request
    }

    /// Appends the rows fetched for `request` and ends the load.
    ///
    /// Rows beyond `request.count` are discarded, and so is everything from the first row whose
    /// `index` is not its position in the collection. A request that is not the one in flight is
    /// ignored. Returns the number of rows appended.
    pub fn complete(&mut self, request: PageRequest, rows: Vec<Row<K>>) -> usize {
        if self.in_flight != Some(request) {
            glog!(
                warn,
                start = request.start,
                count = request.count,
                "IncrementalLoader: completion for a request that is not in flight"
            );
            return 0;
        }
        self.in_flight = None;

        let before = self.rows.len();
        for row in rows.into_iter().take(request.count) {
            if row.index != self.rows.len() {
                glog!(
                    warn,
                    expected = self.rows.len(),
                    got = row.index,
                    "IncrementalLoader: row out of order, dropping the rest of the page"
                );
                break;
            }
            self.rows.push(row);
        }
        let appended = self.rows.len() - before;
        if appended < request.count {
            glog!(
                debug,
                requested = request.count,
                appended,
                "IncrementalLoader: source returned a short page"
            );
        }
        appended
    }

    /// Ends the in-flight load without touching the collection.
    pub fn abort(&mut self, request: PageRequest) -> bool {
        if self.in_flight != Some(request) {
            return false;
        }
        glog!(debug, start = request.start, "IncrementalLoader::abort");
        self.in_flight = None;
        true
    }

    /// Synchronously loads the next page from `source`. Returns the number of rows appended.
    pub fn load_next_page<S>(&mut self, source: &S) -> usize
    where
        S: DataSource<Key = K> + ?Sized,
    {
        let Some(request) = self.begin_next_page(source.total_row_count()) else {
            return 0;
        };
        let rows = source.rows(request.start, request.count);
        self.complete(request, rows)
    }

    /// Synchronously loads rows up to and including `target`. Returns the number appended.
    pub fn load_target_row<S>(&mut self, source: &S, target: usize) -> usize
    where
        S: DataSource<Key = K> + ?Sized,
    {
        let Some(request) = self.begin_target_row(target, source.total_row_count()) else {
            return 0;
        };
        let rows = source.rows(request.start, request.count);
        self.complete(request, rows)
    }
}
