use alloc::sync::Arc;
use alloc::vec::Vec;

use sentinel_grid::{DataSource, Row, RowKey};

/// An in-memory [`DataSource`] over a shared, index-ordered row list.
///
/// Cloning is cheap: the rows live behind an `Arc`.
#[derive(Clone, Debug)]
pub struct VecDataSource<K = RowKey> {
    rows: Arc<Vec<Row<K>>>,
}

impl<K: Clone> VecDataSource<K> {
    /// Wraps `rows`. Each row's `index` must equal its position.
    pub fn new(rows: Vec<Row<K>>) -> Self {
        debug_assert!(
            rows.iter().enumerate().all(|(i, r)| r.index == i),
            "VecDataSource: rows must be ordered by index without gaps"
        );
        Self {
            rows: Arc::new(rows),
        }
    }

    pub fn from_arc(rows: Arc<Vec<Row<K>>>) -> Self {
        Self { rows }
    }

    /// Builds `count` rows with `f(index)`.
    pub fn from_fn(count: usize, f: impl FnMut(usize) -> Row<K>) -> Self {
        Self::new((0..count).map(f).collect())
    }

    pub fn all(&self) -> &[Row<K>] {
        &self.rows
    }
}

impl<K: Clone> DataSource for VecDataSource<K> {
    type Key = K;

    fn total_row_count(&self) -> usize {
        self.rows.len()
    }

    fn rows(&self, start_index: usize, count: usize) -> Vec<Row<K>> {
        let start = start_index.min(self.rows.len());
        let end = start_index.saturating_add(count).min(self.rows.len());
        self.rows[start..end].to_vec()
    }

    fn all_rows(&self) -> Vec<Row<K>> {
        self.rows.to_vec()
    }
}
