use alloc::string::String;
use alloc::vec::Vec;

/// Default identity type for rows.
pub type RowKey = u64;

/// A column descriptor. Only used to size skeleton placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// CSS-like width string (e.g. `"120px"`, `"20%"`), passed through verbatim.
    pub width: String,
    pub column_index: usize,
}

impl Column {
    pub fn new(column_index: usize, width: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            column_index,
        }
    }
}

/// A row as delivered by a [`crate::DataSource`].
///
/// Order is defined solely by `index`. `identity` is stable across reloads and is what the
/// renderer keys its pre-built fragments on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row<K = RowKey> {
    pub index: usize,
    pub identity: K,
    pub type_name: String,
    pub hidden: bool,
    pub columns: Vec<Column>,
}

impl<K> Row<K> {
    pub fn new(index: usize, identity: K) -> Self {
        Self {
            index,
            identity,
            type_name: String::new(),
            hidden: false,
            columns: Vec::new(),
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    Full,
    Skeleton,
}

/// Why a signal did not change anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    /// The payload did not parse to a non-negative row index.
    Malformed,
    /// The signal refers to work that is already done, e.g. a crossing the range has already
    /// moved past or a row that is already loaded.
    Stale,
    /// Another update (or load) was in flight. Only reachable when the same gate or loader is
    /// entered again before the first call returns.
    Busy,
    /// Everything is already loaded, or the requested row is out of bounds.
    Exhausted,
    /// The grid has been disposed.
    Disposed,
    /// The signal does not apply to the configured mode.
    WrongMode,
}

/// Result of feeding a signal into the engine.
///
/// None of the ignored cases are errors; they are reported so hosts and tests can tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl SignalOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
