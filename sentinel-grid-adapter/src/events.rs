use alloc::string::String;

/// A signal from the viewport-observer layer.
///
/// Boundary crossings carry the raw identifier attached to the sentinel that fired; it is parsed
/// by the controller, and anything that is not a non-negative integer is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SentinelEvent {
    /// The scroll sentinel at the end of a load-on-demand grid entered the viewport.
    ScrollNearEnd,
    UpperBoundaryCrossed { raw: String },
    LowerBoundaryCrossed { raw: String },
    /// A specific row must be materialized, e.g. for a deep link.
    TargetRowRequested { index: usize },
}

impl SentinelEvent {
    pub fn upper(raw: impl Into<String>) -> Self {
        Self::UpperBoundaryCrossed { raw: raw.into() }
    }

    pub fn lower(raw: impl Into<String>) -> Self {
        Self::LowerBoundaryCrossed { raw: raw.into() }
    }
}

/// Registration payload for the observer layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserveRequest {
    pub container_id: String,
    pub scroll_sentinel_class: String,
    pub below_sentinel_class: String,
    pub above_sentinel_class: String,
    pub is_load_on_demand: bool,
}

/// A command for the viewport-observer layer.
///
/// The observer unobserves each sentinel after it fires once, so `Observe` is re-issued after
/// every render pass that may have moved sentinels. `Dispose` must be idempotent on the observer
/// side: disposing an unknown container is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObserverCommand {
    Observe(ObserveRequest),
    Dispose { container_id: String },
}

impl ObserverCommand {
    pub fn container_id(&self) -> &str {
        match self {
            Self::Observe(req) => &req.container_id,
            Self::Dispose { container_id } => container_id,
        }
    }
}
