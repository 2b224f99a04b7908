// Same shape as the core crate's `glog!`, under the `sentinel_grid_adapter` target.

#[cfg(feature = "tracing")]
macro_rules! alog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "sentinel_grid_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! alog {
    ($level:ident, $($tt:tt)*) => {};
}
