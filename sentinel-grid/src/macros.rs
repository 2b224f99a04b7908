// `glog!(level, fields..., "message")` forwards to `tracing::<level>!` under the
// `sentinel_grid` target, and compiles to nothing without the `tracing` feature.

#[cfg(feature = "tracing")]
macro_rules! glog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "sentinel_grid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! glog {
    ($level:ident, $($tt:tt)*) => {};
}
