#[cfg(feature = "tracing")]
macro_rules! wtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "windowing_view", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! wwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "windowing_view", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wwarn {
    ($($tt:tt)*) => {};
}
