#[cfg(feature = "tracing")]
macro_rules! wtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "windowing", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! wdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "windowing", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! wwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "windowing", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wwarn {
    ($($tt:tt)*) => {};
}
