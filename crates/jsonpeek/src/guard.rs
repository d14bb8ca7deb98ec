//! Panic capture at public entry points.
//!
//! Each entry point that can fail wraps its body in [`capture`], so a bug in
//! the core (or a panicking callback supplied to the binder) surfaces as
//! [`Error::Internal`] instead of unwinding into the caller. Nothing is
//! installed process-wide.

use alloc::{
    borrow::ToOwned,
    format,
    string::{String, ToString},
};
use std::panic::{self, AssertUnwindSafe, Location};

use log::error;

use crate::{Error, Result};

#[track_caller]
pub(crate) fn capture<T>(entry: &'static str, body: impl FnOnce() -> Result<T>) -> Result<T> {
    let location = Location::caller();
    panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        let location = format!("{}:{}:{}", location.file(), location.line(), location.column());
        error!("panic in `{entry}` called at {location}: {message}");
        Err(Error::Internal {
            entry,
            location,
            message,
        })
    })
}
