use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use log::error;

use crate::context::Context;
use crate::http::StatusCode;

/// Turn a panic anywhere later in the chain into a plaintext 500.
///
/// The chain is aborted so nothing else runs for the request.
pub fn recovery() -> impl Fn(&mut Context) + Send + Sync + 'static {
    |c: &mut Context| {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| c.next())) {
            error!(
                "panic while serving {} {}: {}",
                c.method(),
                c.path(),
                panic_message(payload.as_ref())
            );
            c.abort();
            c.string(StatusCode::InternalServerError, "Internal Server Error");
        }
    }
}

fn panic_message<'a>(payload: &'a (dyn Any + Send + 'static)) -> &'a str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
