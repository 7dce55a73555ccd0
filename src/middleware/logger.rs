use std::time::Instant;
use log::info;

use crate::context::Context;

/// Log method, path, final status and latency of every request.
pub fn logger() -> impl Fn(&mut Context) + Send + Sync + 'static {
    |c: &mut Context| {
        let started = Instant::now();
        c.next();
        info!(
            "[{status}] {method} {path} in {elapsed:?}",
            status = c.status_code().as_u16(),
            method = c.method(),
            path = c.path(),
            elapsed = started.elapsed(),
        );
    }
}
