//! Network port: how long a simulated request takes and whether it fails.

use std::time::Duration;

/// Strategy deciding the latency and fate of each simulated request.
///
/// Both methods are consulted once per request, latency first.
pub trait NetworkConditions: Send + Sync {
    /// Delay to apply before the request resolves.
    fn latency(&self) -> Duration;

    /// Whether this request should fail with a transient error.
    fn should_fail(&self) -> bool;
}

impl<T: NetworkConditions> NetworkConditions for std::sync::Arc<T> {
    fn latency(&self) -> Duration {
        (**self).latency()
    }

    fn should_fail(&self) -> bool {
        (**self).should_fail()
    }
}
