use tracing::warn;

use crate::throttle::ThrottleMap;

/// Canonical throttle key for a user within a tenant.
pub fn throttle_key(tenant: &str, user: &str) -> String {
    format!("{user}@{tenant}")
}

/// Admission gate for job submissions, one sliding window per user-in-tenant.
pub struct SubmissionGate {
    throttles: ThrottleMap,
}

impl SubmissionGate {
    pub fn new(throttles: ThrottleMap) -> Self {
        Self { throttles }
    }

    /// Returns `true` if `user` in `tenant` may submit another job now.
    pub fn admit(&self, tenant: &str, user: &str) -> bool {
        let key = throttle_key(tenant, user);
        let admitted = self.throttles.record(&key);
        if !admitted {
            warn!(key = %key, "submission rejected by throttle");
        }
        admitted
    }

    pub fn throttles(&self) -> &ThrottleMap {
        &self.throttles
    }
}
