//! Sliding-window submission throttling.
//!
//! [`Throttle`] counts admissions for one key over a trailing window;
//! [`ThrottleMap`] keeps one throttle per key and evicts idle keys in the
//! background; [`SubmissionGate`] applies it to user-in-tenant submissions.
mod window;
pub use window::Throttle;

mod map;
pub use map::ThrottleMap;

mod gate;
pub use gate::{SubmissionGate, throttle_key};
