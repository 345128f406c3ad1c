use std::sync::Arc;

/// What [`Emitter::emit`](crate::Emitter::emit) does when a handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing handler and return its error unchanged.
    /// Handlers after it in the snapshot are not called.
    #[default]
    Abort,

    /// Call every handler in the snapshot, then report all failures at once
    /// as [`Error::Isolated`](crate::Error::Isolated).
    /// Panics are not caught under either policy.
    Isolate,
}

/// Per-emitter configuration.
///
/// # Examples
///
/// ```rust
/// use microevent::{Config, FailurePolicy};
///
/// let config = Config::default()
///     .with_failure_policy(FailurePolicy::Isolate)   // run every handler
///     .with_label("settings");                       // shows up in logs
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How handler failures affect the rest of an emission pass.
    /// Default: [`FailurePolicy::Abort`]
    pub failure_policy: FailurePolicy,

    /// Human-readable name attached to this emitter's log records.
    /// Default: none
    pub label: Option<Arc<str>>,
}

impl Config {
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }
}
