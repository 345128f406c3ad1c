use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Args, Config, EmitterId, Error, EventName, FailurePolicy, Handler, Result, Topic};

type Registry<H, A, T> = HashMap<T, Vec<Handler<H, A>>>;

/// Per-instance handler registry.
///
/// An `Emitter` is meant to be embedded in a host type `H` and is usually
/// reached through [`Emittable`](crate::Emittable), which supplies the host
/// as the receiver. It can also be driven directly: every method takes
/// `&self`, so handlers may subscribe and unsubscribe while an emission is
/// in progress.
///
/// # Snapshot semantics
///
/// [`emit`](Self::emit) copies the handler list of the topic before calling
/// anything. Subscriptions and removals made by handlers during the pass
/// only affect later emissions.
///
/// # Threads
///
/// The registry sits behind a per-instance mutex, so an emitter can be
/// shared between threads. The lock covers a single mutation or snapshot
/// copy and is never held while handlers run.
pub struct Emitter<H, A = Args, T = EventName> {
    id: EmitterId,
    config: Config,
    registry: Mutex<Registry<H, A, T>>,
}

impl<H, A, T: Topic> Emitter<H, A, T> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            id: EmitterId::new(),
            config,
            registry: Mutex::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn id(&self) -> EmitterId {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends `handler` to the topic's list. Subscribing the same handler
    /// twice registers it twice.
    pub fn subscribe(&self, topic: T, handler: Handler<H, A>) {
        tracing::trace!(
            emitter = %self.id,
            label = self.label(),
            topic = %topic.label(),
            "subscribing handler"
        );
        self.registry().entry(topic).or_default().push(handler);
    }

    /// Removes the first registration of `handler` for `topic`.
    /// Unknown topics and handlers are ignored.
    pub fn unsubscribe(&self, topic: &T, handler: &Handler<H, A>) {
        let removed = {
            let mut registry = self.registry();
            let Some(handlers) = registry.get_mut(topic) else {
                drop(registry);
                tracing::debug!(
                    emitter = %self.id,
                    label = self.label(),
                    topic = %topic.label(),
                    "no handlers to remove"
                );
                return;
            };
            let removed = handlers
                .iter()
                .position(|h| h.ptr_eq(handler))
                .map(|pos| (handlers.remove(pos), handlers.len()));
            if handlers.is_empty() {
                registry.remove(topic);
            }
            removed
        };

        match removed {
            Some((_, remaining)) => tracing::trace!(
                emitter = %self.id,
                label = self.label(),
                topic = %topic.label(),
                handlers = remaining,
                "handler unsubscribed"
            ),
            None => tracing::debug!(
                emitter = %self.id,
                label = self.label(),
                topic = %topic.label(),
                "handler not subscribed"
            ),
        }
    }

    /// Calls every handler subscribed to `topic`, in subscription order,
    /// with `host` as the receiver.
    ///
    /// Under [`FailurePolicy::Abort`] the first error ends the pass and is
    /// returned as is. Under [`FailurePolicy::Isolate`] all handlers run and
    /// their errors come back together as [`Error::Isolated`].
    pub fn emit(&self, host: &H, topic: &T, args: &A) -> Result {
        let snapshot = self.snapshot(topic);
        if snapshot.is_empty() {
            return Ok(());
        }
        tracing::trace!(
            emitter = %self.id,
            label = self.label(),
            topic = %topic.label(),
            handlers = snapshot.len(),
            "emitting"
        );

        match self.config.failure_policy {
            FailurePolicy::Abort => {
                for handler in &snapshot {
                    if let Err(err) = handler.call(host, args) {
                        tracing::warn!(
                            emitter = %self.id,
                            label = self.label(),
                            topic = %topic.label(),
                            error = %err,
                            "handler failed, aborting emission"
                        );
                        return Err(err);
                    }
                }
                Ok(())
            }
            FailurePolicy::Isolate => {
                let errors: Vec<Error> = snapshot
                    .iter()
                    .filter_map(|handler| handler.call(host, args).err())
                    .collect();
                if errors.is_empty() {
                    return Ok(());
                }
                tracing::warn!(
                    emitter = %self.id,
                    label = self.label(),
                    topic = %topic.label(),
                    failed = errors.len(),
                    "handlers failed"
                );
                Err(Error::Isolated {
                    topic: Arc::from(topic.label()),
                    errors,
                })
            }
        }
    }

    pub fn listener_count(&self, topic: &T) -> usize {
        self.registry().get(topic).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, topic: &T) -> bool {
        self.listener_count(topic) > 0
    }

    /// Topics that currently have at least one handler, in no particular order.
    pub fn topics(&self) -> Vec<T> {
        self.registry().keys().cloned().collect()
    }

    /// Removes every handler of `topic`.
    ///
    /// Removed handlers are dropped after the registry is unlocked, so code
    /// run by their captures may use this emitter again.
    pub fn clear(&self, topic: &T) {
        let removed = self.registry().remove(topic);
        if let Some(removed) = removed {
            tracing::trace!(
                emitter = %self.id,
                label = self.label(),
                topic = %topic.label(),
                removed = removed.len(),
                "topic cleared"
            );
        }
    }

    pub fn clear_all(&self) {
        let all = std::mem::take(&mut *self.registry());
        tracing::trace!(
            emitter = %self.id,
            label = self.label(),
            topics = all.len(),
            "all topics cleared"
        );
        drop(all);
    }

    fn snapshot(&self, topic: &T) -> Vec<Handler<H, A>> {
        self.registry().get(topic).cloned().unwrap_or_default()
    }

    // No user code runs under the lock, handlers and their drops included,
    // so a poisoned registry is still consistent.
    fn registry(&self) -> MutexGuard<'_, Registry<H, A, T>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn label(&self) -> &str {
        self.config.label.as_deref().unwrap_or_default()
    }
}

impl<H, A, T: Topic> Default for Emitter<H, A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, A, T: Topic> fmt::Debug for Emitter<H, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("topics", &self.registry().len())
            .finish()
    }
}
