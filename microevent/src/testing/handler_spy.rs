use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Handler, Result};

/// A recording handler.
///
/// Every successful invocation stores a clone of its arguments. An optional
/// effect runs first; when it fails the call is not recorded and the error
/// is returned to the emitter.
///
/// All clones of a spy share one record, and [`handler`](Self::handler)
/// always returns the same handler, so it can be used with `off`.
pub struct HandlerSpy<H, A> {
    calls: Arc<Mutex<Vec<A>>>,
    handler: Handler<H, A>,
}

impl<H, A> HandlerSpy<H, A>
where
    A: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::with_effect(|_, _| Ok(()))
    }

    pub fn with_effect<F>(effect: F) -> Self
    where
        F: Fn(&H, &A) -> Result + Send + Sync + 'static,
    {
        let calls: Arc<Mutex<Vec<A>>> = Arc::default();
        let recorded = calls.clone();
        let handler = Handler::new(move |host: &H, args: &A| {
            effect(host, args)?;
            lock(&recorded).push(args.clone());
            Ok(())
        });
        Self { calls, handler }
    }

    /// The handler to subscribe.
    pub fn handler(&self) -> Handler<H, A> {
        self.handler.clone()
    }

    /// Number of recorded calls.
    pub fn called(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn was_called(&self) -> bool {
        self.called() > 0
    }

    /// Arguments of every recorded call, oldest first.
    pub fn calls(&self) -> Vec<A> {
        lock(&self.calls).clone()
    }

    pub fn last_call(&self) -> Option<A> {
        lock(&self.calls).last().cloned()
    }

    pub fn reset(&self) {
        lock(&self.calls).clear();
    }
}

impl<H, A: Clone + Send + 'static> Default for HandlerSpy<H, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, A> Clone for HandlerSpy<H, A> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            handler: self.handler.clone(),
        }
    }
}

fn lock<A>(calls: &Mutex<Vec<A>>) -> MutexGuard<'_, Vec<A>> {
    calls.lock().unwrap_or_else(PoisonError::into_inner)
}
