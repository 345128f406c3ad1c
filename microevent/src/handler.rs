use std::{fmt, sync::Arc};

use crate::Result;

type HandlerFn<H, A> = dyn Fn(&H, &A) -> Result + Send + Sync;

/// A callable registered against a topic.
///
/// Handlers receive the emitting host (so they can reach its state, or call
/// [`on`](crate::Emittable::on) / [`off`](crate::Emittable::off) on it) and
/// a shared reference to the emitted arguments.
///
/// Equality is identity: clones of one handler are equal to each other, while
/// two handlers built from identical closures are not. Keep a clone around to
/// unsubscribe later.
///
/// # Example
///
/// ```rust
/// use microevent::{Args, Handler, MicroEvent};
///
/// let log: Handler<MicroEvent, Args> = Handler::new(|_, args: &Args| {
///     println!("got {} argument(s)", args.len());
///     Ok(())
/// });
/// let same = log.clone();
/// let twin: Handler<MicroEvent, Args> = Handler::new(|_, _| Ok(()));
///
/// assert_eq!(log, same);
/// assert_ne!(log, twin);
/// ```
pub struct Handler<H, A>(Arc<HandlerFn<H, A>>);

impl<H, A> Handler<H, A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&H, &A) -> Result + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, host: &H, args: &A) -> Result {
        (self.0)(host, args)
    }

    /// Identity comparison. Only the data pointer is compared, so the same
    /// closure seen through different vtables still matches.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl<H, A> Clone for Handler<H, A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<H, A> PartialEq for Handler<H, A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<H, A> Eq for Handler<H, A> {}

impl<H, A> fmt::Debug for Handler<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
