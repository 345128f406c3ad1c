use crate::{Emitter, Handler, Result};

/// The emitter capability.
///
/// A host gains `on` / `off` / `trigger` by embedding an [`Emitter`] and
/// pointing [`emitter`](Self::emitter) at it. The three operations are
/// provided methods, so every host shares the same implementation; there
/// is no base type to inherit from.
///
/// Grant the capability to a type with `#[derive(Emittable)]` (or by
/// implementing this trait by hand), and to a single value with
/// [`grant`](crate::grant).
///
/// # Example
///
/// ```rust
/// use microevent::{Args, Emittable, Emitter, Handler, args};
///
/// #[derive(Default)]
/// struct Button {
///     caption: String,
///     events: Emitter<Button>,
/// }
///
/// impl Emittable for Button {
///     type Args = Args;
///     type Topic = microevent::EventName;
///
///     fn emitter(&self) -> &Emitter<Self> {
///         &self.events
///     }
/// }
///
/// let button = Button { caption: "OK".into(), ..Default::default() };
/// button.on("click", Handler::new(|button: &Button, args: &Args| {
///     println!("{} clicked {} time(s)", button.caption, args.len());
///     Ok(())
/// }));
/// button.trigger("click", args![1]).unwrap();
/// ```
pub trait Emittable: Sized {
    /// Payload handed to every handler.
    type Args;

    /// Event-name type.
    type Topic: crate::Topic;

    fn emitter(&self) -> &Emitter<Self, Self::Args, Self::Topic>;

    /// Subscribe `handler` to `topic`.
    fn on(&self, topic: impl Into<Self::Topic>, handler: Handler<Self, Self::Args>) {
        self.emitter().subscribe(topic.into(), handler);
    }

    /// Unsubscribe the first registration of `handler` from `topic`.
    /// Does nothing if it isn't subscribed.
    fn off(&self, topic: impl Into<Self::Topic>, handler: &Handler<Self, Self::Args>) {
        self.emitter().unsubscribe(&topic.into(), handler);
    }

    /// Synchronously call every handler of `topic` with `self` as the receiver.
    ///
    /// See [`Emitter::emit`] for ordering, snapshot and failure semantics.
    fn trigger(&self, topic: impl Into<Self::Topic>, args: Self::Args) -> Result {
        self.emitter().emit(self, &topic.into(), &args)
    }

    fn listener_count(&self, topic: impl Into<Self::Topic>) -> usize {
        self.emitter().listener_count(&topic.into())
    }

    fn has_listeners(&self, topic: impl Into<Self::Topic>) -> bool {
        self.emitter().has_listeners(&topic.into())
    }
}
