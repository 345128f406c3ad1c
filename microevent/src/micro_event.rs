use std::fmt;

use crate::{Args, Config, Emittable, Emitter, EventName, Topic};

/// A standalone emitter: a host with no state besides its handlers.
///
/// Handlers receive the `MicroEvent` itself as the receiver.
///
/// ```rust
/// use microevent::{Args, Emittable, Handler, MicroEvent, args};
///
/// let events: MicroEvent = MicroEvent::new();
/// events.on("greet", Handler::new(|_, args: &Args| {
///     println!("hello {:?}", args);
///     Ok(())
/// }));
/// events.trigger("greet", args!["world"]).unwrap();
/// ```
pub struct MicroEvent<A = Args, T = EventName> {
    emitter: Emitter<MicroEvent<A, T>, A, T>,
}

impl<A, T: Topic> MicroEvent<A, T> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            emitter: Emitter::with_config(config),
        }
    }
}

impl<A, T: Topic> Emittable for MicroEvent<A, T> {
    type Args = A;
    type Topic = T;

    fn emitter(&self) -> &Emitter<Self, A, T> {
        &self.emitter
    }
}

impl<A, T: Topic> Default for MicroEvent<A, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T: Topic> fmt::Debug for MicroEvent<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicroEvent")
            .field("emitter", &self.emitter)
            .finish()
    }
}
