use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{Args, Config, Emittable, Emitter, EventName, Topic};

/// A single value that has been granted the emitter capability.
///
/// Created by [`grant`]. The wrapped value keeps its own API through
/// `Deref`/`DerefMut`; only this instance gains `on` / `off` / `trigger`,
/// other values of the same type are unaffected.
pub struct Granted<V, A = Args, T = EventName> {
    value: V,
    emitter: Emitter<Granted<V, A, T>, A, T>,
}

/// Grants the emitter capability to one value.
///
/// ```rust
/// use microevent::{Emittable, Granted, Handler, args, grant};
///
/// struct Settings {
///     theme: &'static str,
/// }
///
/// let settings = grant(Settings { theme: "dark" });
/// settings.on("changed", Handler::new(|s: &Granted<Settings>, _| {
///     println!("theme is {}", s.theme);
///     Ok(())
/// }));
/// settings.trigger("changed", args![]).unwrap();
/// assert_eq!(settings.theme, "dark");
/// ```
pub fn grant<V>(value: V) -> Granted<V> {
    Granted::new(value)
}

/// Like [`grant`], with a custom emitter [`Config`].
pub fn grant_with_config<V>(value: V, config: Config) -> Granted<V> {
    Granted::with_config(value, config)
}

impl<V, A, T: Topic> Granted<V, A, T> {
    pub fn new(value: V) -> Self {
        Self::with_config(value, Config::default())
    }

    pub fn with_config(value: V, config: Config) -> Self {
        Self {
            value,
            emitter: Emitter::with_config(config),
        }
    }

    /// Takes the value back, dropping every handler registered on it.
    pub fn into_inner(self) -> V {
        self.value
    }
}

impl<V, A, T: Topic> Emittable for Granted<V, A, T> {
    type Args = A;
    type Topic = T;

    fn emitter(&self) -> &Emitter<Self, A, T> {
        &self.emitter
    }
}

impl<V, A, T> Deref for Granted<V, A, T> {
    type Target = V;
    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V, A, T> DerefMut for Granted<V, A, T> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<V: fmt::Debug, A, T: Topic> fmt::Debug for Granted<V, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Granted")
            .field("value", &self.value)
            .field("emitter", &self.emitter)
            .finish()
    }
}
