//! microevent - tiny synchronous event emitter
//!
//! Any type can be granted the ability to register named-event handlers,
//! remove them and call them synchronously with arguments:
//!
//! - embed an [`Emitter`] and `#[derive(Emittable)]` to grant it to a type,
//! - call [`grant`] to grant it to a single value,
//! - or use [`MicroEvent`] as a standalone emitter.
//!
//! Emission works on a snapshot of the handler list, so handlers may
//! subscribe or unsubscribe (themselves included) while it is in progress.
//!
//! ```rust
//! use microevent::{Args, Emittable, Emitter, Handler, args};
//!
//! #[derive(Default, Emittable)]
//! struct Player {
//!     name: String,
//!     #[emitter]
//!     events: Emitter<Player>,
//! }
//!
//! let player = Player { name: "ann".into(), ..Default::default() };
//! let hello = Handler::new(|p: &Player, args: &Args| {
//!     println!("{} scored {:?}", p.name, args);
//!     Ok(())
//! });
//! player.on("score", hello.clone());
//! player.trigger("score", args![10])?;
//! player.off("score", &hello);
//! # Ok::<(), microevent::Error>(())
//! ```

mod config;
mod emittable;
mod emitter;
mod emitter_id;
mod error;
mod granted;
mod handler;
mod label;
mod micro_event;
mod topic;
mod value;

#[cfg(any(test, feature = "test-harness"))]
pub mod testing;

pub use config::{Config, FailurePolicy};
pub use emittable::Emittable;
pub use emitter::Emitter;
pub use emitter_id::EmitterId;
pub use error::Error;
pub use granted::{Granted, grant, grant_with_config};
pub use handler::Handler;
pub use label::Label;
pub use micro_event::MicroEvent;
pub use topic::{EventName, Topic};
pub use value::{Args, Value};

#[cfg(feature = "macros")]
pub use microevent_macros::{Emittable, Label};

pub type Result<T = ()> = std::result::Result<T, Error>;
