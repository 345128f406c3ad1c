//! Test helpers for code that subscribes to emitters.
//!
//! Enable with the `test-harness` feature:
//!
//! ```toml
//! [dev-dependencies]
//! microevent = { version = "0.1", features = ["test-harness"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! let spy = HandlerSpy::new();
//! button.on("click", spy.handler());
//! button.trigger("click", args![1, 2])?;
//!
//! assert_eq!(spy.called(), 1);
//! assert_eq!(spy.last_call(), Some(args![1, 2]));
//! ```

mod handler_spy;

pub use handler_spy::HandlerSpy;
