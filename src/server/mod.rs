//! Inbound side: the accept loop and request dispatch.

pub mod listener;
pub mod router;

pub use listener::Listener;
pub use router::{HiscoreRouter, Router, StaticPageRouter};
