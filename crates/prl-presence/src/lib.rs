//! WebSocket connection registry and presence broadcast.
//!
//! Tracks every open socket as a [`Seat`], identified or not, and pushes a
//! full snapshot of the online list to all of them whenever membership
//! changes. Anonymous observers keep receiving updates; they just appear
//! as null entries to everyone else.
//!
//! ## Core Types
//!
//! - [`Roster`] — Registry of currently-open connections
//! - [`Seat`] — One open connection with an optional resolved identity
//! - [`OnlineEntry`] — Wire entry of the broadcast online list
//!
//! ## HTTP Handlers
//!
//! The [`connect`] handler performs the WebSocket upgrade, resolves the
//! session cookie, and bridges the socket to the roster.
mod handlers;
mod roster;
mod seat;

pub use handlers::*;
pub use roster::*;
pub use seat::*;
