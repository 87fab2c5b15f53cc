//! Host systems invoked by the engine while stepping a chain-cast.
//!
//! Systems are pure functions over `&World` / `&mut World`.
//! They do not own state — all state lives in components or the hooks.

pub mod cleanup;
pub mod impact;
pub mod search;
