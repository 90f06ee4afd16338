//! Data access over the in-memory [`Catalog`](crate::catalog::Catalog).
//!
//! Every function here is synchronous and deterministic: ids, timestamps and random numbers are
//! supplied by the caller. The server functions in `app` add the artificial latency.

pub mod daily;
pub mod leaderboard;
pub mod play;
pub mod progress;
pub mod puzzles;
