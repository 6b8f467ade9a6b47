//! One query module per entity. Every function runs exactly one statement
//! on the caller's connection; the caller owns the unit of work and decides
//! whether to commit.

pub mod exercises;
pub mod lessons;
pub mod practice_rooms;
pub mod songs;
pub mod user_progress;
pub mod users;

pub use exercises::*;
pub use lessons::*;
pub use practice_rooms::*;
pub use songs::*;
pub use user_progress::*;
pub use users::*;
