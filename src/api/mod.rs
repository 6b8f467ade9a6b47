pub mod admin;
pub mod exercises;
pub mod lessons;
pub mod practice_rooms;
pub mod songs;
pub mod user_progress;
pub mod users;

pub use admin::*;
pub use exercises::*;
pub use lessons::*;
pub use practice_rooms::*;
pub use songs::*;
pub use user_progress::*;
pub use users::*;
