pub mod gateway;
pub mod reset;

pub use gateway::*;
pub use reset::*;
