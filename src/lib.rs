pub mod benchmark;
pub mod controller;
pub mod error;
pub mod events;
pub mod export;
pub mod io;
pub mod job;
pub mod logs;
pub mod modes;
pub mod pot;
pub mod render;
pub mod report;
pub mod supervisor;

pub mod prelude {
    pub use crate::controller::HashcatController;
    pub use crate::error::HashcatError;
    pub use crate::job::AttackPayload;
    pub use crate::modes::{AttackStrategy, Catalog, HashAlgorithm, ModeValue};
}
