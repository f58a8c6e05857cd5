// Application layer: the single entry point clients (CLI, GUI) talk to.
// Validation and error conversion live here; SQL stays in storage.

pub mod error;
pub mod outcome;
pub mod store;

pub use error::*;
pub use outcome::*;
pub use store::*;
