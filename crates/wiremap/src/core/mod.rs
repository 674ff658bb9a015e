//! Core abstractions for architecture graphs
//!
//! This module holds the store, the persistence codec, the reference
//! syntax parser, and the shared type and error definitions.

mod codec;
mod error;
pub mod logging;
mod store;
mod syntax;
mod types;

pub use codec::*;
pub use error::*;
pub use store::*;
pub use syntax::*;
pub use types::*;
