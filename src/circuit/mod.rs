//! Circuit graph representation and validation.
//!
//! Callers build a [`Network`] of nodes and bipoles programmatically, then
//! hand it to [`Circuit::auto_discover`], which walks the connected part from
//! a seed node and folds every ground marker into one reference node.

mod discover;
mod network;
mod types;
mod validate;

pub use discover::Circuit;
pub use network::{Bipole, Network, Node, GROUND_NAME};
pub use types::*;
pub use validate::analysis_frequency;
