//! Common types shared across the symgraph workspace.
//!
//! This crate provides search configuration and the bound every node or
//! target identifier has to satisfy.

mod config;
mod node;

pub use crate::config::*;
pub use crate::node::*;
