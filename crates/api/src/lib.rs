//! Collage API - command and query interface for collage operations.
//!
//! This crate defines the typed command language for all collage edits.
//! Commands represent user intent and are:
//! - Serializable (for recording and scripting)
//! - Intent-based (what to do, not how to do it)
//! - Replayable (the executor handles layout and undo recording)
//!
//! # Example
//! ```ignore
//! use api::{Command, Workspace, execute_command};
//! use collage::AutoLayout;
//!
//! let mut workspace = Workspace::new();
//! let result = execute_command(&mut workspace, Command::ApplyLayout { layout: AutoLayout::Grid });
//! ```

mod command;
mod executor;
mod query;
mod target;

pub use command::*;
pub use executor::{execute_command, execute_query, Workspace};
pub use query::*;
pub use target::*;
