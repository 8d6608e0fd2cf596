//! Storage growth estimation for agent-written tables.
//!
//! Given a column layout, a polling interval, the hours agents are active and how many
//! agents there are, [`estimate::estimate`] projects row size and daily, monthly and
//! yearly storage growth.

#[macro_use]
pub mod errors;
pub mod command;
pub mod console;
pub mod estimate;
pub mod format;
pub mod repl;
pub mod schema;
pub mod session;
pub mod timing;

pub use errors::Error;
pub use estimate::{estimate, project, EstimationResult, Projection};
pub use format::format_bytes;
pub use schema::{ColumnSpec, ColumnType, SchemaSpec, TypeDescriptor, TYPES};
pub use timing::{ActivityWindow, TimeOfDay};
