pub mod batch;
pub mod engine;
pub mod render;
pub mod table;

pub use crate::cyk::batch::{derives_many, run_batch, BatchMetrics, BatchOutcome};
pub use crate::cyk::engine::{derives, derives_with, producers_for, recognize, Recognition};
pub use crate::cyk::render::{dump_table, render_table};
pub use crate::cyk::table::CykTable;
