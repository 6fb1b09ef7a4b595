// ============================================================
// DATASET DOMAIN LAYER
// ============================================================
// Typed, in-memory table built from one upload
// No I/O, no async

mod cell;
mod column_type;
mod table;

pub use cell::Cell;
pub use column_type::ColumnType;
pub use table::{Column, Dataset, MemoryUsage};
