//! Background Tasks Module
//!
//! # Tasks
//! - Query GC: drops cached queries nobody has read for `gcTime`

mod gc;

pub use gc::spawn_gc_task;
