//! Background tasks for the HTTP presentation layer

mod scratch_cleanup;

pub use scratch_cleanup::spawn_scratch_cleanup_task;
