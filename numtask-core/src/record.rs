//! Key-value records emitted by environments and evaluation runs.
//!
//! Every [`Env::step`](crate::Env::step) returns a [`Record`] next to the
//! [`Step`](crate::Step). Environments put whatever describes the step in it,
//! for example the active task or the raw outcome of an interaction, and a
//! [`Recorder`] decides what to do with it.
//!
//! ```rust
//! use numtask_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("task", RecordValue::String("parity".to_string()));
//! record.insert("raw_reward", RecordValue::Scalar(1.0));
//!
//! assert_eq!(record.get_scalar("raw_reward").unwrap(), 1.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
