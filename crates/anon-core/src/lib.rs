//! Core domain models and logic for anon
//!
//! This crate contains:
//! - Domain models (EntityStep, Choice, FinalOutput)
//! - The review-session state machine (pure transitions, no I/O)
//! - The `Backend` trait describing the anonymisation service

pub mod backend;
pub mod entity;
pub mod error;
pub mod markup;
pub mod session;

pub use backend::{Backend, DownloadFormat, SaveReceipt, SaveRequest};
pub use entity::{Choice, EntityStep, FinalOutput, Level, Mode};
pub use error::{Error, Result};
pub use markup::{parse_marked, strip_marks, Segment};
pub use session::{Phase, ReviewSession};
