//! Speech-to-text via an external helper binary.

pub mod helper;
pub mod transcriber;
