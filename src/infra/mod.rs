//! Infrastructure helpers that carry no protocol state of their own.
pub mod codec;
