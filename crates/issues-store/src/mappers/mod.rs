//! Entity <-> record mappers
//!
//! Records do not carry their own IDs (the file name does), so conversions
//! into entities are inherent `into_*` methods taking the ID.

mod comment;
mod event;
mod issue;
