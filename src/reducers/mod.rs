//! Domain reducers. Each owns one slice of the message enum; `update.rs`
//! asks them in turn until one reports the message handled.

pub mod board;
pub mod chat;
