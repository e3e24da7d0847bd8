//! Model implementations.

pub mod seq2seq;
