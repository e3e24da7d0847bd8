//! Attention-based seq2seq translation model.

pub mod attention;
pub mod core;
pub mod inference;
pub mod layers;
pub mod translator_impl;

pub use self::core::Seq2SeqModel;
