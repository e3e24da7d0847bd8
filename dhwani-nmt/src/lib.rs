//! dhwani-nmt: attention-based seq2seq translation core.
//!
//! This crate provides the neural translation backend of the dhwani voice
//! pipeline, plus an alternative rule-based noisy backend behind the same
//! trait.
//!
//! # Architecture
//!
//! Translation runs through four stages:
//!
//! - [`normalize`]: canonicalize raw text and wrap it in `<start>`/`<end>` markers
//! - [`vocab::Vocabulary`]: map tokens to padded integer id sequences
//! - [`models::seq2seq`]: GRU encoder, Bahdanau attention, greedy decoder loop
//! - [`vocab::Vocabulary`] again in reverse, joining decoded tokens into text
//!
//! All model parameters are explicit [`ndarray`] tensors owned by per-layer
//! structs; they are restored once from a checkpoint directory and never
//! mutated afterwards, so a loaded model may be shared freely across threads.
//!
//! # Quick Start
//!
//! ```ignore
//! use dhwani_nmt::models::seq2seq::Seq2SeqModel;
//! use dhwani_nmt::traits::Translator;
//!
//! let model = Seq2SeqModel::from_dir("model_dir".as_ref())?;
//! let hindi = model.translate("how are you?")?;
//! println!("{hindi}");
//! ```

pub mod checkpoint;
pub mod error;
pub mod models;
pub mod noisy;
pub mod normalize;
pub mod traits;
pub mod vocab;
