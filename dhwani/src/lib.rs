//! dhwani: voice-to-voice translation pipeline.
//!
//! Orchestration glue around [`dhwani_nmt`]: WAV loading, a speech-to-text
//! client boundary, a conversational-reply client, a text-to-speech client
//! with bounded retry, and a JSON conversation store, wired together by the
//! [`pipeline`] module and exposed through the CLI in [`cli`].

pub mod asr;
pub mod audio;
pub mod chat;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod reply;
pub mod reset;
pub mod store;
pub mod translate;
pub mod tts;
