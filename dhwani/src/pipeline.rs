//! Voice-to-voice pipeline orchestration.
//!
//! Transcript comes first; reply generation and translation then run
//! concurrently since neither depends on the other. The exchange is only
//! persisted once both have succeeded, so a partial failure never corrupts
//! the conversation log.

use crate::asr::SpeechToText;
use crate::reply::ReplyGenerator;
use crate::store::ConversationStore;
use crate::tts::TtsClient;
use dhwani_nmt::traits::Translator;
use eyre::{OptionExt, Result, WrapErr, eyre};

/// Everything one voice exchange produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub transcript: String,
    pub reply: String,
    pub translation: String,
    pub audio: Vec<u8>,
}

/// Wired-up voice pipeline over shared, read-only collaborators.
pub struct VoicePipeline<'a> {
    pub asr: &'a dyn SpeechToText,
    pub reply: &'a dyn ReplyGenerator,
    pub translator: &'a dyn Translator,
    pub tts: &'a TtsClient,
    pub store: &'a ConversationStore,
}

impl VoicePipeline<'_> {
    /// Run one full exchange on a mono 16kHz clip.
    pub fn run(&self, samples: &[f32]) -> Result<PipelineOutput> {
        let transcript = self
            .asr
            .transcribe(samples)
            .wrap_err("transcription failed")?
            .ok_or_eyre("no speech recognized in audio")?;

        tracing::info!(%transcript, "decoded message");

        let (reply, translation) = std::thread::scope(|scope| {
            let reply_worker = scope.spawn(|| self.reply.generate(&transcript));

            let translation = self
                .translator
                .translate(&transcript)
                .wrap_err("translation failed");

            let reply = reply_worker
                .join()
                .map_err(|_| eyre!("reply worker panicked"))?
                .wrap_err("reply generation failed");

            Ok::<_, eyre::Report>((reply?, translation?))
        })?;

        tracing::info!(%reply, %translation, "generated response");

        self.store
            .store_exchange(&transcript, &reply, &translation)
            .wrap_err("failed to persist conversation")?;

        let audio = self
            .tts
            .synthesize(&translation)
            .wrap_err("speech synthesis failed")?;

        Ok(PipelineOutput {
            transcript,
            reply,
            translation,
            audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhwani_nmt::error::{Error as NmtError, Result as NmtResult};

    struct CannedSpeech(&'static str);

    impl SpeechToText for CannedSpeech {
        fn transcribe(&self, _samples: &[f32]) -> Result<Option<String>> {
            Ok(Some(self.0.to_string()))
        }
    }

    struct CannedReply(&'static str);

    impl ReplyGenerator for CannedReply {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingReply;

    impl ReplyGenerator for FailingReply {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(eyre!("reply service unreachable"))
        }
    }

    struct EchoTranslator;

    impl Translator for EchoTranslator {
        fn translate(&self, text: &str) -> NmtResult<String> {
            Ok(text.to_string())
        }
    }

    struct FailingTranslator;

    impl Translator for FailingTranslator {
        fn translate(&self, _text: &str) -> NmtResult<String> {
            Err(NmtError::Backend("translator offline".into()))
        }
    }

    fn temp_store(name: &str) -> ConversationStore {
        let path = std::env::temp_dir().join(name);
        std::fs::remove_file(&path).ok();
        ConversationStore::new(path)
    }

    /// A synthesis client nothing listens for; connecting fails fast.
    fn unreachable_tts() -> TtsClient {
        let mut tts =
            TtsClient::new("http://127.0.0.1:9".into(), "key".into(), "voice".into()).unwrap();
        tts.retry_delay = std::time::Duration::ZERO;
        tts
    }

    #[test]
    fn failed_reply_writes_no_records() {
        let store = temp_store("dhwani_pipeline_reply_fail.json");
        let tts = unreachable_tts();
        let pipeline = VoicePipeline {
            asr: &CannedSpeech("hello"),
            reply: &FailingReply,
            translator: &EchoTranslator,
            tts: &tts,
            store: &store,
        };

        assert!(pipeline.run(&[0.0; 16]).is_err());
        assert!(store.recent().is_empty());
    }

    #[test]
    fn failed_translation_writes_no_records() {
        let store = temp_store("dhwani_pipeline_translate_fail.json");
        let tts = unreachable_tts();
        let pipeline = VoicePipeline {
            asr: &CannedSpeech("hello"),
            reply: &CannedReply("hi there"),
            translator: &FailingTranslator,
            tts: &tts,
            store: &store,
        };

        assert!(pipeline.run(&[0.0; 16]).is_err());
        assert!(store.recent().is_empty());
    }

    #[test]
    fn exchange_is_persisted_before_synthesis() {
        let store = temp_store("dhwani_pipeline_tts_fail.json");
        let tts = unreachable_tts();
        let pipeline = VoicePipeline {
            asr: &CannedSpeech("hello"),
            reply: &CannedReply("hi there"),
            translator: &EchoTranslator,
            tts: &tts,
            store: &store,
        };

        // Synthesis fails, but the completed exchange is already on disk
        assert!(pipeline.run(&[0.0; 16]).is_err());
        let records = store.recent();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].content, "hello");
        assert_eq!(records[1].content, "hi there");

        std::fs::remove_file(std::env::temp_dir().join("dhwani_pipeline_tts_fail.json")).ok();
    }
}
