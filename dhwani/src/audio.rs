//! Audio loading and validation.
//!
//! The recognizer boundary expects mono 16kHz PCM, so loading validates the
//! sample rate, downmixes stereo, and gates on file extension the same way
//! the upload surface does.

use hound::{SampleFormat, WavReader, WavSpec};
use std::path::Path;
use thiserror::Error;

/// Expected sample rate for speech recognition (16kHz)
pub const SAMPLE_RATE: u32 = 16000;

/// Extensions the pipeline accepts as speech input.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac"];

/// Audio loading and validation errors.
#[derive(Debug, Error)]
pub enum AudioError {
    /// File extension outside the accepted set
    #[error("invalid file type: {0:?} (expected .wav, .mp3, .ogg, or .flac)")]
    InvalidFileType(String),

    /// Non-WAV input that needs external conversion first
    #[error("cannot decode {0:?} natively: convert to 16kHz mono WAV first")]
    NeedsConversion(String),

    /// Sample rate validation failed
    #[error("invalid sample rate: expected {expected}Hz, got {got}Hz")]
    InvalidSampleRate { expected: u32, got: u32 },

    /// Channel count validation failed
    #[error("invalid channel count: expected mono or stereo, got {0} channels")]
    InvalidChannels(u16),

    /// IO error during audio loading
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// WAV file format error
    #[error(transparent)]
    Hound(#[from] hound::Error),
}

/// Load a WAV file as raw f32 samples plus its spec.
fn load_wav(path: &Path) -> Result<(Vec<f32>, WavSpec), AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<hound::Result<_>>()?,
        SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|s| s as f32 / i16::MAX as f32))
            .collect::<hound::Result<_>>()?,
    };

    Ok((samples, spec))
}

/// Read a speech clip as mono 16kHz f32 samples.
///
/// Gates on the accepted extension set, then decodes WAV natively:
/// validates the sample rate, downmixes stereo by averaging, and rejects
/// other channel counts.
pub fn read_speech_mono(path: &Path) -> Result<Vec<f32>, AudioError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AudioError::InvalidFileType(extension));
    }

    if extension != "wav" {
        return Err(AudioError::NeedsConversion(extension));
    }

    let (mut samples, spec) = load_wav(path)?;

    if spec.sample_rate != SAMPLE_RATE {
        return Err(AudioError::InvalidSampleRate {
            expected: SAMPLE_RATE,
            got: spec.sample_rate,
        });
    }

    if spec.channels == 0 || spec.channels > 2 {
        return Err(AudioError::InvalidChannels(spec.channels));
    }

    if spec.channels == 2 {
        samples = samples
            .chunks(2)
            .map(|pair| pair.iter().sum::<f32>() / 2.0)
            .collect();
    }

    Ok(samples)
}

/// Encode f32 samples as 16-bit little-endian PCM bytes for the recognizer.
pub fn to_pcm16_bytes(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavWriter;

    fn create_test_wav(
        path: &Path,
        sample_rate: u32,
        channels: u16,
        samples: &[f32],
    ) -> hound::Result<()> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec)?;
        for &sample in samples {
            writer.write_sample((sample * 32768.0) as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }

    #[test]
    fn reads_mono_16khz() {
        let path = std::env::temp_dir().join("dhwani_mono.wav");
        let samples = vec![0.1, 0.2, 0.3];
        create_test_wav(&path, 16000, 1, &samples).unwrap();

        let result = read_speech_mono(&path).unwrap();
        for (expected, actual) in samples.iter().zip(result.iter()) {
            assert!((expected - actual).abs() < 0.01);
        }

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn downmixes_stereo() {
        let path = std::env::temp_dir().join("dhwani_stereo.wav");
        create_test_wav(&path, 16000, 2, &[0.2, 0.4, 0.6, 0.8]).unwrap();

        let result = read_speech_mono(&path).unwrap();
        assert_eq!(result.len(), 2);
        assert!((result[0] - 0.3).abs() < 0.01);
        assert!((result[1] - 0.7).abs() < 0.01);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_wrong_sample_rate() {
        let path = std::env::temp_dir().join("dhwani_44khz.wav");
        create_test_wav(&path, 44100, 1, &[0.0, 0.1]).unwrap();

        let err = read_speech_mono(&path).unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleRate { .. }));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = read_speech_mono(Path::new("clip.txt")).unwrap_err();
        assert!(matches!(err, AudioError::InvalidFileType(_)));
    }

    #[test]
    fn directs_non_wav_formats_to_conversion() {
        let err = read_speech_mono(Path::new("clip.mp3")).unwrap_err();
        assert!(matches!(err, AudioError::NeedsConversion(_)));
    }

    #[test]
    fn encodes_pcm16_little_endian() {
        let bytes = to_pcm16_bytes(&[0.0, 1.0, -1.0]);
        assert_eq!(bytes.len(), 6);
        assert_eq!(&bytes[0..2], &[0, 0]);
        assert_eq!(&bytes[2..4], &i16::MAX.to_le_bytes());
    }
}
