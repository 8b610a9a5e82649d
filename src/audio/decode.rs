//! Audio decoding to the canonical mono representation
//!
//! Validates the audio resource (format whitelist, size guards), decodes
//! WAV directly and every other accepted container through symphonia, then
//! normalizes to mono 16 kHz. The canonical form is also materialized as a
//! scoped temporary WAV for the transcription collaborator and is deleted
//! on every exit path.

use crate::audio::AudioData;
use crate::config::AudioLimits;
use crate::{Error, Result, SAMPLE_RATE};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tempfile::NamedTempFile;

/// Accepted audio container/codec extensions
pub const ACCEPTED_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "mp4", "ogg", "flac"];

/// Scoped canonical WAV resource
///
/// Wraps a named temporary file that is removed when the value drops,
/// including on decode or transcription failure.
#[derive(Debug)]
pub struct TempWav {
    file: NamedTempFile,
}

impl TempWav {
    /// Path of the canonical WAV on disk
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Result of decoding one audio resource
#[derive(Debug)]
pub struct DecodedAudio {
    /// Canonical mono sample buffer
    pub audio: AudioData,
    /// Canonical WAV rendition for the transcription collaborator
    pub canonical_wav: TempWav,
}

/// Decodes audio resources into the canonical representation
#[derive(Debug, Clone)]
pub struct AudioDecoder {
    limits: AudioLimits,
}

impl AudioDecoder {
    /// Create a decoder with the given input guards
    pub fn new(limits: AudioLimits) -> Self {
        Self { limits }
    }

    /// Decode an audio resource, failing fast on validation errors
    ///
    /// Guard order: extension whitelist, existence, non-empty, size cap.
    /// The whitelist check runs before any filesystem access beyond the
    /// path itself, so an unsupported extension is rejected even for a
    /// file that does not exist.
    pub fn decode<P: AsRef<Path>>(&self, path: P) -> Result<DecodedAudio> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::UnsupportedFormat {
                extension: format!(".{}", extension),
            });
        }

        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let size = std::fs::metadata(path)?.len();
        if size == 0 {
            return Err(Error::EmptyAudio);
        }
        if size > self.limits.max_file_bytes {
            return Err(Error::AudioTooLarge {
                size_mb: size as f64 / (1024.0 * 1024.0),
                limit_mb: self.limits.max_file_bytes / (1024 * 1024),
            });
        }

        let raw = if extension == "wav" {
            read_wav(path)?
        } else {
            log::info!("transcoding {} ({})", path.display(), extension);
            transcode(path, &extension)?
        };

        if raw.is_empty() {
            return Err(Error::EmptyAudio);
        }

        let audio = if raw.sample_rate == SAMPLE_RATE {
            raw
        } else {
            resample(&raw, SAMPLE_RATE)?
        };

        let canonical_wav = write_canonical_wav(&audio)?;
        log::debug!(
            "decoded {}: {:.2} s at {} Hz",
            path.display(),
            audio.duration(),
            audio.sample_rate
        );

        Ok(DecodedAudio {
            audio,
            canonical_wav,
        })
    }
}

/// Read a WAV file into a mono buffer
fn read_wav(path: &Path) -> Result<AudioData> {
    let reader =
        WavReader::open(path).map_err(|e| Error::Audio(format!("Failed to open WAV: {}", e)))?;
    let spec = reader.spec();
    let sample_rate = spec.sample_rate;
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Audio(format!("Failed to read samples: {}", e)))?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let raw: Vec<i32> = reader
                .into_samples::<i32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| Error::Audio(format!("Failed to read samples: {}", e)))?;

            let max_val = (1i64 << (bits - 1)) as f32;
            raw.iter().map(|&s| s as f32 / max_val).collect()
        }
    };

    Ok(AudioData::new(downmix(samples, channels), sample_rate))
}

/// Decode a non-WAV container through symphonia
fn transcode(path: &Path, extension: &str) -> Result<AudioData> {
    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(extension);

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::Transcode(format!("unrecognized {} container ({})", extension, e)))?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::Transcode(format!("no decodable track in {} file", extension)))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::Transcode(format!("no codec for {} audio ({})", extension, e)))?;

    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());
    let mut interleaved: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(Error::Transcode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate.get_or_insert(spec.rate);
                channels.get_or_insert(spec.channels.count());

                if sample_buf.is_none() {
                    sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
                }
                if let Some(buf) = &mut sample_buf {
                    buf.copy_interleaved_ref(decoded);
                    interleaved.extend_from_slice(buf.samples());
                }
            }
            // Recoverable: skip the malformed packet and keep going
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(Error::Transcode(e.to_string())),
        }
    }

    let sample_rate =
        sample_rate.ok_or_else(|| Error::Transcode("could not determine sample rate".into()))?;
    let channels = channels.unwrap_or(1).max(1);

    Ok(AudioData::new(downmix(interleaved, channels), sample_rate))
}

/// Average interleaved channels down to mono
fn downmix(samples: Vec<f32>, channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples;
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Resample audio to the target sample rate
fn resample(audio: &AudioData, target_sr: u32) -> Result<AudioData> {
    if audio.sample_rate == target_sr {
        return Ok(audio.clone());
    }
    if audio.sample_rate == 0 {
        return Err(Error::Audio("source sample rate is zero".into()));
    }

    let ratio = target_sr as f64 / audio.sample_rate as f64;
    let mut resampler = FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Cubic, 1024, 1)
        .map_err(|e| Error::Audio(format!("Failed to create resampler: {}", e)))?;

    let input_frames = resampler.input_frames_next();
    let mut input = vec![vec![0.0f32; input_frames]];
    let mut output = Vec::new();

    let mut pos = 0;
    while pos < audio.samples.len() {
        let end = (pos + input_frames).min(audio.samples.len());
        let chunk = end - pos;

        input[0][..chunk].copy_from_slice(&audio.samples[pos..end]);
        if chunk < input_frames {
            input[0][chunk..].fill(0.0);
        }

        let resampled = resampler
            .process(&input, None)
            .map_err(|e| Error::Audio(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&resampled[0]);
        pos += chunk;

        if chunk < input_frames {
            break;
        }
    }

    let expected = (audio.samples.len() as f64 * ratio).ceil() as usize;
    output.truncate(expected);

    Ok(AudioData::new(output, target_sr))
}

/// Materialize the canonical mono WAV into a scoped temp file
fn write_canonical_wav(audio: &AudioData) -> Result<TempWav> {
    let file = tempfile::Builder::new()
        .prefix("commcoach-")
        .suffix(".wav")
        .tempfile()?;

    let spec = WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(file.path(), spec)?;
    for &sample in &audio.samples {
        writer.write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    Ok(TempWav { file })
}
