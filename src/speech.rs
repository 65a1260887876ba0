use std::io::Cursor;
use std::process::Command;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::api::BackendError;

/// Narrate a confirmation phrase. Spawns a thread and returns immediately.
/// A missing synthesizer degrades to a warning log, never an error dialog.
pub fn speak(text: &str) {
    let text = text.to_string();
    std::thread::spawn(move || {
        if let Err(e) = speak_blocking(&text) {
            log::warn!("Speech synthesis failed: {e}");
        }
    });
}

fn speak_blocking(text: &str) -> Result<(), BackendError> {
    let wav = synthesize(text)?;
    play_wav(&wav)
}

/// Render text to a WAV clip. Uses espeak-ng, falling back to espeak.
fn synthesize(text: &str) -> Result<Vec<u8>, BackendError> {
    for cmd in ["espeak-ng", "espeak"] {
        match Command::new(cmd)
            .args(["--stdout", "-s", "150"])
            .arg(text)
            .output()
        {
            Ok(output) if output.status.success() && !output.stdout.is_empty() => {
                return Ok(output.stdout);
            }
            Ok(output) => {
                return Err(format!("{cmd} exited with status {}", output.status).into());
            }
            Err(_) => continue, // binary not installed, try the next one
        }
    }
    Err("No speech synthesizer found (install espeak-ng)".into())
}

/// Decode the WAV clip and play it on the default output device.
fn play_wav(wav: &[u8]) -> Result<(), BackendError> {
    let mut reader = hound::WavReader::new(Cursor::new(wav))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
    };

    let src_channels = spec.channels.max(1) as usize;
    let mono: Vec<f32> = samples
        .chunks(src_channels)
        .map(|frame| frame.iter().sum::<f32>() / src_channels as f32)
        .collect();

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or("No output device found")?;
    let config = device.default_output_config()?;
    let out_rate = config.sample_rate() as f32;
    let channels = config.channels() as usize;

    // Nearest-neighbor resample from the WAV rate to the device rate.
    let step = spec.sample_rate as f32 / out_rate;
    let total = mono.len();
    let duration =
        std::time::Duration::from_secs_f32(total as f32 / spec.sample_rate.max(1) as f32);

    let mut position = 0.0f32;
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let idx = position as usize;
                let value = if idx < total { mono[idx] } else { 0.0 };
                for sample in frame.iter_mut() {
                    *sample = value;
                }
                position += step;
            }
        },
        |err| log::error!("Audio output error: {err}"),
        None,
    )?;

    stream.play()?;

    // Wait for playback to finish + small buffer
    std::thread::sleep(duration + std::time::Duration::from_millis(200));

    drop(stream);
    Ok(())
}
