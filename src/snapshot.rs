use std::io::Cursor;

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::api::BackendError;
use crate::camera::FrameSlot;

const JPEG_QUALITY: u8 = 85;

/// Snapshot the most recent preview frame as a JPEG data URI, ready to embed
/// in a JSON payload. Returns `None` when no frame has arrived (camera not
/// running yet, or already released) — callers block submission on that.
pub fn capture_data_uri(frames: &FrameSlot) -> Option<String> {
    let frame = frames.lock().unwrap().as_ref().cloned()?;
    match encode_jpeg(&frame) {
        Ok(jpeg) => Some(to_data_uri(&jpeg)),
        Err(e) => {
            log::error!("Snapshot encode failed: {e}");
            None
        }
    }
}

/// Compress an RGB frame at its native resolution.
fn encode_jpeg(frame: &RgbImage) -> Result<Vec<u8>, BackendError> {
    let mut cursor = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    encoder.encode(
        frame.as_raw(),
        frame.width(),
        frame.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(cursor.into_inner())
}

pub fn to_data_uri(jpeg: &[u8]) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(jpeg)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::new_frame_slot;
    use image::Rgb;

    #[test]
    fn empty_slot_yields_no_artifact() {
        let frames = new_frame_slot();
        assert!(capture_data_uri(&frames).is_none());
    }

    #[test]
    fn snapshot_is_a_jpeg_data_uri() {
        let frames = new_frame_slot();
        *frames.lock().unwrap() = Some(RgbImage::from_pixel(8, 6, Rgb([120, 90, 60])));

        let uri = capture_data_uri(&frames).unwrap();
        let payload = uri
            .strip_prefix("data:image/jpeg;base64,")
            .expect("data URI prefix");

        let jpeg = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .expect("valid base64");
        // JPEG start-of-image / end-of-image markers
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn snapshot_leaves_the_frame_in_place() {
        let frames = new_frame_slot();
        *frames.lock().unwrap() = Some(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])));
        let first = capture_data_uri(&frames).unwrap();
        let second = capture_data_uri(&frames).unwrap();
        assert_eq!(first, second);
    }
}
