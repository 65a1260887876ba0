use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use crate::app::{BackendEvent, CaptureScreen};

/// Shared slot holding the most recent decoded preview frame. Cleared when
/// the owning session ends, so a stale frame can never be snapshotted after
/// the camera is gone.
pub type FrameSlot = Arc<Mutex<Option<RgbImage>>>;

pub fn new_frame_slot() -> FrameSlot {
    Arc::new(Mutex::new(None))
}

/// Handle to a running capture thread. `stop()` (or drop) raises the stop
/// flag; the thread releases the device stream on its way out. At most one
/// session exists per capture screen.
pub struct CameraSession {
    stop: Arc<AtomicBool>,
}

impl CameraSession {
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start capturing from the default camera (device 0). Device access happens
/// on a dedicated thread; the outcome comes back as a `CameraStarted` or
/// `CameraFailed` event. Decoded frames overwrite `frames` until the session
/// is stopped.
pub fn start_capture(
    screen: CaptureScreen,
    frames: FrameSlot,
    events: async_channel::Sender<BackendEvent>,
) -> CameraSession {
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = stop.clone();

    std::thread::Builder::new()
        .name(format!("camera-{}", screen.label()))
        .spawn(move || capture_loop(screen, frames, events, thread_stop))
        .expect("Failed to spawn camera thread");

    CameraSession { stop }
}

fn capture_loop(
    screen: CaptureScreen,
    frames: FrameSlot,
    events: async_channel::Sender<BackendEvent>,
    stop: Arc<AtomicBool>,
) {
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
        CameraFormat::new(Resolution::new(640, 480), FrameFormat::MJPEG, 30),
    ));

    let mut camera = match Camera::new(CameraIndex::Index(0), requested) {
        Ok(camera) => camera,
        Err(e) => {
            let _ = events.send_blocking(BackendEvent::CameraFailed {
                screen,
                message: format!("Unable to access camera: {e}"),
            });
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = events.send_blocking(BackendEvent::CameraFailed {
            screen,
            message: format!("Unable to start camera stream: {e}"),
        });
        return;
    }

    // The device may have picked a different format than requested.
    let resolution = camera.resolution();
    log::info!(
        "Camera device: {} ({}x{})",
        camera.info().human_name(),
        resolution.width(),
        resolution.height()
    );
    let _ = events.send_blocking(BackendEvent::CameraStarted {
        screen,
        width: resolution.width(),
        height: resolution.height(),
    });

    while !stop.load(Ordering::Relaxed) {
        match camera.frame() {
            Ok(frame) => match frame.decode_image::<RgbFormat>() {
                Ok(decoded) => {
                    *frames.lock().unwrap() = Some(decoded);
                }
                Err(e) => log::error!("Frame decode error: {e}"),
            },
            Err(e) => {
                log::error!("Camera stream error: {e}");
                break;
            }
        }
    }

    if let Err(e) = camera.stop_stream() {
        log::warn!("Failed to stop camera stream: {e}");
    }
    frames.lock().unwrap().take();
    log::info!("Camera released ({})", screen.label());
}
