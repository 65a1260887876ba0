use std::cell::RefCell;
use std::rc::Rc;

use gtk4::glib;
use gtk4::prelude::*;

use super::state::{AppState, CaptureScreen};
use crate::camera;
use crate::ui;

/// Start a capture session for the given screen. The login screen permits
/// restarting while active, so any prior session is stopped first; the
/// register screen's start button is disabled while active, making a second
/// press impossible there.
pub fn start_screen_camera(state: &Rc<RefCell<AppState>>, screen: CaptureScreen) {
    stop_screen_camera(state, screen);
    log::info!("Starting camera ({})", screen.label());

    let mut s = state.borrow_mut();
    let frames = match screen {
        CaptureScreen::Register => s.register_frames.clone(),
        CaptureScreen::Login => s.login_frames.clone(),
    };
    let session = camera::start_capture(screen, frames, s.backend_sender.clone());
    match screen {
        CaptureScreen::Register => s.register_camera = Some(session),
        CaptureScreen::Login => s.login_camera = Some(session),
    }
}

/// The device stream is up: mark the session active, lock the register
/// start button, and begin painting preview frames.
pub fn on_camera_started(
    state: &Rc<RefCell<AppState>>,
    screen: CaptureScreen,
    width: u32,
    height: u32,
) {
    let mut s = state.borrow_mut();

    // The session may have been stopped while the device was still opening.
    let still_wanted = match screen {
        CaptureScreen::Register => s.register_camera.is_some(),
        CaptureScreen::Login => s.login_camera.is_some(),
    };
    if !still_wanted {
        return;
    }

    log::info!("Camera ready ({}, {width}x{height})", screen.label());
    let (frames, preview_picture, start_button) = match screen {
        CaptureScreen::Register => {
            s.register_active = true;
            let Some(ref ui) = s.ui else { return };
            (
                s.register_frames.clone(),
                ui.register.preview.clone(),
                Some(ui.register.start_camera_button.clone()),
            )
        }
        CaptureScreen::Login => {
            s.login_active = true;
            let Some(ref ui) = s.ui else { return };
            (s.login_frames.clone(), ui.login.preview.clone(), None)
        }
    };
    drop(s);

    if let Some(button) = start_button {
        button.set_sensitive(false);
        button.set_label("Camera Started");
    }

    // ~12fps preview repaint
    let source = glib::timeout_add_local(std::time::Duration::from_millis(80), move || {
        if let Some(frame) = frames.lock().unwrap().as_ref().cloned() {
            ui::set_picture_rgb(&preview_picture, &frame);
        }
        glib::ControlFlow::Continue
    });

    let mut s = state.borrow_mut();
    match screen {
        CaptureScreen::Register => s.register_preview = Some(source),
        CaptureScreen::Login => s.login_preview = Some(source),
    }
}

/// Device acquisition failed: clear the session slot and warn the user.
pub fn on_camera_failed(state: &Rc<RefCell<AppState>>, screen: CaptureScreen, message: &str) {
    log::error!("Camera start failed ({}): {message}", screen.label());

    let mut s = state.borrow_mut();
    match screen {
        CaptureScreen::Register => {
            s.register_camera = None;
            s.register_active = false;
        }
        CaptureScreen::Login => {
            s.login_camera = None;
            s.login_active = false;
        }
    }
    let window = s.ui.as_ref().map(|ui| ui.window.clone());
    drop(s);

    if let Some(window) = window {
        ui::show_alert(&window, "Camera", message);
    }
}

/// Release the screen's device stream and preview tick. Safe to call when no
/// session exists. This is the mandatory teardown path: screen navigation,
/// successful submissions and window close all land here.
pub fn stop_screen_camera(state: &Rc<RefCell<AppState>>, screen: CaptureScreen) {
    let mut s = state.borrow_mut();

    let (session, preview_source) = match screen {
        CaptureScreen::Register => (s.register_camera.take(), s.register_preview.take()),
        CaptureScreen::Login => (s.login_camera.take(), s.login_preview.take()),
    };
    let had_session = session.is_some();
    if let Some(session) = session {
        session.stop();
    }
    if let Some(source) = preview_source {
        source.remove();
    }
    match screen {
        CaptureScreen::Register => s.register_active = false,
        CaptureScreen::Login => s.login_active = false,
    }

    let handles = s.ui.as_ref().map(|ui| match screen {
        CaptureScreen::Register => (
            ui.register.preview.clone(),
            Some(ui.register.start_camera_button.clone()),
        ),
        CaptureScreen::Login => (ui.login.preview.clone(), None),
    });
    drop(s);

    if let Some((preview_picture, start_button)) = handles {
        ui::clear_picture(&preview_picture);
        if let Some(button) = start_button {
            button.set_sensitive(true);
            button.set_label("Start Camera");
        }
    }

    if had_session {
        log::info!("Camera session stopped ({})", screen.label());
    }
}
