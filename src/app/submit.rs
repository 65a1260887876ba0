use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use super::pipeline;
use super::state::{AppState, AppStatus};
use crate::api::{LoginRequest, RegisterRequest, VoteRequest};
use crate::audio_feedback::{self, BeepType};
use crate::snapshot;
use crate::ui;

/// Wizard gate: pull the info entries into the form and advance to the
/// capture step only when they validate.
pub fn advance_register_wizard(state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    let (window, step_stack, name, email, phone, password) = {
        let Some(ref u) = s.ui else { return };
        (
            u.window.clone(),
            u.register.step_stack.clone(),
            u.register.name_entry.text().to_string(),
            u.register.email_entry.text().to_string(),
            u.register.phone_entry.text().to_string(),
            u.register.password_entry.text().to_string(),
        )
    };

    s.register_form.name = name;
    s.register_form.email = email;
    s.register_form.phone = phone;
    s.register_form.password = password;

    match s.register_form.advance() {
        Ok(()) => {
            drop(s);
            step_stack.set_visible_child_name("capture");
        }
        Err(e) => {
            drop(s);
            ui::show_alert(&window, "Register", e.message());
        }
    }
}

/// Capture step → info step; never gated, nothing is reset.
pub fn back_register_wizard(state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    s.register_form.back();
    let step_stack = s.ui.as_ref().map(|u| u.register.step_stack.clone());
    drop(s);
    if let Some(step_stack) = step_stack {
        step_stack.set_visible_child_name("info");
    }
}

/// Final registration submit: requires an active camera session and a
/// captured frame; the info fields were validated at the wizard gate.
pub fn submit_register(state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    if s.status == AppStatus::Submitting {
        return;
    }
    let (window, register_button, snapshot_box, snapshot_picture) = {
        let Some(ref u) = s.ui else { return };
        (
            u.window.clone(),
            u.register.register_button.clone(),
            u.register.snapshot_box.clone(),
            u.register.snapshot.clone(),
        )
    };

    if !s.register_active {
        drop(s);
        ui::show_alert(
            &window,
            "Register",
            "Please start the camera before capturing your face.",
        );
        return;
    }

    let Some(image) = snapshot::capture_data_uri(&s.register_frames) else {
        drop(s);
        ui::show_alert(&window, "Register", "Unable to capture photo. Try again.");
        return;
    };
    audio_feedback::play_beep(BeepType::Shutter);

    // Display-only echo of the frame that was just captured
    let echo_frame = s.register_frames.lock().unwrap().as_ref().cloned();

    let req = RegisterRequest {
        name: s.register_form.name.clone(),
        email: s.register_form.email.clone(),
        phone: s.register_form.phone.clone(),
        password: s.register_form.password.clone(),
        image,
    };
    s.status = AppStatus::Submitting;
    drop(s);

    if let Some(ref frame) = echo_frame {
        ui::set_picture_rgb(&snapshot_picture, frame);
        snapshot_box.set_visible(true);
    }
    register_button.set_sensitive(false);

    pipeline::dispatch_register(state, req);
}

/// Login submit: all fields (including the CAPTCHA answer) plus an active
/// camera session and a captured frame.
pub fn submit_login(state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    if s.status == AppStatus::Submitting {
        return;
    }
    let (window, login_button, name, password, captcha_answer) = {
        let Some(ref u) = s.ui else { return };
        (
            u.window.clone(),
            u.login.login_button.clone(),
            u.login.name_entry.text().to_string(),
            u.login.password_entry.text().to_string(),
            u.login.captcha_entry.text().to_string(),
        )
    };

    s.login_form.name = name;
    s.login_form.password = password;
    s.login_form.captcha_answer = captcha_answer;

    if let Err(e) = s.login_form.validate() {
        drop(s);
        ui::show_alert(&window, "Login", e.message());
        return;
    }

    if !s.login_active {
        drop(s);
        ui::show_alert(&window, "Login", "Please start the camera before logging in.");
        return;
    }

    let Some(image) = snapshot::capture_data_uri(&s.login_frames) else {
        drop(s);
        ui::show_alert(&window, "Login", "Failed to capture photo. Try again.");
        return;
    };
    audio_feedback::play_beep(BeepType::Shutter);

    let req = LoginRequest {
        name: s.login_form.name.clone(),
        password: s.login_form.password.clone(),
        image,
        captcha_input: s.login_form.normalized_captcha(),
    };
    s.status = AppStatus::Submitting;
    drop(s);

    login_button.set_sensitive(false);
    pipeline::dispatch_login(state, req);
}

/// Vote submit: trimmed voter name plus a selected candidate.
pub fn submit_vote(state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    if s.status == AppStatus::Submitting {
        return;
    }
    let (window, submit_button, voter_name) = {
        let Some(ref u) = s.ui else { return };
        (
            u.window.clone(),
            u.vote.submit_button.clone(),
            u.vote.name_entry.text().to_string(),
        )
    };

    s.vote_form.voter_name = voter_name;

    if let Err(e) = s.vote_form.validate() {
        drop(s);
        ui::show_alert(&window, "Vote", e.message());
        return;
    }
    let Some(candidate_id) = s.vote_form.candidate_id.clone() else {
        return;
    };

    let req = VoteRequest {
        voter_name: s.vote_form.voter_name.trim().to_string(),
        candidate_id,
    };
    s.status = AppStatus::Submitting;
    drop(s);

    submit_button.set_sensitive(false);
    pipeline::dispatch_vote(state, req);
}
