use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use super::capture;
use super::pipeline;
use super::state::{AppState, AppStatus, BackendEvent, CaptureScreen, SubmitScreen};
use crate::api::SubmitOutcome;
use crate::audio_feedback::{self, BeepType};
use crate::speech;
use crate::ui;

/// Handle a backend event. This is the core state machine.
pub fn handle_backend_event(state: &Rc<RefCell<AppState>>, event: BackendEvent) {
    match event {
        BackendEvent::CameraStarted {
            screen,
            width,
            height,
        } => {
            capture::on_camera_started(state, screen, width, height);
        }
        BackendEvent::CameraFailed { screen, message } => {
            capture::on_camera_failed(state, screen, &message);
        }
        BackendEvent::CaptchaLoaded(bytes) => {
            let s = state.borrow();
            if let Some(ref u) = s.ui {
                ui::set_picture_encoded(&u.login.captcha_picture, &bytes);
            }
        }
        BackendEvent::CaptchaFailed(message) => {
            // The challenge image stays blank; clicking it retries.
            log::error!("{message}");
        }
        BackendEvent::RegisterDone(outcome) => on_register_done(state, outcome),
        BackendEvent::LoginDone(outcome) => on_login_done(state, outcome),
        BackendEvent::VoteDone(outcome) => on_vote_done(state, outcome),
        BackendEvent::SubmitFailed { screen, message } => {
            on_submit_failed(state, screen, &message)
        }
        BackendEvent::CandidatesLoaded(candidates) => on_candidates_loaded(state, candidates),
        BackendEvent::CandidatesFailed(message) => {
            log::error!("{message}");
            let s = state.borrow();
            if let Some(ref u) = s.ui {
                u.vote.empty_label.set_text("Could not load candidates.");
                u.vote.empty_label.set_visible(true);
            }
        }
        BackendEvent::SymbolLoaded {
            candidate_id,
            bytes,
        } => {
            let s = state.borrow();
            if let Some(ref u) = s.ui {
                if let Some(picture) = u.vote.symbols.borrow().get(&candidate_id) {
                    ui::set_picture_encoded(picture, &bytes);
                }
            }
        }
        BackendEvent::ElectionStatusLoaded(status) => on_election_status(state, &status),
        BackendEvent::TalliesLoaded(rows) => {
            let s = state.borrow();
            if let Some(ref u) = s.ui {
                let stamp = chrono::Local::now().format("%H:%M:%S").to_string();
                ui::results::render_tallies(&u.results, &rows, &stamp);
            }
        }
        BackendEvent::ResultsFailed(message) => {
            log::error!("Results fetch failed: {message}");
            let s = state.borrow();
            if let Some(ref u) = s.ui {
                ui::results::show_message(&u.results, &message);
            }
        }
    }
}

fn on_register_done(state: &Rc<RefCell<AppState>>, outcome: SubmitOutcome) {
    let mut s = state.borrow_mut();
    s.status = AppStatus::Idle;
    let Some(window) = s.ui.as_ref().map(|u| u.window.clone()) else {
        return;
    };

    match outcome {
        SubmitOutcome::Accepted => {
            s.register_form.reset();
            if let Some(ref u) = s.ui {
                u.register.register_button.set_sensitive(true);
                ui::register::clear_entries(&u.register);
                u.register.snapshot_box.set_visible(false);
                ui::clear_picture(&u.register.snapshot);
                u.register.step_stack.set_visible_child_name("info");
            }
            drop(s);
            capture::stop_screen_camera(state, CaptureScreen::Register);
            audio_feedback::play_beep(BeepType::Confirm);
            ui::show_alert(&window, "Register", "Registration successful!");
        }
        SubmitOutcome::Rejected(message) => {
            // Server message verbatim; the user may retry without re-entering
            // anything.
            if let Some(ref u) = s.ui {
                u.register.register_button.set_sensitive(true);
            }
            drop(s);
            ui::show_alert(
                &window,
                "Register",
                &format!("Registration failed: {message}"),
            );
        }
    }
}

fn on_login_done(state: &Rc<RefCell<AppState>>, outcome: SubmitOutcome) {
    let mut s = state.borrow_mut();
    s.status = AppStatus::Idle;
    let Some((window, stack, captcha_entry, vote_name_entry, login_button)) =
        s.ui.as_ref().map(|u| {
            (
                u.window.clone(),
                u.stack.clone(),
                u.login.captcha_entry.clone(),
                u.vote.name_entry.clone(),
                u.login.login_button.clone(),
            )
        })
    else {
        return;
    };
    login_button.set_sensitive(true);

    match outcome {
        SubmitOutcome::Accepted => {
            // One-way handoff of the voter name into the voting screen.
            let voter_name = s.login_form.name.clone();
            s.vote_form.voter_name = voter_name.clone();
            drop(s);
            capture::stop_screen_camera(state, CaptureScreen::Login);
            vote_name_entry.set_text(&voter_name);
            audio_feedback::play_beep(BeepType::Confirm);
            ui::show_alert(&window, "Login", "Login successful!");
            // Navigation fires the screen-change hook, which loads candidates.
            stack.set_visible_child_name("vote");
        }
        SubmitOutcome::Rejected(message) => {
            // Failed attempts cost only the CAPTCHA re-entry: the answer is
            // cleared and a fresh challenge fetched, name/password/photo stay.
            s.login_form.clear_captcha();
            drop(s);
            captcha_entry.set_text("");
            ui::show_alert(&window, "Login", &message);
            pipeline::dispatch_captcha(state);
        }
    }
}

fn on_vote_done(state: &Rc<RefCell<AppState>>, outcome: SubmitOutcome) {
    let mut s = state.borrow_mut();
    s.status = AppStatus::Idle;
    let Some((window, stack, name_entry, checks)) = s.ui.as_ref().map(|u| {
        (
            u.window.clone(),
            u.stack.clone(),
            u.vote.name_entry.clone(),
            u.vote.checks.clone(),
        )
    }) else {
        return;
    };
    if let Some(ref u) = s.ui {
        u.vote.submit_button.set_sensitive(true);
    }

    match outcome {
        SubmitOutcome::Accepted => {
            let voter_name = s.vote_form.voter_name.trim().to_string();
            s.vote_form.reset();
            drop(s);

            for (_, check) in checks.borrow().iter() {
                check.set_active(false);
            }
            name_entry.set_text("");

            speech::speak(&format!("Voter {voter_name}, your voting is completed."));
            ui::show_alert(&window, "Vote", "Your vote has been recorded!");
            stack.set_visible_child_name("results");
        }
        SubmitOutcome::Rejected(message) => {
            // Selection stays intact for the retry.
            drop(s);
            ui::show_alert(&window, "Vote", &format!("Vote failed: {message}"));
        }
    }
}

fn on_submit_failed(state: &Rc<RefCell<AppState>>, screen: SubmitScreen, message: &str) {
    log::error!("Submission failed ({screen:?}): {message}");

    let mut s = state.borrow_mut();
    s.status = AppStatus::Idle;
    let Some(ref u) = s.ui else { return };
    let window = u.window.clone();
    let (button, heading, body) = match screen {
        SubmitScreen::Register => (
            u.register.register_button.clone(),
            "Register",
            "Error during registration. Please try again.",
        ),
        SubmitScreen::Login => (
            u.login.login_button.clone(),
            "Login",
            "Server error while logging in.",
        ),
        SubmitScreen::Vote => (
            u.vote.submit_button.clone(),
            "Vote",
            "Error submitting vote.",
        ),
    };
    drop(s);

    button.set_sensitive(true);
    ui::show_alert(&window, heading, body);
}

fn on_candidates_loaded(state: &Rc<RefCell<AppState>>, candidates: Vec<crate::api::Candidate>) {
    log::info!("Loaded {} candidates", candidates.len());
    state.borrow_mut().candidates = candidates;

    let s = state.borrow();
    let Some(ref u) = s.ui else { return };
    ui::vote::populate_candidates(&u.vote, &s.candidates, state);

    let symbol_jobs: Vec<(String, String)> = s
        .candidates
        .iter()
        .filter_map(|c| c.symbol.clone().map(|url| (c.id.clone(), url)))
        .collect();
    drop(s);

    for (candidate_id, url) in symbol_jobs {
        pipeline::dispatch_symbol(state, candidate_id, url);
    }
}

fn on_election_status(state: &Rc<RefCell<AppState>>, status: &str) {
    let s = state.borrow();
    let Some(ref u) = s.ui else { return };
    match status {
        "open" => {
            // One-shot check by design: no polling while the election runs.
            ui::results::show_message(
                &u.results,
                "Election is still open. Results will be available once it is closed.",
            );
        }
        "closed" => {
            drop(s);
            pipeline::dispatch_results(state);
        }
        other => {
            log::warn!("Unexpected election status: {other}");
            ui::results::show_message(
                &u.results,
                &format!("Unexpected election status: {other}"),
            );
        }
    }
}

/// Screen-entry probe for the results view: one status check, then (via the
/// event handler) the conditional tally fetch.
pub fn begin_results_probe(state: &Rc<RefCell<AppState>>) {
    {
        let s = state.borrow();
        if let Some(ref u) = s.ui {
            ui::results::show_message(&u.results, "Loading\u{2026}");
        }
    }
    pipeline::dispatch_election_status(state);
}

/// Stack navigation hook: tear down capture sessions the user navigated away
/// from, then run the entered screen's fetch.
pub fn on_screen_changed(state: &Rc<RefCell<AppState>>) {
    let name = {
        let s = state.borrow();
        match s.ui.as_ref().and_then(|u| u.stack.visible_child_name()) {
            Some(name) => name.to_string(),
            None => return,
        }
    };

    if name != "register" {
        capture::stop_screen_camera(state, CaptureScreen::Register);
    }
    if name != "login" {
        capture::stop_screen_camera(state, CaptureScreen::Login);
    }

    match name.as_str() {
        "vote" => {
            if state.borrow().candidates.is_empty() {
                pipeline::dispatch_candidates(state);
            }
        }
        "results" => begin_results_probe(state),
        _ => {}
    }
}
