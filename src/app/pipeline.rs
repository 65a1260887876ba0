use std::cell::RefCell;
use std::rc::Rc;

use super::state::{AppState, BackendEvent, SubmitScreen};
use crate::api::{self, LoginRequest, RegisterRequest, VoteRequest};

/// Fetch a fresh CAPTCHA challenge with a new cache-bust token, so a stale
/// challenge is never reused.
pub fn dispatch_captcha(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();
    let token = api::cache_bust();

    s.tokio_rt.spawn(async move {
        match backend.fetch_captcha(token).await {
            Ok(bytes) => {
                let _ = sender.send(BackendEvent::CaptchaLoaded(bytes)).await;
            }
            Err(e) => {
                let _ = sender
                    .send(BackendEvent::CaptchaFailed(format!(
                        "CAPTCHA load failed: {e}"
                    )))
                    .await;
            }
        }
    });
}

pub fn dispatch_register(state: &Rc<RefCell<AppState>>, req: RegisterRequest) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        match backend.register(&req).await {
            Ok(outcome) => {
                let _ = sender.send(BackendEvent::RegisterDone(outcome)).await;
            }
            Err(e) => {
                let _ = sender
                    .send(BackendEvent::SubmitFailed {
                        screen: SubmitScreen::Register,
                        message: e.to_string(),
                    })
                    .await;
            }
        }
    });
}

pub fn dispatch_login(state: &Rc<RefCell<AppState>>, req: LoginRequest) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        match backend.login(&req).await {
            Ok(outcome) => {
                let _ = sender.send(BackendEvent::LoginDone(outcome)).await;
            }
            Err(e) => {
                let _ = sender
                    .send(BackendEvent::SubmitFailed {
                        screen: SubmitScreen::Login,
                        message: e.to_string(),
                    })
                    .await;
            }
        }
    });
}

pub fn dispatch_vote(state: &Rc<RefCell<AppState>>, req: VoteRequest) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        match backend.vote(&req).await {
            Ok(outcome) => {
                let _ = sender.send(BackendEvent::VoteDone(outcome)).await;
            }
            Err(e) => {
                let _ = sender
                    .send(BackendEvent::SubmitFailed {
                        screen: SubmitScreen::Vote,
                        message: e.to_string(),
                    })
                    .await;
            }
        }
    });
}

pub fn dispatch_candidates(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        match backend.candidates().await {
            Ok(candidates) => {
                let _ = sender
                    .send(BackendEvent::CandidatesLoaded(candidates))
                    .await;
            }
            Err(e) => {
                let _ = sender
                    .send(BackendEvent::CandidatesFailed(format!(
                        "Candidate fetch failed: {e}"
                    )))
                    .await;
            }
        }
    });
}

/// Fetch one candidate's symbol image. Failures only log; the row keeps its
/// blank placeholder.
pub fn dispatch_symbol(state: &Rc<RefCell<AppState>>, candidate_id: String, url: String) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        match backend.fetch_image(&url).await {
            Ok(bytes) => {
                let _ = sender
                    .send(BackendEvent::SymbolLoaded { candidate_id, bytes })
                    .await;
            }
            Err(e) => log::warn!("Symbol fetch failed for {candidate_id}: {e}"),
        }
    });
}

/// First leg of the results probe. The tally fetch is only dispatched after
/// this resolves to "closed" (see the event handler).
pub fn dispatch_election_status(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        match backend.election_status().await {
            Ok(status) => {
                let _ = sender
                    .send(BackendEvent::ElectionStatusLoaded(status))
                    .await;
            }
            Err(e) => {
                let _ = sender
                    .send(BackendEvent::ResultsFailed(format!(
                        "Error checking election status: {e}"
                    )))
                    .await;
            }
        }
    });
}

pub fn dispatch_results(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    let backend = s.backend.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        match backend.results().await {
            Ok(rows) => {
                let _ = sender.send(BackendEvent::TalliesLoaded(rows)).await;
            }
            Err(e) => {
                let _ = sender
                    .send(BackendEvent::ResultsFailed(e.to_string()))
                    .await;
            }
        }
    });
}
