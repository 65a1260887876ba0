mod capture;
mod event_handler;
mod pipeline;
mod state;
mod submit;

pub use capture::{start_screen_camera, stop_screen_camera};
pub use event_handler::{begin_results_probe, handle_backend_event, on_screen_changed};
pub use pipeline::dispatch_captcha;
pub use state::{AppState, BackendEvent, CaptureScreen};
pub use submit::{
    advance_register_wizard, back_register_wizard, submit_login, submit_register, submit_vote,
};
