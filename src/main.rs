mod api;
mod app;
mod audio_feedback;
mod camera;
mod forms;
mod snapshot;
mod speech;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita::prelude::*;

use app::{AppState, BackendEvent, CaptureScreen};

fn main() {
    env_logger::init();
    log::info!("Ballot Booth starting");

    let application = libadwaita::Application::builder()
        .application_id("com.github.ballotbooth.ballot-booth")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(app: &libadwaita::Application) {
    // Create async channel for backend → UI communication
    let (backend_tx, backend_rx) = async_channel::unbounded::<BackendEvent>();

    let state = Rc::new(RefCell::new(AppState::new(backend_tx)));

    // Build UI
    let widgets = ui::build_window(app);

    // Wire up the registration wizard
    {
        let state_clone = state.clone();
        widgets.register.next_button.connect_clicked(move |_| {
            app::advance_register_wizard(&state_clone);
        });
    }
    {
        let state_clone = state.clone();
        widgets.register.back_button.connect_clicked(move |_| {
            app::back_register_wizard(&state_clone);
        });
    }
    {
        let state_clone = state.clone();
        widgets.register.start_camera_button.connect_clicked(move |_| {
            app::start_screen_camera(&state_clone, CaptureScreen::Register);
        });
    }
    {
        let state_clone = state.clone();
        widgets.register.register_button.connect_clicked(move |_| {
            app::submit_register(&state_clone);
        });
    }

    // Wire up the login screen
    {
        let state_clone = state.clone();
        widgets.login.start_camera_button.connect_clicked(move |_| {
            app::start_screen_camera(&state_clone, CaptureScreen::Login);
        });
    }
    {
        let state_clone = state.clone();
        widgets.login.login_button.connect_clicked(move |_| {
            app::submit_login(&state_clone);
        });
    }

    // Click the CAPTCHA image to refresh the challenge
    {
        let state_clone = state.clone();
        let click = gtk4::GestureClick::new();
        click.connect_released(move |_, _, _, _| {
            app::dispatch_captcha(&state_clone);
        });
        widgets.login.captcha_picture.add_controller(click);
    }

    // Uppercase the CAPTCHA answer as it is typed
    widgets.login.captcha_entry.connect_changed(|entry| {
        let text = entry.text();
        let upper = text.to_uppercase();
        if text != upper {
            entry.set_text(&upper);
        }
    });

    // Wire up the voting screen
    {
        let state_clone = state.clone();
        widgets.vote.submit_button.connect_clicked(move |_| {
            app::submit_vote(&state_clone);
        });
    }

    // Wire up the results screen
    {
        let state_clone = state.clone();
        widgets.results.refresh_button.connect_clicked(move |_| {
            app::begin_results_probe(&state_clone);
        });
    }

    // Screen navigation: tear down off-screen cameras, run entry fetches
    {
        let state_clone = state.clone();
        widgets.stack.connect_visible_child_name_notify(move |_| {
            app::on_screen_changed(&state_clone);
        });
    }

    // Mandatory device release on window close
    {
        let state_clone = state.clone();
        widgets.window.connect_close_request(move |_| {
            app::stop_screen_camera(&state_clone, CaptureScreen::Register);
            app::stop_screen_camera(&state_clone, CaptureScreen::Login);
            gtk4::glib::Propagation::Proceed
        });
    }

    // Show the window, then hand the widget handles to the app state
    widgets.window.present();
    state.borrow_mut().ui = Some(widgets);

    // Attach backend event handler
    {
        let state_clone = state.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = backend_rx.recv().await {
                app::handle_backend_event(&state_clone, event);
            }
        });
    }

    // Initial CAPTCHA challenge for the login screen
    app::dispatch_captcha(&state);
}
