pub mod login;
pub mod register;
pub mod results;
pub mod vote;

use gtk4::prelude::*;
use gtk4::{gdk, glib};
use image::RgbImage;
use libadwaita::prelude::*;

pub use login::LoginWidgets;
pub use register::RegisterWidgets;
pub use results::ResultsWidgets;
pub use vote::VoteWidgets;

/// Handles for every screen plus the window shell.
pub struct Widgets {
    pub window: libadwaita::ApplicationWindow,
    pub stack: libadwaita::ViewStack,
    pub register: RegisterWidgets,
    pub login: LoginWidgets,
    pub vote: VoteWidgets,
    pub results: ResultsWidgets,
}

/// Build the single-window shell: a header-bar view switcher over one stack
/// page per screen (the original app's nav bar plus routes).
pub fn build_window(app: &libadwaita::Application) -> Widgets {
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title("Ballot Booth")
        .default_width(480)
        .default_height(680)
        .build();

    let stack = libadwaita::ViewStack::new();

    let register = register::build_register_page();
    let page = stack.add_titled(&scrolled(&register.page), Some("register"), "Register");
    page.set_icon_name(Some("contact-new-symbolic"));

    let login = login::build_login_page();
    let page = stack.add_titled(&scrolled(&login.page), Some("login"), "Login");
    page.set_icon_name(Some("dialog-password-symbolic"));

    let vote = vote::build_vote_page();
    let page = stack.add_titled(&scrolled(&vote.page), Some("vote"), "Vote");
    page.set_icon_name(Some("emblem-ok-symbolic"));

    let results = results::build_results_page();
    let page = stack.add_titled(&scrolled(&results.page), Some("results"), "Results");
    page.set_icon_name(Some("view-list-symbolic"));

    let switcher = libadwaita::ViewSwitcher::builder()
        .stack(&stack)
        .policy(libadwaita::ViewSwitcherPolicy::Wide)
        .build();

    let header = libadwaita::HeaderBar::new();
    header.set_title_widget(Some(&switcher));

    let toolbar_view = libadwaita::ToolbarView::new();
    toolbar_view.add_top_bar(&header);
    toolbar_view.set_content(Some(&stack));
    window.set_content(Some(&toolbar_view));

    Widgets {
        window,
        stack,
        register,
        login,
        vote,
        results,
    }
}

fn scrolled(child: &gtk4::Box) -> gtk4::ScrolledWindow {
    gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(child)
        .build()
}

/// Blocking user alert, this client's equivalent of window.alert.
pub fn show_alert(parent: &libadwaita::ApplicationWindow, heading: &str, body: &str) {
    let dialog = libadwaita::AlertDialog::builder()
        .heading(heading)
        .body(body)
        .build();
    dialog.add_response("ok", "OK");

    let parent_widget: Option<&gtk4::Widget> = Some(parent.upcast_ref());
    dialog.choose(parent_widget, None::<&gtk4::gio::Cancellable>, |_response_id| {});
}

/// Paint a decoded RGB frame into a picture widget.
pub fn set_picture_rgb(picture: &gtk4::Picture, frame: &RgbImage) {
    let bytes = glib::Bytes::from(frame.as_raw().as_slice());
    let texture = gdk::MemoryTexture::new(
        frame.width() as i32,
        frame.height() as i32,
        gdk::MemoryFormat::R8g8b8,
        &bytes,
        frame.width() as usize * 3,
    );
    picture.set_paintable(Some(&texture));
}

/// Paint encoded image bytes (PNG/JPEG) into a picture widget.
pub fn set_picture_encoded(picture: &gtk4::Picture, bytes: &[u8]) {
    match gdk::Texture::from_bytes(&glib::Bytes::from(bytes)) {
        Ok(texture) => picture.set_paintable(Some(&texture)),
        Err(e) => log::error!("Image decode failed: {e}"),
    }
}

pub fn clear_picture(picture: &gtk4::Picture) {
    picture.set_paintable(None::<&gdk::Paintable>);
}

/// Drop all rows from a list box.
pub fn clear_list(list: &gtk4::ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}
