use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Handles for the login screen.
pub struct LoginWidgets {
    pub page: gtk4::Box,
    pub name_entry: libadwaita::EntryRow,
    pub password_entry: libadwaita::PasswordEntryRow,
    pub captcha_picture: gtk4::Picture,
    pub captcha_entry: libadwaita::EntryRow,
    pub start_camera_button: gtk4::Button,
    pub login_button: gtk4::Button,
    pub preview: gtk4::Picture,
}

/// Build the login screen: credentials, CAPTCHA challenge, live camera.
pub fn build_login_page() -> LoginWidgets {
    let page = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    page.set_margin_start(16);
    page.set_margin_end(16);
    page.set_margin_top(12);
    page.set_margin_bottom(12);

    let credentials_group = libadwaita::PreferencesGroup::new();
    credentials_group.set_title("Credentials");

    let name_entry = libadwaita::EntryRow::builder().title("Name").build();
    let password_entry = libadwaita::PasswordEntryRow::builder()
        .title("Password")
        .build();
    credentials_group.add(&name_entry);
    credentials_group.add(&password_entry);
    page.append(&credentials_group);

    // --- CAPTCHA section ---
    let captcha_group = libadwaita::PreferencesGroup::new();
    captcha_group.set_title("CAPTCHA");
    captcha_group.set_margin_top(12);

    let captcha_picture = gtk4::Picture::new();
    captcha_picture.set_size_request(320, 120);
    captcha_picture.set_halign(gtk4::Align::Center);
    captcha_picture.add_css_class("card");

    let refresh_hint = gtk4::Label::new(Some("Click image to refresh CAPTCHA"));
    refresh_hint.add_css_class("dim-label");

    let captcha_entry = libadwaita::EntryRow::builder()
        .title("Enter CAPTCHA")
        .build();

    let captcha_box = gtk4::Box::new(gtk4::Orientation::Vertical, 6);
    captcha_box.append(&captcha_picture);
    captcha_box.append(&refresh_hint);

    let captcha_row = libadwaita::PreferencesRow::new();
    captcha_row.set_activatable(false);
    captcha_row.set_child(Some(&captcha_box));
    captcha_group.add(&captcha_row);
    captcha_group.add(&captcha_entry);
    page.append(&captcha_group);

    // --- Camera section ---
    let preview = gtk4::Picture::new();
    preview.set_size_request(-1, 240);
    preview.set_margin_top(12);
    preview.add_css_class("card");
    page.append(&preview);

    let button_row = gtk4::Box::new(gtk4::Orientation::Horizontal, 10);
    button_row.set_margin_top(12);
    button_row.set_halign(gtk4::Align::Center);

    let start_camera_button = gtk4::Button::builder().label("Start Camera").build();
    let login_button = gtk4::Button::builder().label("Login").build();
    login_button.add_css_class("suggested-action");

    button_row.append(&start_camera_button);
    button_row.append(&login_button);
    page.append(&button_row);

    LoginWidgets {
        page,
        name_entry,
        password_entry,
        captcha_picture,
        captcha_entry,
        start_camera_button,
        login_button,
        preview,
    }
}
