use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Handles for the registration screen.
pub struct RegisterWidgets {
    pub page: gtk4::Box,
    pub step_stack: gtk4::Stack,
    pub name_entry: libadwaita::EntryRow,
    pub email_entry: libadwaita::EntryRow,
    pub phone_entry: libadwaita::EntryRow,
    pub password_entry: libadwaita::PasswordEntryRow,
    pub next_button: gtk4::Button,
    pub back_button: gtk4::Button,
    pub start_camera_button: gtk4::Button,
    pub register_button: gtk4::Button,
    pub preview: gtk4::Picture,
    pub snapshot_box: gtk4::Box,
    pub snapshot: gtk4::Picture,
}

/// Build the two-step registration wizard: voter info, then face capture.
pub fn build_register_page() -> RegisterWidgets {
    let page = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    page.set_margin_start(16);
    page.set_margin_end(16);
    page.set_margin_top(12);
    page.set_margin_bottom(12);

    let step_stack = gtk4::Stack::new();
    step_stack.set_transition_type(gtk4::StackTransitionType::SlideLeftRight);

    // --- Step 1: voter info ---
    let info_box = gtk4::Box::new(gtk4::Orientation::Vertical, 0);

    let info_group = libadwaita::PreferencesGroup::new();
    info_group.set_title("Voter Details");

    let name_entry = libadwaita::EntryRow::builder().title("Name").build();
    let email_entry = libadwaita::EntryRow::builder().title("Email").build();
    let phone_entry = libadwaita::EntryRow::builder()
        .title("10-digit Phone Number")
        .build();
    let password_entry = libadwaita::PasswordEntryRow::builder()
        .title("Password")
        .build();

    info_group.add(&name_entry);
    info_group.add(&email_entry);
    info_group.add(&phone_entry);
    info_group.add(&password_entry);

    let next_button = gtk4::Button::builder().label("Next").build();
    next_button.add_css_class("suggested-action");
    next_button.set_margin_top(12);

    info_box.append(&info_group);
    info_box.append(&next_button);
    step_stack.add_named(&info_box, Some("info"));

    // --- Step 2: face capture ---
    let capture_box = gtk4::Box::new(gtk4::Orientation::Vertical, 0);

    let preview = gtk4::Picture::new();
    preview.set_size_request(-1, 240);
    preview.add_css_class("card");
    capture_box.append(&preview);

    let button_row = gtk4::Box::new(gtk4::Orientation::Horizontal, 10);
    button_row.set_margin_top(12);
    button_row.set_halign(gtk4::Align::Center);

    let start_camera_button = gtk4::Button::builder().label("Start Camera").build();
    let register_button = gtk4::Button::builder().label("Register").build();
    register_button.add_css_class("suggested-action");
    let back_button = gtk4::Button::builder().label("Back").build();

    button_row.append(&start_camera_button);
    button_row.append(&register_button);
    button_row.append(&back_button);
    capture_box.append(&button_row);

    // Display-only echo of the captured photo
    let snapshot_box = gtk4::Box::new(gtk4::Orientation::Vertical, 6);
    snapshot_box.set_margin_top(12);
    snapshot_box.set_visible(false);

    let snapshot_label = gtk4::Label::new(Some("Captured Image:"));
    snapshot_label.set_xalign(0.0);
    let snapshot = gtk4::Picture::new();
    snapshot.set_size_request(-1, 160);

    snapshot_box.append(&snapshot_label);
    snapshot_box.append(&snapshot);
    capture_box.append(&snapshot_box);

    step_stack.add_named(&capture_box, Some("capture"));

    page.append(&step_stack);

    RegisterWidgets {
        page,
        step_stack,
        name_entry,
        email_entry,
        phone_entry,
        password_entry,
        next_button,
        back_button,
        start_camera_button,
        register_button,
        preview,
        snapshot_box,
        snapshot,
    }
}

/// Empty all four entry rows (after a successful registration).
pub fn clear_entries(register: &RegisterWidgets) {
    register.name_entry.set_text("");
    register.email_entry.set_text("");
    register.phone_entry.set_text("");
    register.password_entry.set_text("");
}
