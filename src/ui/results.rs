use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::api::TallyRow;

/// Handles for the results screen.
pub struct ResultsWidgets {
    pub page: gtk4::Box,
    pub message_label: gtk4::Label,
    pub list: gtk4::ListBox,
    pub updated_label: gtk4::Label,
    pub refresh_button: gtk4::Button,
}

/// Build the results screen: status message, tally list, manual re-check.
pub fn build_results_page() -> ResultsWidgets {
    let page = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    page.set_margin_start(16);
    page.set_margin_end(16);
    page.set_margin_top(12);
    page.set_margin_bottom(12);

    let title = gtk4::Label::new(Some("Election Results"));
    title.add_css_class("title-2");
    title.set_xalign(0.0);
    page.append(&title);

    let message_label = gtk4::Label::new(Some("Loading\u{2026}"));
    message_label.add_css_class("dim-label");
    message_label.set_wrap(true);
    message_label.set_xalign(0.0);
    message_label.set_margin_top(12);
    page.append(&message_label);

    let list = gtk4::ListBox::builder()
        .selection_mode(gtk4::SelectionMode::None)
        .build();
    list.add_css_class("boxed-list");
    list.set_margin_top(12);
    page.append(&list);

    let updated_label = gtk4::Label::new(None);
    updated_label.add_css_class("dim-label");
    updated_label.set_xalign(0.0);
    updated_label.set_margin_top(8);
    updated_label.set_visible(false);
    page.append(&updated_label);

    let refresh_button = gtk4::Button::builder().label("Check Again").build();
    refresh_button.set_margin_top(16);
    refresh_button.set_halign(gtk4::Align::Center);
    page.append(&refresh_button);

    ResultsWidgets {
        page,
        message_label,
        list,
        updated_label,
        refresh_button,
    }
}

/// Show a status or error message and drop any rendered tallies.
pub fn show_message(results: &ResultsWidgets, text: &str) {
    super::clear_list(&results.list);
    results.updated_label.set_visible(false);
    results.message_label.set_text(text);
    results.message_label.set_visible(true);
}

/// Render the tally collection. An empty collection is a distinct
/// "no votes yet" state, not an error.
pub fn render_tallies(results: &ResultsWidgets, rows: &[TallyRow], fetched_at: &str) {
    super::clear_list(&results.list);

    if rows.is_empty() {
        show_message(results, "No votes recorded yet.");
        return;
    }

    results.message_label.set_visible(false);
    for row in rows {
        let action_row = libadwaita::ActionRow::builder()
            .title(&row.candidate_name)
            .build();
        let votes_label = gtk4::Label::new(Some(&format!("{} votes", row.votes)));
        votes_label.add_css_class("dim-label");
        action_row.add_suffix(&votes_label);
        results.list.append(&action_row);
    }

    results.updated_label.set_text(&format!("Fetched at {fetched_at}"));
    results.updated_label.set_visible(true);
}
