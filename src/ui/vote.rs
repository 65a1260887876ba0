use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::api::Candidate;
use crate::app::AppState;

/// Handles for the voting screen. Candidate rows are built dynamically when
/// the list arrives, so the per-candidate widgets live behind Rc<RefCell<>>.
pub struct VoteWidgets {
    pub page: gtk4::Box,
    pub name_entry: libadwaita::EntryRow,
    pub list: gtk4::ListBox,
    pub empty_label: gtk4::Label,
    pub submit_button: gtk4::Button,
    pub checks: Rc<RefCell<Vec<(String, gtk4::CheckButton)>>>,
    pub symbols: Rc<RefCell<HashMap<String, gtk4::Picture>>>,
}

/// Build the voting screen: voter name, candidate list, submit.
pub fn build_vote_page() -> VoteWidgets {
    let page = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    page.set_margin_start(16);
    page.set_margin_end(16);
    page.set_margin_top(12);
    page.set_margin_bottom(12);

    let name_group = libadwaita::PreferencesGroup::new();
    name_group.set_title("Cast Your Vote");

    let name_entry = libadwaita::EntryRow::builder().title("Your Name").build();
    name_group.add(&name_entry);
    page.append(&name_group);

    let list = gtk4::ListBox::builder()
        .selection_mode(gtk4::SelectionMode::None)
        .build();
    list.add_css_class("boxed-list");
    list.set_margin_top(12);
    page.append(&list);

    let empty_label = gtk4::Label::new(Some("Loading candidates\u{2026}"));
    empty_label.add_css_class("dim-label");
    empty_label.set_margin_top(12);
    page.append(&empty_label);

    let submit_button = gtk4::Button::builder().label("Submit Vote").build();
    submit_button.add_css_class("suggested-action");
    submit_button.set_margin_top(16);
    submit_button.set_halign(gtk4::Align::Center);
    page.append(&submit_button);

    VoteWidgets {
        page,
        name_entry,
        list,
        empty_label,
        submit_button,
        checks: Rc::new(RefCell::new(Vec::new())),
        symbols: Rc::new(RefCell::new(HashMap::new())),
    }
}

/// Rebuild the candidate rows. Each row carries a grouped radio button whose
/// toggle records the selection in the vote form.
pub fn populate_candidates(
    vote: &VoteWidgets,
    candidates: &[Candidate],
    state: &Rc<RefCell<AppState>>,
) {
    super::clear_list(&vote.list);
    vote.checks.borrow_mut().clear();
    vote.symbols.borrow_mut().clear();

    if candidates.is_empty() {
        vote.empty_label.set_text("No candidates available.");
        vote.empty_label.set_visible(true);
        return;
    }
    vote.empty_label.set_visible(false);

    let mut group_anchor: Option<gtk4::CheckButton> = None;
    for candidate in candidates {
        let row = libadwaita::ActionRow::builder()
            .title(&candidate.name)
            .activatable(true)
            .build();

        let symbol = gtk4::Picture::new();
        symbol.set_size_request(48, 48);
        row.add_prefix(&symbol);

        let check = gtk4::CheckButton::new();
        check.set_valign(gtk4::Align::Center);
        match group_anchor {
            Some(ref anchor) => check.set_group(Some(anchor)),
            None => group_anchor = Some(check.clone()),
        }
        row.add_suffix(&check);
        row.set_activatable_widget(Some(&check));

        let id = candidate.id.clone();
        let state_for_toggle = state.clone();
        check.connect_toggled(move |check| {
            if check.is_active() {
                state_for_toggle.borrow_mut().vote_form.candidate_id = Some(id.clone());
            }
        });

        vote.list.append(&row);
        vote.checks.borrow_mut().push((candidate.id.clone(), check));
        vote.symbols
            .borrow_mut()
            .insert(candidate.id.clone(), symbol);
    }
}
