//! Editing Session Tests
//!
//! Drive a session the way the terminal front end does: keys in, text and
//! dropdown state out, with known names coming from a recipe library.

use std::fs;
use std::time::{Duration, Instant};

use pantry::core::buffer::Buffer;
use pantry::core::input::Key;
use pantry::core::library::Library;
use pantry::core::lookup::LookupSequencer;
use pantry::core::names::NameSet;
use pantry::core::session::{EditorSession, KeyOutcome};

fn type_str(session: &mut EditorSession, text: &str) {
    for ch in text.chars() {
        session.handle_key(&Key::Char(ch));
    }
}

fn items(session: &EditorSession) -> Vec<String> {
    session
        .autocomplete()
        .map(|state| state.items.clone())
        .unwrap_or_default()
}

// =============================================================================
// LIBRARY-BACKED COMPLETION
// =============================================================================

#[test]
fn complete_from_library_and_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let library_dir = dir.path().join("recipes");
    fs::create_dir(&library_dir).expect("library dir");
    fs::write(
        library_dir.join("bruschetta.cook"),
        "Top @bread{} with @cherry tomatoes{200%g} and @basil.\nUse a #baking sheet{}.",
    )
    .expect("write");

    let library = Library::load(&library_dir).expect("load library");
    let path = dir.path().join("salad.cook");
    let buffer = Buffer::open_or_create(&path).expect("buffer");
    let mut session = EditorSession::new(buffer, library.known_names());

    type_str(&mut session, "Halve the @che");
    // `@cherry tomatoes{...}` also contributes the bare word `cherry`
    assert_eq!(items(&session), vec!["che", "cherry", "cherry tomatoes"]);
    session.handle_key(&Key::Down);
    session.handle_key(&Key::Down);
    assert_eq!(
        session.handle_key(&Key::Enter),
        KeyOutcome::Accepted("cherry tomatoes".to_string())
    );
    assert_eq!(session.text(), "Halve the @cherry tomatoes{}");

    // Cursor sits before the braces: type a quantity inside them
    session.handle_key(&Key::Right);
    type_str(&mut session, "300%g");
    session.handle_key(&Key::Right);
    type_str(&mut session, " on a #bak");
    assert_eq!(items(&session), vec!["bak", "baking", "baking sheet"]);
    session.handle_key(&Key::Down);
    session.handle_key(&Key::Down);
    session.handle_key(&Key::Tab);
    assert_eq!(
        session.text(),
        "Halve the @cherry tomatoes{300%g} on a #baking sheet{}"
    );

    session.save().expect("save");
    assert_eq!(
        fs::read_to_string(&path).expect("read back"),
        "Halve the @cherry tomatoes{300%g} on a #baking sheet{}"
    );
}

#[test]
fn inside_braces_no_dropdown() {
    let mut session = EditorSession::new(
        Buffer::from_string("@flour{2"),
        NameSet::from_known(["flour"], Vec::<String>::new()),
    );
    session.click(8);
    assert!(session.autocomplete().is_none());
    // Names come from the whole text, so the half-typed `fl` is not one
    session.click(3);
    assert_eq!(items(&session), vec!["flour"]);
}

#[test]
fn dismissed_dropdown_reopens_on_next_edit() {
    let known = NameSet::from_known(["salt", "sage"], Vec::<String>::new());
    let mut session = EditorSession::new(Buffer::new(), known);

    type_str(&mut session, "@s");
    assert_eq!(session.handle_key(&Key::Esc), KeyOutcome::Dismissed);
    assert!(session.autocomplete().is_none());

    type_str(&mut session, "a");
    assert_eq!(items(&session), vec!["sa", "sage", "salt"]);
    assert_eq!(session.autocomplete().map(|s| s.selected_index), Some(0));
}

#[test]
fn switching_trigger_resets_selection() {
    let known = NameSet::from_known(["pepper", "paprika"], ["pan", "pot"]);
    let mut session = EditorSession::new(Buffer::new(), known);

    type_str(&mut session, "@p");
    session.handle_key(&Key::Down);
    session.handle_key(&Key::Down);
    assert_eq!(session.autocomplete().map(|s| s.selected_index), Some(2));

    type_str(&mut session, " in #p");
    assert_eq!(items(&session), vec!["p", "pan", "pot"]);
    assert_eq!(session.autocomplete().map(|s| s.selected_index), Some(0));
}

// =============================================================================
// DEBOUNCED KNOWN-NAME REFRESH
// =============================================================================

#[test]
fn burst_of_edits_issues_one_lookup() {
    let start = Instant::now();
    let mut lookups = LookupSequencer::new(Duration::from_millis(300));
    let mut session = EditorSession::new(Buffer::new(), NameSet::new());

    let mut issued = Vec::new();
    for (i, ch) in "@saf".chars().enumerate() {
        let now = start + Duration::from_millis(50 * i as u64);
        if session.handle_key(&Key::Char(ch)) == KeyOutcome::Edited {
            lookups.touch(now);
        }
        issued.extend(lookups.poll(now));
    }
    assert!(issued.is_empty());

    let ticket = lookups
        .poll(start + Duration::from_millis(500))
        .expect("lookup due after quiet period");
    assert!(lookups.accept(ticket));
    session.set_known_names(NameSet::from_known(["saffron"], Vec::<String>::new()));
    assert_eq!(items(&session), vec!["saf", "saffron"]);
}
