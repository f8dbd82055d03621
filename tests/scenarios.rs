//! End-to-end checks driving the public API with key events against a
//! file-backed database.

use lyst::app::state::NO_ITEMS;
use lyst::storage::{SqliteStorage, Storage};
use lyst::{handle_event, startup, Event, FocusPanel, Flow, SessionState};
use tempfile::TempDir;

fn open_store() -> (TempDir, SqliteStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::open(&dir.path().join("lyst.db")).unwrap();
    (dir, storage)
}

fn send(session: &mut SessionState, storage: &mut SqliteStorage, events: &[Event]) {
    for event in events {
        assert_eq!(handle_event(session, storage, event), Flow::Continue, "{event:?}");
    }
}

fn type_text(session: &mut SessionState, storage: &mut SqliteStorage, text: &str) {
    for c in text.chars() {
        send(session, storage, &[Event::Char(c)]);
    }
}

fn prompt(session: &mut SessionState, storage: &mut SqliteStorage, key: char, text: &str) {
    send(session, storage, &[Event::Char(key)]);
    assert!(session.has_modal());
    type_text(session, storage, text);
    send(session, storage, &[Event::Enter]);
    assert!(!session.has_modal());
}

fn item_texts(session: &SessionState) -> Vec<(String, i64)> {
    session
        .visible_items
        .iter()
        .map(|item| (item.text.clone(), item.sort_order))
        .collect()
}

#[test]
fn groceries_add_move_delete() {
    let (_dir, mut storage) = open_store();
    let mut session = SessionState::new();
    startup(&mut session, &mut storage, None).unwrap();

    prompt(&mut session, &mut storage, 'n', "Groceries");
    assert_eq!(session.focus, FocusPanel::Lists);
    assert_eq!(session.selected_list.as_ref().map(|l| l.title.as_str()), Some("Groceries"));

    send(&mut session, &mut storage, &[Event::Tab]);
    for text in ["Milk", "Eggs", "Bread"] {
        prompt(&mut session, &mut storage, 'a', text);
    }
    assert_eq!(
        item_texts(&session),
        vec![("Milk".to_string(), 1), ("Eggs".to_string(), 2), ("Bread".to_string(), 3)]
    );
    assert_eq!(session.item_highlight, 2);

    send(&mut session, &mut storage, &[Event::Char('[')]);
    assert_eq!(
        item_texts(&session),
        vec![("Milk".to_string(), 1), ("Bread".to_string(), 2), ("Eggs".to_string(), 3)]
    );
    assert_eq!(session.highlighted_item().map(|i| i.text.as_str()), Some("Bread"));

    send(&mut session, &mut storage, &[Event::Char('d'), Event::Char('y')]);
    assert_eq!(item_texts(&session), vec![("Milk".to_string(), 1), ("Eggs".to_string(), 2)]);
}

#[test]
fn startup_title_creates_and_focuses_empty_list() {
    let (_dir, mut storage) = open_store();
    let mut session = SessionState::new();
    startup(&mut session, &mut storage, Some("Today")).unwrap();

    let lists = storage.list_all().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].title, "Today");
    assert_eq!(session.selected_list_id(), Some(lists[0].id));
    assert_eq!(session.focus, FocusPanel::Items);

    let vm = session.compute_viewmodel();
    assert_eq!(vm.items.title, "Today");
    assert_eq!(vm.items.empty_state.map(|e| e.message).as_deref(), Some(NO_ITEMS));
}

#[test]
fn startup_reuses_existing_title() {
    let (_dir, mut storage) = open_store();
    let id = storage.create_list("Today").unwrap();
    storage.add_item(id, "Call Sam").unwrap();

    let mut session = SessionState::new();
    startup(&mut session, &mut storage, Some("  Today ")).unwrap();
    assert_eq!(storage.list_all().unwrap().len(), 1);
    assert_eq!(session.selected_list_id(), Some(id));
    assert_eq!(session.visible_items.len(), 1);
}

#[test]
fn confirm_modal_swallows_navigation() {
    let (_dir, mut storage) = open_store();
    let mut session = SessionState::new();
    startup(&mut session, &mut storage, Some("Chores")).unwrap();
    prompt(&mut session, &mut storage, 'a', "Dishes");
    prompt(&mut session, &mut storage, 'a', "Laundry");
    send(&mut session, &mut storage, &[Event::Up]);
    assert_eq!(session.item_highlight, 0);

    send(&mut session, &mut storage, &[Event::Char('d')]);
    assert!(session.has_modal());

    let before = (session.focus, session.item_highlight, session.list_highlight);
    send(
        &mut session,
        &mut storage,
        &[Event::Down, Event::Char('j'), Event::Tab, Event::Char('a'), Event::Char('q')],
    );
    assert!(session.has_modal());
    assert_eq!((session.focus, session.item_highlight, session.list_highlight), before);
    assert_eq!(session.visible_items.len(), 2);

    send(&mut session, &mut storage, &[Event::Char('n')]);
    assert!(!session.has_modal());
    assert_eq!(session.visible_items.len(), 2);

    send(&mut session, &mut storage, &[Event::Char('d'), Event::Esc]);
    assert_eq!(session.visible_items.len(), 2);
}

#[test]
fn interrupt_quits_and_drops_modal() {
    let (_dir, mut storage) = open_store();
    let mut session = SessionState::new();
    startup(&mut session, &mut storage, Some("Chores")).unwrap();
    prompt(&mut session, &mut storage, 'a', "Dishes");

    send(&mut session, &mut storage, &[Event::Char('d')]);
    assert_eq!(handle_event(&mut session, &mut storage, &Event::Interrupt), Flow::Quit);
    let list_id = session.selected_list_id().unwrap();
    assert_eq!(storage.list_items(list_id).unwrap().len(), 1);
}

#[test]
fn whitespace_prompt_does_nothing() {
    let (_dir, mut storage) = open_store();
    let mut session = SessionState::new();
    startup(&mut session, &mut storage, None).unwrap();

    prompt(&mut session, &mut storage, 'n', "   ");
    assert!(storage.list_all().unwrap().is_empty());
    assert_eq!(session.status_message, None);
}

#[test]
fn double_toggle_restores_state() {
    let (_dir, mut storage) = open_store();
    let mut session = SessionState::new();
    startup(&mut session, &mut storage, Some("Packing")).unwrap();
    prompt(&mut session, &mut storage, 'a', "Passport");

    send(&mut session, &mut storage, &[Event::Enter]);
    assert!(session.visible_items[0].checked);
    send(&mut session, &mut storage, &[Event::Char(' ')]);
    assert!(!session.visible_items[0].checked);
}

#[test]
fn deleting_selected_list_clears_items_panel() {
    let (_dir, mut storage) = open_store();
    let mut session = SessionState::new();
    startup(&mut session, &mut storage, Some("Old")).unwrap();
    prompt(&mut session, &mut storage, 'a', "stale");
    let list_id = session.selected_list_id().unwrap();

    send(&mut session, &mut storage, &[Event::Tab, Event::Char('d'), Event::Char('y')]);
    assert_eq!(session.selected_list, None);
    assert!(session.visible_items.is_empty());
    assert!(storage.list_items(list_id).unwrap().is_empty());
    assert!(storage.get_list(list_id).unwrap().is_none());
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("lyst.db");
    {
        let mut storage = SqliteStorage::open(&path).unwrap();
        let id = storage.create_list("Books").unwrap();
        let first = storage.add_item(id, "Dune").unwrap();
        storage.add_item(id, "Emma").unwrap();
        storage.toggle_item(first).unwrap();
    }

    let storage = SqliteStorage::open(&path).unwrap();
    let lists = storage.list_all().unwrap();
    assert_eq!(lists.len(), 1);
    let items = storage.list_items(lists[0].id).unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].checked);
    assert_eq!(items[1].text, "Emma");
}

#[test]
fn two_handles_share_one_file() {
    let (dir, mut first) = open_store();
    let mut second = SqliteStorage::open(&dir.path().join("lyst.db")).unwrap();

    let id = first.create_list("Shared").unwrap();
    second.add_item(id, "from second").unwrap();
    first.add_item(id, "from first").unwrap();

    let items = first.list_items(id).unwrap();
    let orders: Vec<i64> = items.iter().map(|i| i.sort_order).collect();
    assert_eq!(orders, vec![1, 2]);
    assert_eq!(items[1].text, "from first");
}
