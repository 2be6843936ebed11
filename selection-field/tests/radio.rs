use std::time::Duration;

use selection_field::{
    Conflict, FieldEventKind, FieldId, FieldOptions, FieldValue, GroupId, MemoryHost, MemoryInput,
    SelectionFields, StatusName,
};

fn abc_group(options: [FieldOptions; 3]) -> (SelectionFields<MemoryHost>, Vec<FieldId>) {
    let host = MemoryHost::new()
        .with("a", MemoryInput::radio("letter", "a"))
        .with("b", MemoryInput::radio("letter", "b"))
        .with("c", MemoryInput::radio("letter", "c"));
    let mut fields = SelectionFields::new(host);
    let ids = ["a", "b", "c"]
        .into_iter()
        .zip(options)
        .map(|(el, opts)| fields.bind(el, opts).unwrap())
        .collect();
    (fields, ids)
}

fn plain_group() -> (SelectionFields<MemoryHost>, Vec<FieldId>) {
    abc_group([FieldOptions::new(), FieldOptions::new(), FieldOptions::new()])
}

// ============================================================================
// get / set
// ============================================================================

#[test]
fn test_set_is_visible_from_every_member() {
    let (mut fields, ids) = plain_group();

    fields.field(ids[0]).unwrap().set("b");

    for id in &ids {
        assert_eq!(fields.field(*id).unwrap().get(), FieldValue::from("b"));
    }
    assert!(fields.host().input("b").unwrap().checked);
    assert!(!fields.host().input("a").unwrap().checked);
}

#[test]
fn test_set_unknown_value_selects_nothing() {
    let (mut fields, ids) = plain_group();
    fields.field(ids[0]).unwrap().set("a");

    fields.field(ids[1]).unwrap().set("z");

    for id in &ids {
        let field = fields.field(*id).unwrap();
        assert_eq!(field.get(), FieldValue::Empty);
        assert_eq!(field.prev_value(), FieldValue::Empty);
    }
}

#[test]
fn test_set_refreshes_prev_value_across_group() {
    let (mut fields, ids) = plain_group();

    fields.field(ids[2]).unwrap().set("a");

    for id in &ids {
        assert_eq!(fields.field(*id).unwrap().prev_value(), FieldValue::from("a"));
    }
    let events: Vec<_> = fields.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].field, ids[2]);
    assert_eq!(events[1].kind, FieldEventKind::AfterSet(FieldValue::from("a")));
}

#[test]
fn test_initial_prev_value_from_checked_member() {
    let host = MemoryHost::new()
        .with("x", MemoryInput::radio("pick", "x"))
        .with("y", MemoryInput::radio("pick", "y").checked(true));
    let mut fields = SelectionFields::new(host);
    let x = fields.bind("x", FieldOptions::new()).unwrap();
    let y = fields.bind("y", FieldOptions::new()).unwrap();

    assert_eq!(fields.field(x).unwrap().prev_value(), FieldValue::from("y"));
    assert_eq!(fields.field(y).unwrap().get(), FieldValue::from("y"));
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_groups_split_by_form_scope() {
    let host = MemoryHost::new()
        .with("a1", MemoryInput::radio("color", "red").form("first"))
        .with("b1", MemoryInput::radio("color", "red").form("second"));
    let mut fields = SelectionFields::new(host);
    let a = fields.bind("a1", FieldOptions::new()).unwrap();
    let b = fields.bind("b1", FieldOptions::new()).unwrap();

    fields.field(a).unwrap().set("red");

    assert_eq!(fields.field(b).unwrap().get(), FieldValue::Empty);
    let group_a = fields.field(a).unwrap().group().cloned();
    let group_b = fields.field(b).unwrap().group().cloned();
    assert_ne!(group_a, group_b);
}

#[test]
fn test_explicit_group_overrides_name() {
    let host = MemoryHost::new()
        .with("p", MemoryInput::radio("one", "p"))
        .with("q", MemoryInput::radio("two", "q"));
    let mut fields = SelectionFields::new(host);
    let p = fields.bind("p", FieldOptions::new().radio_group("pq")).unwrap();
    let q = fields.bind("q", FieldOptions::new().radio_group("pq")).unwrap();

    fields.field(p).unwrap().set("q");

    assert_eq!(fields.field(p).unwrap().get(), FieldValue::from("q"));
    assert_eq!(fields.field(q).unwrap().group(), Some(&GroupId::Explicit("pq".into())));
}

#[test]
fn test_nameless_radio_is_alone() {
    let host = MemoryHost::new()
        .with("solo", MemoryInput::radio("", "on"))
        .with("other", MemoryInput::radio("", "on"));
    let mut fields = SelectionFields::new(host);
    let solo = fields.bind("solo", FieldOptions::new()).unwrap();
    let other = fields.bind("other", FieldOptions::new()).unwrap();

    fields.field(solo).unwrap().set("on");

    assert_eq!(fields.field(solo).unwrap().get(), FieldValue::from("on"));
    assert_eq!(fields.field(other).unwrap().get(), FieldValue::Empty);
    assert_eq!(fields.field(solo).unwrap().key(), "solo");
}

// ============================================================================
// Required merging and validation
// ============================================================================

#[test]
fn test_required_propagates_from_later_member() {
    let (mut fields, ids) = abc_group([
        FieldOptions::new(),
        FieldOptions::new(),
        FieldOptions::new().required(true),
    ]);

    for id in &ids {
        assert!(fields.field(*id).unwrap().has_status(StatusName::Require));
    }
    assert!(fields.drain_events().is_empty());
}

#[test]
fn test_required_adopted_by_later_member() {
    let (mut fields, ids) = abc_group([
        FieldOptions::new().required(true),
        FieldOptions::new().required(false),
        FieldOptions::new(),
    ]);

    for id in &ids {
        assert!(fields.field(*id).unwrap().has_status(StatusName::Require));
    }
}

#[test]
fn test_required_group_validation() {
    let (mut fields, ids) = abc_group([
        FieldOptions::new().required(true),
        FieldOptions::new(),
        FieldOptions::new(),
    ]);

    assert!(!fields.field(ids[1]).unwrap().validate());
    for id in &ids {
        assert!(fields.field(*id).unwrap().has_status(StatusName::Error));
    }

    fields.host_mut().click("c");
    assert!(fields.field(ids[0]).unwrap().validate());
    for id in &ids {
        assert!(!fields.field(*id).unwrap().has_status(StatusName::Error));
    }
}

// ============================================================================
// Status propagation
// ============================================================================

#[test]
fn test_disable_propagates_with_single_event() {
    let (mut fields, ids) = plain_group();

    fields.field(ids[0]).unwrap().disable();

    for id in &ids {
        assert!(fields.field(*id).unwrap().has_status(StatusName::Disable));
    }
    for el in ["a", "b", "c"] {
        assert!(fields.host().has_class(&format!("{el}-field"), "disable"));
    }

    let updates: Vec<_> = fields
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e.kind, FieldEventKind::StatusUpdate { .. }))
        .collect();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].field, ids[0]);
}

#[test]
fn test_hover_stays_on_one_member() {
    let (mut fields, ids) = plain_group();

    fields.field(ids[1]).unwrap().status(StatusName::Hover, true);

    assert!(fields.field(ids[1]).unwrap().has_status(StatusName::Hover));
    assert!(!fields.field(ids[0]).unwrap().has_status(StatusName::Hover));
    assert!(!fields.field(ids[2]).unwrap().has_status(StatusName::Hover));
}

#[test]
fn test_late_member_adopts_group_status() {
    let host = MemoryHost::new()
        .with("a", MemoryInput::radio("letter", "a"))
        .with("b", MemoryInput::radio("letter", "b"));
    let mut fields = SelectionFields::new(host);
    let a = fields.bind("a", FieldOptions::new()).unwrap();
    fields.field(a).unwrap().status(StatusName::Warn, true);

    let b = fields.bind("b", FieldOptions::new()).unwrap();

    assert!(fields.field(b).unwrap().has_status(StatusName::Warn));
}

// ============================================================================
// Dirty and conflicts
// ============================================================================

#[test]
fn test_dirty_marks_whole_group_once() {
    let (mut fields, ids) = plain_group();
    fields.host_mut().click("b");

    fields.field(ids[2]).unwrap().check_dirty();

    for id in &ids {
        assert!(fields.field(*id).unwrap().is_dirty());
    }
    assert_eq!(fields.dirty_fields(), ids);
    let dirty_events = fields
        .drain_events()
        .into_iter()
        .filter(|e| e.kind == FieldEventKind::Dirty)
        .count();
    assert_eq!(dirty_events, 1);

    fields.field(ids[0]).unwrap().clear_dirty();
    assert!(fields.dirty_fields().is_empty());
    assert!(!fields.host().has_class("c-field", "dirty"));
}

#[test]
fn test_unchecked_group_starts_clean() {
    let (mut fields, ids) = plain_group();

    fields.field(ids[0]).unwrap().check_dirty();

    assert!(!fields.field(ids[0]).unwrap().is_dirty());
    assert!(fields.drain_events().is_empty());
}

#[test]
fn test_conflicts() {
    let (mut fields, ids) = plain_group();
    assert_eq!(fields.field(ids[0]).unwrap().conflicts("c"), None);

    fields.host_mut().click("a");
    fields.field(ids[0]).unwrap().check_dirty();

    let field = fields.field(ids[1]).unwrap();
    assert_eq!(field.conflicts("a"), None);
    assert_eq!(
        field.conflicts("c"),
        Some(Conflict {
            key: "letter".into(),
            v_old: FieldValue::from("a"),
            v_new: FieldValue::from("c"),
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_member_joining_dirty_group_keeps_committed_value() {
    let host = MemoryHost::new()
        .with("a", MemoryInput::radio("letter", "a"))
        .with("b", MemoryInput::radio("letter", "b"))
        .with("c", MemoryInput::radio("letter", "c"));
    let mut fields = SelectionFields::new(host);
    let a = fields.bind("a", FieldOptions::new()).unwrap();
    let b = fields.bind("b", FieldOptions::new()).unwrap();
    fields.host_mut().click("a");
    fields.field(a).unwrap().check_dirty();

    let c = fields.bind("c", FieldOptions::new()).unwrap();

    for id in [a, b, c] {
        let field = fields.field(id).unwrap();
        assert!(field.is_dirty());
        assert_eq!(field.prev_value(), FieldValue::Empty);
    }
    assert!(fields.host().has_class("c-field", "dirty"));

    fields.field(c).unwrap().check_dirty();
    tokio::time::advance(Duration::from_millis(300)).await;

    assert_eq!(fields.poll_timers(), 0);
    assert_eq!(fields.dirty_fields(), vec![a, b, c]);
    assert!(fields.field(c).unwrap().conflicts("b").is_some());
}
