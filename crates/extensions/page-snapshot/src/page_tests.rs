use super::*;
use formpilot_protocols::ControlKind;
use tempfile::TempDir;

fn signup_page() -> SnapshotPage {
    SnapshotPage::new("https://example.com/signup")
        .with_form("form#signup")
        .with_field(SnapshotField::select("country", &["US", "CA"], "US"))
        .with_field(SnapshotField::text("email", "").with_attribute("data-kind", "contact"))
        .with_field(SnapshotField::checkbox("newsletter", false))
        .with_field(SnapshotField::text("state", "").with_text("State"))
}

#[test]
fn test_find_field_missing_returns_none() {
    let page = signup_page();
    assert!(page.find_field("nope").unwrap().is_none());
}

#[test]
fn test_find_field_ambiguous() {
    let page = signup_page().with_field(SnapshotField::text("email", "dup"));
    let err = page.find_field("email").err().unwrap();
    assert_eq!(
        err,
        PageError::AmbiguousField {
            name: "email".to_string(),
            count: 2
        }
    );
}

#[test]
fn test_field_reads() {
    let page = signup_page();
    let country = page.find_field("country").unwrap().unwrap();
    assert_eq!(country.value().unwrap(), "US");
    assert_eq!(country.kind().unwrap(), ControlKind::Select);

    let email = page.find_field("email").unwrap().unwrap();
    assert_eq!(email.attribute("data-kind").unwrap().as_deref(), Some("contact"));
    assert_eq!(email.attribute("missing").unwrap(), None);
    assert_eq!(email.property("value").unwrap(), Some(Value::String(String::new())));

    let state = page.find_field("state").unwrap().unwrap();
    assert_eq!(state.text().unwrap(), "State");
}

#[test]
fn test_type_and_clear() {
    let page = signup_page();
    let email = page.find_field("email").unwrap().unwrap();
    email.type_text("a@b.com").unwrap();
    assert_eq!(email.value().unwrap(), "a@b.com");
    email.clear().unwrap();
    assert_eq!(email.value().unwrap(), "");
    assert_eq!(page.interactions().len(), 2);
}

#[test]
fn test_select_option_unknown_value() {
    let page = signup_page();
    let country = page.find_field("country").unwrap().unwrap();
    let err = country.select_option("XX").unwrap_err();
    assert!(matches!(err, PageError::OptionNotFound { .. }));
    country.select_option("CA").unwrap();
    assert_eq!(page.field("country").unwrap().value, "CA");
}

#[test]
fn test_click_toggles_checkbox() {
    let page = signup_page();
    let newsletter = page.find_field("newsletter").unwrap().unwrap();
    newsletter.click().unwrap();
    assert!(newsletter.is_checked().unwrap());
    newsletter.click().unwrap();
    assert!(!newsletter.is_checked().unwrap());
}

#[test]
fn test_detached_field_fails() {
    let page = SnapshotPage::new("about:blank").with_field(SnapshotField::text("gone", "x").detached());
    let field = page.find_field("gone").unwrap().unwrap();
    assert!(matches!(field.value(), Err(PageError::Interaction(_))));
    assert!(field.clear().is_err());
    assert!(page.interactions().is_empty());
}

#[test]
fn test_execute_script_applies_effects() {
    let page = signup_page();
    page.execute_script(&DomScript::SetDisplay {
        field: "state".to_string(),
        visible: false,
    })
    .unwrap();
    page.execute_script(&DomScript::SetDisabled {
        field: "email".to_string(),
        disabled: true,
    })
    .unwrap();

    assert!(page.field("state").unwrap().hidden);
    assert!(page.field("email").unwrap().disabled);
    assert_eq!(page.executed_scripts().len(), 2);
}

#[test]
fn test_execute_script_unknown_field() {
    let page = signup_page();
    let result = page.execute_script(&DomScript::SetDisplay {
        field: "ghost".to_string(),
        visible: true,
    });
    assert!(matches!(result, Err(PageError::Script(_))));
    assert!(page.executed_scripts().is_empty());
}

#[test]
fn test_has_form() {
    let page = signup_page();
    assert!(page.has_form(None).unwrap());
    assert!(page.has_form(Some("form#signup")).unwrap());
    assert!(!page.has_form(Some("form#login")).unwrap());
    assert!(!SnapshotPage::new("about:blank").has_form(None).unwrap());
}

#[test]
fn test_from_json_defaults() {
    let json = r#"{
        "location": "https://example.com",
        "forms": ["form"],
        "fields": [
            {"name": "email"},
            {"name": "agree", "type": "checkbox", "checked": true}
        ]
    }"#;
    let page = SnapshotPage::from_json(json).unwrap();
    assert_eq!(page.current_location(), "https://example.com");
    let email = page.field("email").unwrap();
    assert_eq!(email.tag, "input");
    assert_eq!(email.kind(), ControlKind::Text);
    assert_eq!(page.field("agree").unwrap().kind(), ControlKind::Checkbox);
}

#[test]
fn test_save_and_load_roundtrip_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("page.json");

    let page = signup_page();
    page.find_field("email").unwrap().unwrap().type_text("x@y.io").unwrap();
    page.save(&path).unwrap();

    let reloaded = SnapshotPage::load(&path).unwrap();
    assert_eq!(reloaded.field("email").unwrap().value, "x@y.io");
    assert_eq!(reloaded.snapshot().forms, vec!["form#signup"]);
}
