use super::*;
use formpilot_page_snapshot::{Interaction, SnapshotField, SnapshotPage};
use formpilot_protocols::{ConditionOperator, Scalar};

fn address_page(country: &str) -> SnapshotPage {
    SnapshotPage::new("https://example.com/address")
        .with_form("form")
        .with_field(SnapshotField::select("country", &["US", "CA"], country))
        .with_field(SnapshotField::text("state", ""))
        .with_field(SnapshotField::text("zip", "stale").disabled())
        .with_field(SnapshotField::checkbox("newsletter", false))
        .with_field(SnapshotField::text("email", "a@b.com"))
}

fn show_state_when_us() -> Dependency {
    Dependency::new("state", Action::Show)
        .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US"))
}

/// Page whose scripting capability is unavailable.
struct ScriptlessPage(SnapshotPage);

impl PageModel for ScriptlessPage {
    fn find_field(&self, name: &str) -> Result<Option<Box<dyn FieldHandle + '_>>, PageError> {
        self.0.find_field(name)
    }

    fn execute_script(&self, _script: &DomScript) -> Result<serde_json::Value, PageError> {
        Err(PageError::Script("scripting disabled".to_string()))
    }

    fn current_location(&self) -> String {
        self.0.current_location()
    }

    fn has_form(&self, selector: Option<&str>) -> Result<bool, PageError> {
        self.0.has_form(selector)
    }
}

#[test]
fn test_show_applied_when_condition_holds() {
    let page = address_page("US");
    let outcomes = DependencyResolver::resolve(&page, &[show_state_when_us()]);

    assert_eq!(
        outcomes,
        vec![DependencyOutcome {
            target: "state".to_string(),
            applied: true,
            error: None,
        }]
    );
    assert_eq!(
        page.executed_scripts(),
        vec![DomScript::SetDisplay {
            field: "state".to_string(),
            visible: true
        }]
    );
}

#[test]
fn test_action_not_invoked_when_condition_fails() {
    let page = address_page("CA");
    let outcomes = DependencyResolver::resolve(&page, &[show_state_when_us()]);

    assert!(!outcomes[0].applied);
    assert!(outcomes[0].error.is_none());
    assert!(page.executed_scripts().is_empty());
    assert!(page.interactions().is_empty());
}

#[test]
fn test_and_requires_every_condition() {
    let page = address_page("US");
    let dep = Dependency::new("state", Action::Hide)
        .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US"))
        .with_condition(Condition::new("newsletter", ConditionOperator::IsChecked));

    let outcomes = DependencyResolver::resolve(&page, &[dep]);
    assert!(!outcomes[0].applied);
}

#[test]
fn test_or_requires_any_condition() {
    let page = address_page("US");
    let dep = Dependency::new("state", Action::Hide)
        .with_logic(Logic::Or)
        .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("CA"))
        .with_condition(Condition::new("newsletter", ConditionOperator::IsNotChecked));

    let outcomes = DependencyResolver::resolve(&page, &[dep]);
    assert!(outcomes[0].applied);
    assert!(page.field("state").unwrap().hidden);
}

#[test]
fn test_logic_truth_table() {
    let cases = [
        (Logic::And, "US", true, true),
        (Logic::And, "US", false, false),
        (Logic::And, "CA", true, false),
        (Logic::And, "CA", false, false),
        (Logic::Or, "US", true, true),
        (Logic::Or, "US", false, true),
        (Logic::Or, "CA", true, true),
        (Logic::Or, "CA", false, false),
    ];

    for (logic, country, subscribed, expected) in cases {
        let page = SnapshotPage::new("about:blank")
            .with_field(SnapshotField::text("country", country))
            .with_field(SnapshotField::checkbox("newsletter", subscribed))
            .with_field(SnapshotField::text("state", ""));
        let dep = Dependency::new("state", Action::Clear)
            .with_logic(logic)
            .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US"))
            .with_condition(Condition::new("newsletter", ConditionOperator::IsChecked));

        let outcomes = DependencyResolver::resolve(&page, &[dep]);
        assert_eq!(
            outcomes[0].applied, expected,
            "{:?} country={} subscribed={}",
            logic, country, subscribed
        );
    }
}

#[test]
fn test_missing_source_field_makes_condition_false() {
    let page = address_page("US");
    let dep = Dependency::new("state", Action::Show)
        .with_condition(Condition::new("ghost", ConditionOperator::IsEmpty));

    let outcomes = DependencyResolver::resolve(&page, &[dep]);
    assert!(!outcomes[0].applied);
    assert!(outcomes[0].error.is_none());
}

#[test]
fn test_missing_target_recorded_and_resolution_continues() {
    let page = address_page("US");
    let missing = Dependency::new("ghost", Action::Show)
        .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US"));

    let outcomes = DependencyResolver::resolve(&page, &[missing, show_state_when_us()]);
    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].applied);
    assert_eq!(outcomes[0].error.as_deref(), Some("Field not found: ghost"));
    assert!(outcomes[1].applied);
}

#[test]
fn test_empty_conditions_reported() {
    let page = address_page("US");
    let outcomes = DependencyResolver::resolve(&page, &[Dependency::new("state", Action::Show)]);
    assert!(!outcomes[0].applied);
    assert!(outcomes[0].error.as_ref().unwrap().contains("no conditions"));
}

#[test]
fn test_enable_clears_field_first() {
    let page = address_page("US");
    let dep = Dependency::new("zip", Action::Enable)
        .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US"));

    let outcomes = DependencyResolver::resolve(&page, &[dep]);
    assert!(outcomes[0].applied);

    let zip = page.field("zip").unwrap();
    assert_eq!(zip.value, "");
    assert!(!zip.disabled);
    assert_eq!(
        page.interactions(),
        vec![Interaction::Clear {
            field: "zip".to_string()
        }]
    );
}

#[test]
fn test_disable_does_not_clear() {
    let page = address_page("US");
    let dep = Dependency::new("email", Action::Disable)
        .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US"));

    DependencyResolver::resolve(&page, &[dep]);
    let email = page.field("email").unwrap();
    assert!(email.disabled);
    assert_eq!(email.value, "a@b.com");
}

#[test]
fn test_set_value_dispatch() {
    let page = address_page("US");
    let deps = vec![
        Dependency::new("newsletter", Action::SetValue(Scalar::Bool(true)))
            .with_condition(Condition::new("country", ConditionOperator::IsNotEmpty)),
        Dependency::new("country", Action::SetValue(Scalar::from("CA")))
            .with_condition(Condition::new("email", ConditionOperator::Contains).with_value("@")),
        Dependency::new("state", Action::SetValue(Scalar::from("Ontario")))
            .with_condition(Condition::new("email", ConditionOperator::IsNotEmpty)),
    ];

    let outcomes = DependencyResolver::resolve(&page, &deps);
    assert!(outcomes.iter().all(|o| o.applied));
    assert!(page.field("newsletter").unwrap().checked);
    assert_eq!(page.field("country").unwrap().value, "CA");
    assert_eq!(page.field("state").unwrap().value, "Ontario");
}

#[test]
fn test_single_static_pass() {
    // The second dependency sees country=CA written by the first, but the
    // first is not re-evaluated after the change.
    let page = address_page("US");
    let deps = vec![
        show_state_when_us(),
        Dependency::new("country", Action::SetValue(Scalar::from("CA")))
            .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US")),
        Dependency::new("state", Action::Hide)
            .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("CA")),
    ];

    let outcomes = DependencyResolver::resolve(&page, &deps);
    assert_eq!(
        outcomes.iter().map(|o| o.applied).collect::<Vec<_>>(),
        vec![true, true, true]
    );
    assert_eq!(page.executed_scripts().len(), 2);
    assert!(page.field("state").unwrap().hidden);
}

#[test]
fn test_set_value_unknown_option_is_action_failure() {
    let page = address_page("US");
    let dep = Dependency::new("country", Action::SetValue(Scalar::from("MX")))
        .with_condition(Condition::new("email", ConditionOperator::IsNotEmpty));

    let outcomes = DependencyResolver::resolve(&page, &[dep]);
    assert!(!outcomes[0].applied);
    assert!(outcomes[0].error.as_ref().unwrap().contains("Action on 'country' failed"));
}

#[test]
fn test_unchecking_radio_is_action_failure() {
    let page = address_page("US").with_field(SnapshotField::radio("plan", true));
    let dep = Dependency::new("plan", Action::SetValue(Scalar::Bool(false)))
        .with_condition(Condition::new("email", ConditionOperator::IsNotEmpty));

    let outcomes = DependencyResolver::resolve(&page, &[dep]);
    assert!(!outcomes[0].applied);
    assert!(outcomes[0].error.as_ref().unwrap().contains("Action on 'plan' failed"));
    assert!(page.field("plan").unwrap().checked);
}

#[test]
fn test_script_failure_is_isolated() {
    let page = ScriptlessPage(address_page("US"));
    let deps = vec![
        show_state_when_us(),
        Dependency::new("email", Action::Clear)
            .with_condition(Condition::new("country", ConditionOperator::Equals).with_value("US")),
    ];

    let outcomes = DependencyResolver::resolve(&page, &deps);
    assert!(!outcomes[0].applied);
    assert!(outcomes[0].error.as_ref().unwrap().contains("scripting disabled"));
    assert!(outcomes[1].applied);
    assert_eq!(page.0.field("email").unwrap().value, "");
}

#[test]
fn test_ambiguous_target_reported() {
    let page = address_page("US").with_field(SnapshotField::text("state", "dup"));
    let outcomes = DependencyResolver::resolve(&page, &[show_state_when_us()]);
    assert!(!outcomes[0].applied);
    assert!(outcomes[0].error.as_ref().unwrap().contains("matches 2 controls"));
}
