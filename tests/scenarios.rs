//! End-to-end admission scenarios.

use u_replan::cascade::{evaluate, Action, CascadeConfig, RuleId};
use u_replan::explain::{explain, ConfidenceColor};
use u_replan::risk::RiskSignals;
use u_replan::sprint::{ActiveItem, ItemStatus, Priority, SprintState, WorkItemCandidate};

fn ticket(sp: u32, priority: Priority) -> WorkItemCandidate {
    WorkItemCandidate::new("Partner API", sp, priority)
}

fn full_sprint() -> SprintState {
    SprintState::new(8.0, 28.0, 30.0)
}

fn calm() -> RiskSignals {
    RiskSignals::new(20.0, 10.0, -5.0).with_free_capacity(2.0)
}

#[test]
fn scenario_a_full_sprint_nothing_to_swap_defers() {
    let r = evaluate(
        &ticket(5, Priority::Medium),
        &full_sprint(),
        &[],
        &calm(),
        &CascadeConfig::default(),
    );
    assert_eq!(r.action(), Action::Defer);
    assert_eq!(r.rule(), RuleId::NoOptionLeft);
    assert!(r.target_item().is_none());
}

#[test]
fn scenario_b_low_priority_item_is_swapped() {
    let items = vec![ActiveItem::new(
        "1",
        "X",
        5.0,
        Priority::Low,
        ItemStatus::parse("To Do"),
    )];
    let r = evaluate(
        &ticket(5, Priority::Medium),
        &full_sprint(),
        &items,
        &calm(),
        &CascadeConfig::default(),
    );
    assert_eq!(r.action(), Action::Swap);
    assert_eq!(r.target_item().map(|t| t.id.as_str()), Some("1"));
    assert_eq!(r.impact_number("switch_cost_days"), Some(0.5));
}

#[test]
fn scenario_c_oversized_ticket_splits_regardless_of_risk() {
    let sprint = SprintState::new(3.0, 0.0, 30.0);
    for risk in [
        RiskSignals::new(0.0, 0.0, 0.0),
        RiskSignals::new(99.0, 0.0, 0.0),
        RiskSignals::new(0.0, 99.0, -99.0),
    ] {
        let r = evaluate(
            &ticket(15, Priority::Medium),
            &sprint,
            &[],
            &risk,
            &CascadeConfig::default(),
        );
        assert_eq!(r.action(), Action::Split);
    }
}

#[test]
fn scenario_d_critical_without_todo_items_overloads() {
    let items = vec![
        ActiveItem::new("1", "A", 3.0, Priority::Low, ItemStatus::InProgress),
        ActiveItem::new("2", "B", 5.0, Priority::Lowest, ItemStatus::InReview),
        ActiveItem::new("3", "C", 2.0, Priority::Lowest, ItemStatus::Done),
    ];
    let r = evaluate(
        &ticket(3, Priority::Critical),
        &full_sprint(),
        &items,
        &calm(),
        &CascadeConfig::default(),
    );
    assert_eq!(r.action(), Action::Overload);
    assert!(r.target_item().is_none());
    assert_eq!(
        r.impact().get("overload").and_then(|v| v.as_flag()),
        Some(true)
    );
}

#[test]
fn emergency_bypass_never_defers() {
    let sprint = SprintState::new(1.0, 28.0, 30.0);
    let risk = RiskSignals::new(95.0, 0.0, 0.0);
    for items in [
        vec![],
        vec![ActiveItem::new("1", "A", 3.0, Priority::High, ItemStatus::ToDo)],
    ] {
        let r = evaluate(
            &ticket(5, Priority::Critical),
            &sprint,
            &items,
            &risk,
            &CascadeConfig::default(),
        );
        assert!(matches!(r.action(), Action::ForceSwap | Action::Overload));
    }
}

#[test]
fn oversized_rule_precedes_risk_rule() {
    let r = evaluate(
        &ticket(13, Priority::High),
        &SprintState::new(5.0, 0.0, 30.0),
        &[],
        &RiskSignals::new(80.0, 80.0, -40.0),
        &CascadeConfig::default(),
    );
    assert_eq!(r.rule(), RuleId::OversizedTicket);
}

#[test]
fn unknown_labels_degrade_safely() {
    // unknown priority ranks as Medium; unknown status pays the full penalty
    let items = vec![
        ActiveItem::new("1", "Odd", 5.0, Priority::parse("P2"), ItemStatus::parse("Blocked")),
        ActiveItem::new("2", "Plain", 9.0, Priority::Low, ItemStatus::parse("todo")),
    ];
    let r = evaluate(
        &ticket(5, Priority::parse("whatever")),
        &full_sprint(),
        &items,
        &calm(),
        &CascadeConfig::default(),
    );
    assert_eq!(r.action(), Action::Swap);
    assert_eq!(r.target_item().unwrap().id, "2");
}

#[test]
fn explanation_colour_bands() {
    let c = ticket(3, Priority::Medium);
    let sprint = SprintState::new(8.0, 0.0, 30.0);
    let cases = [
        (RiskSignals::new(56.0, 0.0, 0.0), ConfidenceColor::Red),
        (RiskSignals::new(31.0, 0.0, -5.0), ConfidenceColor::Yellow),
        (RiskSignals::new(10.0, 10.0, -2.0), ConfidenceColor::Green),
    ];
    for (risk, expected) in cases {
        let r = evaluate(&c, &sprint, &[], &risk, &CascadeConfig::default());
        assert_eq!(explain(&r, &risk, &c).confidence_color, expected);
    }
}

#[test]
fn split_numbers_agree_between_layers() {
    let c = ticket(20, Priority::Medium);
    let risk = RiskSignals::default();
    let r = evaluate(
        &c,
        &SprintState::new(4.0, 0.0, 30.0),
        &[],
        &risk,
        &CascadeConfig::default(),
    );
    let card = explain(&r, &risk, &c);
    let analysis = r.impact_number("analysis_sp").unwrap();
    let implementation = r.impact_number("implementation_sp").unwrap();
    assert!(card
        .risk_summary
        .contains(&format!("Analysis slice: {analysis} SP")));
    assert!(card
        .risk_summary
        .contains(&format!("Implementation slice: {implementation} SP")));
    assert!(r.action_plan()[0].contains(&format!("({analysis} SP)")));
}
