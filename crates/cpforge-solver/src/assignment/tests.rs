//! Tests for Assignment against the recording test network.

use cpforge_config::{EnvironmentMode, MissingElementPolicy, SolverConfig};
use cpforge_core::{CpForgeError, IntVarId, VariableKind, VariableNetwork};
use cpforge_test::fixtures::{optional_interval, task_interval, two_int_vars};
use cpforge_test::network::NetworkCall;

use super::*;

#[test]
fn test_store_then_restore_scenario() {
    let (mut network, x, y) = two_int_vars();
    let mut snapshot = Assignment::new();
    snapshot.add_int_var(x);
    snapshot.add_int_var(y);

    network.assign(x, 3);
    network.assign(y, 7);
    snapshot.store(&network);
    assert_eq!(snapshot.value(x).unwrap(), 3);
    assert_eq!(snapshot.value(y).unwrap(), 7);

    network.assign(x, 0);
    network.assign(y, 0);
    snapshot.restore(&mut network).unwrap();

    assert_eq!((network.int_min(x), network.int_max(x)), (3, 3));
    assert_eq!((network.int_min(y), network.int_max(y)), (7, 7));
}

#[test]
fn test_round_trip_keeps_captured_value() {
    let (mut network, x, _) = two_int_vars();
    network.assign(x, 6);

    let mut snapshot = Assignment::new();
    snapshot.add_int_var(x);
    snapshot.store(&network);
    let captured = snapshot.value(x).unwrap();
    snapshot.restore(&mut network).unwrap();

    assert_eq!(network.int_min(x), captured);
    assert_eq!(network.int_max(x), captured);
}

#[test]
fn test_unbound_variable_round_trips_its_range() {
    let (mut network, x, _) = two_int_vars();
    let mut snapshot = Assignment::new();
    snapshot.add_int_var(x);
    snapshot.store(&network);

    assert!(!snapshot.bound(x).unwrap());
    assert_eq!(snapshot.min(x).unwrap(), 0);
    assert_eq!(snapshot.max(x).unwrap(), 10);

    network.assign(x, 2);
    snapshot.restore(&mut network).unwrap();
    assert_eq!((network.int_min(x), network.int_max(x)), (0, 10));
}

#[test]
fn test_interval_scenario() {
    let (mut network, _, _) = two_int_vars();
    let task = task_interval(&mut network);

    let mut snapshot = Assignment::new();
    snapshot.add_interval_var(task);
    snapshot.store(&network);

    assert_eq!(snapshot.performed_min(task).unwrap(), 1);
    assert_eq!(snapshot.performed_max(task).unwrap(), 1);
    assert_eq!(snapshot.start_min(task).unwrap(), 0);
    assert_eq!(snapshot.start_max(task).unwrap(), 100);
    assert_eq!(snapshot.duration_value(task).unwrap(), 5);
    assert_eq!(snapshot.end_min(task).unwrap(), 5);
    assert_eq!(snapshot.end_max(task).unwrap(), 105);

    network.interval_var_mut(task).start = (10, 20);
    let before = network.interval_var(task).clone();

    snapshot.deactivate_interval(task).unwrap();
    network.clear_calls();
    snapshot.restore(&mut network).unwrap();

    assert_eq!(network.interval_var(task), &before);
    assert_eq!(network.write_count(), 0);
}

#[test]
fn test_interval_restore_sets_performed_before_bounds() {
    let (mut network, _, _) = two_int_vars();
    let task = task_interval(&mut network);

    let mut snapshot = Assignment::new();
    snapshot.add_interval_var(task);
    snapshot.store(&network);
    network.clear_calls();
    snapshot.restore(&mut network).unwrap();

    assert_eq!(
        network.calls(),
        &[
            NetworkCall::Freeze,
            NetworkCall::SetPerformed(task, true),
            NetworkCall::SetStartRange(task, 0, 100),
            NetworkCall::SetDurationRange(task, 5, 5),
            NetworkCall::SetEndRange(task, 5, 105),
            NetworkCall::Unfreeze,
        ]
    );
}

#[test]
fn test_absent_interval_restores_status_only() {
    let (mut network, _, _) = two_int_vars();
    let slot = optional_interval(&mut network, "slot");
    network.interval_var_mut(slot).performed = (0, 0);

    let mut snapshot = Assignment::new();
    snapshot.add_interval_var(slot);
    snapshot.store(&network);
    network.clear_calls();
    snapshot.restore(&mut network).unwrap();

    assert_eq!(
        network.calls(),
        &[
            NetworkCall::Freeze,
            NetworkCall::SetPerformed(slot, false),
            NetworkCall::Unfreeze,
        ]
    );
}

#[test]
fn test_deactivation_suppresses_restore() {
    let (mut network, x, _) = two_int_vars();
    network.assign(x, 5);

    let mut snapshot = Assignment::new();
    snapshot.add_int_var(x);
    snapshot.store(&network);
    snapshot.deactivate(x).unwrap();
    assert!(!snapshot.activated(x).unwrap());

    network.assign(x, 8);
    snapshot.restore(&mut network).unwrap();
    assert_eq!(network.int_min(x), 8);

    snapshot.activate(x).unwrap();
    snapshot.restore(&mut network).unwrap();
    assert_eq!(network.int_min(x), 5);
}

#[test]
fn test_restore_writes_only_while_frozen() {
    let (mut network, x, y) = two_int_vars();
    let task = task_interval(&mut network);

    let mut snapshot = Assignment::new();
    snapshot.add_int_vars([x, y]);
    snapshot.add_interval_var(task);
    snapshot.store(&network);
    snapshot.restore(&mut network).unwrap();

    let calls = network.calls();
    assert_eq!(calls.first(), Some(&NetworkCall::Freeze));
    assert_eq!(calls.last(), Some(&NetworkCall::Unfreeze));
    assert_eq!(network.unfrozen_writes(), 0);
    assert!(!network.is_frozen());
}

#[test]
fn test_failed_restore_still_unfreezes() {
    let (mut network, x, y) = two_int_vars();
    let mut snapshot = Assignment::new();
    snapshot.add_int_vars([x, y]);
    snapshot.store(&network);

    network.fail_writes_to_int(x);
    network.clear_calls();
    let err = snapshot.restore(&mut network).unwrap_err();

    assert!(matches!(err, CpForgeError::Infeasible(_)));
    assert!(!network.is_frozen());
    assert_eq!(
        network.calls(),
        &[
            NetworkCall::Freeze,
            NetworkCall::SetIntRange(x, 0, 10),
            NetworkCall::Unfreeze,
        ]
    );
}

#[test]
fn test_clone_is_independent() {
    let (mut network, x, _) = two_int_vars();
    network.assign(x, 4);

    let mut original = Assignment::new();
    original.add_int_var(x);
    original.store(&network);

    let mut copy = original.clone();
    copy.set_value(x, 9).unwrap();

    assert_eq!(original.value(x).unwrap(), 4);
    assert_eq!(copy.value(x).unwrap(), 9);
}

#[test]
fn test_partial_copy_merges_common_variables() {
    let mut network = cpforge_test::TestNetwork::new();
    let v1 = network.add_int_var("v1", 0, 10);
    let v2 = network.add_int_var("v2", 0, 10);
    let v3 = network.add_int_var("v3", 0, 10);

    let mut a = Assignment::new();
    a.add_int_vars([v1, v2]);
    a.set_value(v1, 1).unwrap();
    a.set_value(v2, 2).unwrap();

    let mut b = Assignment::new();
    b.add_int_vars([v2, v3]);
    b.set_value(v2, 20).unwrap();
    b.set_value(v3, 30).unwrap();
    b.deactivate(v2).unwrap();

    a.copy_from(&b);

    assert_eq!(a.value(v1).unwrap(), 1);
    assert_eq!(a.value(v2).unwrap(), 20);
    assert!(!a.activated(v2).unwrap());
    assert!(!a.contains_int_var(v3));
    assert_eq!(b.value(v3).unwrap(), 30);
}

#[test]
fn test_objective_is_exclusive() {
    let (network, x, y) = two_int_vars();
    let mut snapshot = Assignment::new();
    snapshot.add_objective(x).unwrap();
    snapshot.set_objective_value(4);

    let err = snapshot.add_objective(y).unwrap_err();
    assert_eq!(err, CpForgeError::ObjectiveAlreadySet { existing: x });
    assert_eq!(snapshot.objective(), Some(x));
    assert_eq!(snapshot.objective_value().unwrap(), 4);

    snapshot.store(&network);
    assert_eq!(snapshot.objective_min(), 0);
    assert_eq!(snapshot.objective_max(), 10);
}

#[test]
fn test_value_of_unbound_variable_is_an_error() {
    let (mut network, x, _) = two_int_vars();
    let task = task_interval(&mut network);

    let mut snapshot = Assignment::new();
    snapshot.add_int_var(x);
    snapshot.add_interval_var(task);
    snapshot.add_objective(x).unwrap();
    snapshot.store(&network);

    assert!(!snapshot.bound(x).unwrap());
    assert_eq!(
        snapshot.value(x).unwrap_err(),
        CpForgeError::NotBound {
            kind: VariableKind::Int,
            index: x.index(),
            field: "value",
            min: 0,
            max: 10,
        }
    );
    assert!(matches!(
        snapshot.objective_value(),
        Err(CpForgeError::NotBound { .. })
    ));
    assert!(!snapshot.objective_bound());
    assert_eq!((snapshot.objective_min(), snapshot.objective_max()), (0, 10));

    assert!(matches!(
        snapshot.start_value(task),
        Err(CpForgeError::NotBound { field: "start", .. })
    ));
    assert!(snapshot.end_value(task).is_err());
    assert_eq!(snapshot.duration_value(task).unwrap(), 5);
    assert_eq!(snapshot.performed_value(task).unwrap(), 1);
}

#[test]
fn test_objective_defaults_without_objective() {
    let mut snapshot = Assignment::new();
    snapshot.set_objective_value(7);
    snapshot.deactivate_objective();

    assert!(!snapshot.has_objective());
    assert_eq!(snapshot.objective(), None);
    assert_eq!(snapshot.objective_min(), 0);
    assert_eq!(snapshot.objective_max(), 0);
    assert_eq!(snapshot.objective_value().unwrap(), 0);
    assert!(snapshot.objective_bound());
    assert!(snapshot.activated_objective());
}

#[test]
fn test_objective_is_not_restored() {
    let (mut network, x, _) = two_int_vars();
    network.assign(x, 3);

    let mut snapshot = Assignment::new();
    snapshot.add_objective(x).unwrap();
    snapshot.store(&network);
    network.clear_calls();
    snapshot.restore(&mut network).unwrap();

    assert_eq!(network.write_count(), 0);
}

#[test]
fn test_copy_objective_only_when_both_have_one() {
    let (_, x, y) = two_int_vars();

    let mut source = Assignment::new();
    source.add_objective(x).unwrap();
    source.set_objective_range(2, 6);
    source.deactivate_objective();

    let mut bare = Assignment::new();
    bare.copy_from(&source);
    assert!(!bare.has_objective());

    let mut target = Assignment::new();
    target.add_objective(y).unwrap();
    target.copy_from(&source);
    assert_eq!(target.objective(), Some(y));
    assert_eq!(target.objective_min(), 2);
    assert_eq!(target.objective_max(), 6);
    assert!(!target.activated_objective());
}

#[test]
fn test_untracked_lookup_fails_by_default() {
    let (_, x, _) = two_int_vars();
    let mut snapshot = Assignment::new();

    assert_eq!(
        snapshot.value(x).unwrap_err(),
        CpForgeError::VariableNotTracked {
            kind: VariableKind::Int,
            index: x.index()
        }
    );
    assert!(snapshot.set_value(x, 1).is_err());
    assert!(snapshot.is_empty());
}

#[test]
fn test_insert_policy_creates_on_write() {
    let config = SolverConfig::new().with_missing_element_policy(MissingElementPolicy::Insert);
    let mut snapshot = Assignment::from_config(&config);
    let x = IntVarId::new(0);

    assert!(snapshot.value(x).is_err());
    snapshot.set_value(x, 4).unwrap();
    assert!(snapshot.contains_int_var(x));
    assert_eq!(snapshot.value(x).unwrap(), 4);
}

#[test]
fn test_asserted_mode_validates_before_writing() {
    let (mut network, x, _) = two_int_vars();
    let config = SolverConfig::new().with_environment_mode(EnvironmentMode::FullAssert);
    let mut snapshot = Assignment::from_config(&config);
    snapshot.add_int_var(x);
    snapshot.set_range(x, 8, 2).unwrap();

    let err = snapshot.restore(&mut network).unwrap_err();
    assert!(matches!(err, CpForgeError::InvalidElement(_)));
    assert!(network.calls().is_empty());
}

#[test]
fn test_fast_assert_skips_inactive_elements() {
    let (mut network, x, y) = two_int_vars();
    let config = SolverConfig::new().with_environment_mode(EnvironmentMode::FastAssert);
    let mut snapshot = Assignment::from_config(&config);
    snapshot.add_int_var(x);
    snapshot.add_int_var(y);
    snapshot.set_range(x, 8, 2).unwrap();
    snapshot.deactivate(x).unwrap();
    snapshot.set_value(y, 4).unwrap();

    snapshot.restore(&mut network).unwrap();
    assert_eq!((network.int_min(y), network.int_max(y)), (4, 4));
}

#[test]
fn test_full_assert_checks_inactive_elements_and_objective() {
    let (mut network, x, y) = two_int_vars();
    let config = SolverConfig::new().with_environment_mode(EnvironmentMode::FullAssert);
    let mut snapshot = Assignment::from_config(&config);
    snapshot.add_int_var(x);
    snapshot.set_range(x, 8, 2).unwrap();
    snapshot.deactivate(x).unwrap();

    let err = snapshot.restore(&mut network).unwrap_err();
    assert!(matches!(err, CpForgeError::InvalidElement(_)));
    assert!(network.calls().is_empty());

    snapshot.set_range(x, 2, 8).unwrap();
    snapshot.add_objective(y).unwrap();
    snapshot.set_objective_range(5, 1);
    assert!(matches!(
        snapshot.restore(&mut network),
        Err(CpForgeError::InvalidElement(_))
    ));
    assert!(snapshot.validate().is_ok());
}

#[test]
fn test_non_asserted_modes_skip_validation() {
    for mode in [EnvironmentMode::NonReproducible, EnvironmentMode::Reproducible] {
        let (mut network, x, _) = two_int_vars();
        let config = SolverConfig::new().with_environment_mode(mode);
        let mut snapshot = Assignment::from_config(&config);
        snapshot.add_int_var(x);
        snapshot.set_range(x, 8, 2).unwrap();
        snapshot.deactivate(x).unwrap();

        snapshot.restore(&mut network).unwrap();
        assert_eq!(
            network.calls(),
            &[NetworkCall::Freeze, NetworkCall::Unfreeze][..]
        );
    }
}

#[test]
fn test_size_and_clear() {
    let (mut network, x, y) = two_int_vars();
    let task = task_interval(&mut network);

    let mut snapshot = Assignment::new();
    snapshot.add_int_vars([x, y, x]);
    snapshot.add_interval_vars([task]);
    snapshot.add_objective(x).unwrap();
    assert_eq!(snapshot.size(), 3);
    assert_eq!(snapshot.int_var_container().len(), 2);
    assert_eq!(snapshot.interval_var_container().len(), 1);

    snapshot.clear();
    assert_eq!(snapshot.size(), 0);
    assert!(!snapshot.has_objective());
    assert!(snapshot.is_empty());
}

#[test]
fn test_debug_string() {
    let (mut network, x, y) = two_int_vars();
    let task = task_interval(&mut network);
    network.assign(x, 3);

    let mut snapshot = Assignment::new();
    snapshot.add_int_vars([x, y]);
    snapshot.add_interval_var(task);
    snapshot.add_objective(x).unwrap();
    snapshot.store(&network);
    snapshot.deactivate(y).unwrap();

    assert_eq!(
        snapshot.debug_string(&network),
        "Assignment(x (3) | y (...) | task (start = 0..100, duration = 5, status = 1) | (3))"
    );
}

#[test]
fn test_save_and_load_by_name() {
    let (mut network, x, y) = two_int_vars();
    let task = task_interval(&mut network);
    network.assign(x, 3);
    network.assign(y, 7);

    let mut original = Assignment::new();
    original.add_int_vars([x, y]);
    original.add_interval_var(task);
    original.add_objective(y).unwrap();
    original.store(&network);
    original.deactivate(y).unwrap();

    let record = original.save(&network);
    assert_eq!(record.len(), 3);
    assert_eq!(record.objective.as_ref().map(|o| o.name.as_str()), Some("y"));

    let yaml = record.to_yaml_string().unwrap();
    let parsed = AssignmentRecord::from_yaml_str(&yaml).unwrap();
    assert_eq!(parsed, record);

    let mut loaded = Assignment::new();
    loaded.add_int_vars([x, y]);
    loaded.add_interval_var(task);
    loaded.add_objective(y).unwrap();
    assert_eq!(loaded.load(&parsed, &network), 4);

    assert_eq!(loaded.value(x).unwrap(), 3);
    assert_eq!(loaded.value(y).unwrap(), 7);
    assert!(!loaded.activated(y).unwrap());
    assert_eq!(loaded.start_max(task).unwrap(), 100);
    assert_eq!(loaded.objective_value().unwrap(), 7);
}

#[test]
fn test_save_skips_empty_and_duplicate_names() {
    let mut network = cpforge_test::TestNetwork::new();
    let a = network.add_int_var("a", 0, 5);
    let unnamed = network.add_int_var("", 0, 5);
    let twin = network.add_int_var("a", 0, 5);

    let mut snapshot = Assignment::new();
    snapshot.add_int_vars([a, unnamed, twin]);
    snapshot.store(&network);

    let record = snapshot.save(&network);
    assert_eq!(record.int_vars.len(), 1);
    assert_eq!(record.int_vars[0].name, "a");
}

#[test]
fn test_load_ignores_unknown_names() {
    let (network, x, _) = two_int_vars();
    let record = AssignmentRecord::from_toml_str(
        r#"
        [[int_vars]]
        name = "x"
        min = 2
        max = 2

        [[int_vars]]
        name = "z"
        min = 1
        max = 1
        active = false
        "#,
    )
    .unwrap();

    let mut snapshot = Assignment::new();
    snapshot.add_int_var(x);
    assert_eq!(snapshot.load(&record, &network), 1);
    assert_eq!(snapshot.value(x).unwrap(), 2);
    assert!(snapshot.activated(x).unwrap());
}

#[test]
fn test_record_file_round_trip() {
    let (network, x, _) = two_int_vars();
    let mut snapshot = Assignment::new();
    snapshot.add_int_var(x);
    snapshot.set_value(x, 9).unwrap();
    let record = snapshot.save(&network);

    let dir = std::env::temp_dir();
    let yaml_path = dir.join(format!("cpforge-record-{}.yaml", std::process::id()));
    let toml_path = dir.join(format!("cpforge-record-{}.toml", std::process::id()));

    record.save_to_file(&yaml_path).unwrap();
    record.save_to_file(&toml_path).unwrap();
    let from_yaml = AssignmentRecord::load_from_file(&yaml_path).unwrap();
    let from_toml = AssignmentRecord::load_from_file(&toml_path).unwrap();
    let _ = std::fs::remove_file(&yaml_path);
    let _ = std::fs::remove_file(&toml_path);

    assert_eq!(from_yaml, record);
    assert_eq!(from_toml, record);
}

#[test]
fn test_record_parse_error() {
    let err = AssignmentRecord::from_yaml_str("int_vars: 12").unwrap_err();
    assert!(matches!(err, CpForgeError::Record(_)));
}
