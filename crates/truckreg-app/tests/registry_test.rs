//! End-to-end registry behaviour against real files in a temp directory

use chrono::NaiveDate;
use std::fs;
use tempfile::{tempdir, TempDir};
use truckreg_app::repository::{open_registry, save_session};
use truckreg_app::Config;
use truckreg_types::{
    AddRecordError, HashScheme, LoginError, RegisterError, ServiceError, TruckFields,
};

fn config_in(dir: &TempDir) -> Config {
    Config {
        data_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    }
}

fn t1() -> TruckFields {
    TruckFields::new(
        "T1",
        "Bob",
        "D1",
        "555",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .with_weight(12.5)
    .with_area("North")
}

#[test]
fn test_alice_scenario() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    let mut registry = open_registry(&config).unwrap();

    registry.register("alice", "pw1").unwrap();

    let err = registry.register("alice", "pw2").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Register(RegisterError::DuplicateUsername(_))
    ));

    registry.login("alice", "pw1").unwrap();
    registry.add_record(t1()).unwrap();

    let records = registry.list_records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].truck_number, "T1");
    assert_eq!(records[0].weight, 12.5);
    assert_eq!(records[0].owner, "alice");
}

#[test]
fn test_empty_driver_name_leaves_table_unchanged() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    let mut registry = open_registry(&config).unwrap();
    registry.register("alice", "pw1").unwrap();

    let records_path = config.records_path().unwrap();
    let before = fs::read_to_string(&records_path).unwrap();

    let mut fields = t1();
    fields.driver_name = String::new();
    let err = registry.add_record(fields).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::AddRecord(AddRecordError::MissingField("driver_name"))
    ));

    assert_eq!(fs::read_to_string(&records_path).unwrap(), before);
    assert!(registry.list_records().unwrap().is_empty());
}

#[test]
fn test_login_outcomes() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    let mut registry = open_registry(&config).unwrap();
    registry.register("alice", "pw1").unwrap();
    registry.logout();

    for (user, pw) in [("alice", "pw1x"), ("nonexistent", "pw1"), ("nonexistent", "")] {
        let err = registry.login(user, pw).unwrap_err();
        assert!(matches!(err, ServiceError::Login(LoginError::InvalidCredentials)));
        assert_eq!(registry.current_user(), None);
    }

    registry.login("alice", "pw1").unwrap();
    assert_eq!(registry.current_user(), Some("alice"));
}

#[test]
fn test_restart_reproduces_state() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);

    let (alice_before, bob_before) = {
        let mut registry = open_registry(&config).unwrap();
        registry.register("alice", "pw1").unwrap();
        registry.add_record(t1()).unwrap();
        let mut second = t1();
        second.truck_number = "T2".to_string();
        second.area = "Depot, \"B\" yard".to_string();
        registry.add_record(second).unwrap();
        let alice = registry.list_records().unwrap();

        registry.register("bob", "pw2").unwrap();
        let mut third = t1();
        third.truck_number = "T3".to_string();
        third.weight = 0.0;
        registry.add_record(third).unwrap();
        let bob = registry.list_records().unwrap();
        save_session(&config, &registry).unwrap();
        (alice, bob)
    };

    // new process: session resumes as bob
    let mut registry = open_registry(&config).unwrap();
    assert_eq!(registry.current_user(), Some("bob"));
    assert_eq!(registry.list_records().unwrap(), bob_before);

    registry.login("alice", "pw1").unwrap();
    assert_eq!(registry.list_records().unwrap(), alice_before);
}

#[test]
fn test_logout_persists_across_restart() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);

    let mut registry = open_registry(&config).unwrap();
    registry.register("alice", "pw1").unwrap();
    save_session(&config, &registry).unwrap();
    assert!(config.session_path().unwrap().exists());

    registry.logout();
    save_session(&config, &registry).unwrap();

    let registry = open_registry(&config).unwrap();
    assert_eq!(registry.current_user(), None);
    assert_eq!(registry.accounts().count(), 1);
}

#[test]
fn test_argon2_config_still_accepts_legacy_accounts() {
    let dir = tempdir().unwrap();
    let mut config = config_in(&dir);

    let mut registry = open_registry(&config).unwrap();
    registry.register("legacy", "old-pw").unwrap();

    config.hash_scheme = HashScheme::Argon2;
    let mut registry = open_registry(&config).unwrap();
    registry.register("modern", "new-pw").unwrap();
    registry.login("legacy", "old-pw").unwrap();
    registry.login("modern", "new-pw").unwrap();

    let users = fs::read_to_string(config.users_path().unwrap()).unwrap();
    assert!(users.contains("$argon2"));
}

#[test]
fn test_corrupt_tables_self_heal() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(config.users_path().unwrap(), "").unwrap();
    fs::write(config.records_path().unwrap(), "\n\n").unwrap();

    let mut registry = open_registry(&config).unwrap();
    assert_eq!(
        fs::read_to_string(config.users_path().unwrap()).unwrap(),
        "Username,Password\n"
    );
    registry.register("alice", "pw1").unwrap();
    registry.add_record(t1()).unwrap();
    assert_eq!(registry.list_records().unwrap().len(), 1);
}
