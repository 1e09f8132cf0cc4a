use super::*;

fn sample(username: &str) -> Account {
    Account::new(username, format!("{username}@example.com"), "hunter22")
}

#[test]
fn register_then_find_is_case_insensitive() {
    let mut registry = AccountRegistry::new();
    registry.register(sample("Alex1")).unwrap();

    let found = registry.find_by_username("alex1").unwrap();
    assert_eq!(found.username, "Alex1");
    assert!(registry.exists("ALEX1"));
}

#[test]
fn find_strips_at_marker_before_comparison() {
    let mut registry = AccountRegistry::new();
    registry.register(sample("alex1")).unwrap();

    assert!(registry.find_by_username("@alex1").is_some());
    assert!(registry.find_by_username("@Alex1").is_some());
}

#[test]
fn register_rejects_case_insensitive_duplicate() {
    let mut registry = AccountRegistry::new();
    registry.register(sample("Alex1")).unwrap();

    let err = registry.register(sample("alex1")).unwrap_err();
    assert_eq!(err, RegistryError::UsernameTaken);
    assert_eq!(registry.len(), 1);
}

#[test]
fn failed_register_leaves_no_partial_write() {
    let mut registry = AccountRegistry::new();
    registry
        .register(Account::new("alex1", "first@example.com", "secret-a"))
        .unwrap();
    let _ = registry.register(Account::new("ALEX1", "second@example.com", "secret-b"));

    let stored = registry.find_by_username("alex1").unwrap();
    assert_eq!(stored.email, "first@example.com");
    assert_eq!(stored.secret, "secret-a");
}

#[test]
fn verify_requires_exact_secret() {
    let mut registry = AccountRegistry::new();
    registry.register(sample("alex1")).unwrap();

    assert!(registry.verify("alex1", "hunter22").is_some());
    assert!(registry.verify("alex1", "Hunter22").is_none());
    assert!(registry.verify("alex1", "hunter22 ").is_none());
}

#[test]
fn verify_matches_username_case_insensitively() {
    let mut registry = AccountRegistry::new();
    registry.register(sample("Alex1")).unwrap();

    let account = registry.verify("@aLeX1", "hunter22").unwrap();
    assert_eq!(account.username, "Alex1");
}

#[test]
fn verify_unknown_user_is_none() {
    let registry = AccountRegistry::new();
    assert!(registry.verify("nosuchuser999", "anything").is_none());
}

#[test]
fn registry_grows_by_one_per_registration() {
    let mut registry = AccountRegistry::new();
    assert!(registry.is_empty());

    registry.register(sample("user0001")).unwrap();
    registry.register(sample("user0002")).unwrap();
    assert_eq!(registry.len(), 2);
}
