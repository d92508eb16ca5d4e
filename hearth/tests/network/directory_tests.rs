use super::support::*;

#[test]
fn add_then_get_returns_profile_fields() {
    let mut network = SocialNetwork::new();
    let user = network.add_user(UserId(7), "Ann", "likes rust").expect("add user");
    assert_eq!(user.id(), UserId(7));

    let user = network.get_user(UserId(7)).expect("user exists");
    assert_eq!(user.display_name(), "Ann");
    assert_eq!(user.bio(), "likes rust");
    assert!(user.friends().is_empty());
    assert!(user.posts().is_empty());
    assert!(user.feed().is_empty());
    assert!(user.notifications().is_empty());
}

#[test]
fn duplicate_id_is_rejected_and_original_kept() {
    let mut network = network_with(&[1]);
    let err = network.add_user(UserId(1), "Impostor", "").unwrap_err();
    assert!(matches!(err, NetworkError::DuplicateId { user_id: UserId(1) }));

    assert_eq!(network.len(), 1);
    assert_eq!(network.user(UserId(1)).unwrap().display_name(), "user1");
}

#[test]
fn missing_user_lookups() {
    let network = network_with(&[1]);
    assert!(network.get_user(UserId(2)).is_none());
    assert!(!network.contains_user(UserId(2)));
    assert!(matches!(
        network.user(UserId(2)),
        Err(NetworkError::UserNotFound { user_id: UserId(2) })
    ));
}

#[test]
fn removed_id_can_be_registered_again() {
    let mut network = network_with(&[1, 2]);
    let removed = network.remove_user(UserId(1)).expect("remove");
    assert_eq!(removed.display_name(), "user1");
    assert!(network.get_user(UserId(1)).is_none());

    network.add_user(UserId(1), "Fresh", "").expect("re-add");
    let user = network.user(UserId(1)).unwrap();
    assert_eq!(user.display_name(), "Fresh");
    assert!(user.posts().is_empty());
}

#[test]
fn profile_limits_come_from_config() {
    let mut config = HearthConfig::default();
    config.limits.max_display_name_len = 3;
    let mut network = SocialNetwork::with_config(config);

    network.add_user(UserId(1), "Ann", "").expect("fits");
    match network.add_user(UserId(2), "Bobby", "") {
        Err(NetworkError::Validation(err)) => {
            assert_eq!(err.issues.len(), 1);
            assert_eq!(err.issues[0].field, "display_name");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
