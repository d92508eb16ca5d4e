use super::support::*;

#[test]
fn friendship_is_symmetric() {
    let mut network = network_with(&[1, 2, 3]);
    assert!(network.add_friendship(UserId(1), UserId(2)).unwrap());

    assert!(network.are_friends(UserId(1), UserId(2)).unwrap());
    assert!(network.are_friends(UserId(2), UserId(1)).unwrap());
    assert!(!network.are_friends(UserId(1), UserId(3)).unwrap());
    assert!(!network.are_friends(UserId(3), UserId(2)).unwrap());
}

#[test]
fn duplicate_friendship_is_idempotent() {
    let mut network = network_with(&[1, 2]);
    assert!(network.add_friendship(UserId(1), UserId(2)).unwrap());
    assert!(!network.add_friendship(UserId(1), UserId(2)).unwrap());
    assert!(!network.add_friendship(UserId(2), UserId(1)).unwrap());

    assert_eq!(network.friend_count(UserId(1)).unwrap(), 1);
    assert_eq!(network.friend_count(UserId(2)).unwrap(), 1);
    assert_eq!(network.friends_of(UserId(1)).unwrap(), [UserId(2)]);
}

#[test]
fn self_friendship_is_rejected() {
    let mut network = network_with(&[1]);
    let err = network.add_friendship(UserId(1), UserId(1)).unwrap_err();
    assert!(matches!(err, NetworkError::SelfFriendship { user_id: UserId(1) }));
    assert_eq!(network.friend_count(UserId(1)).unwrap(), 0);
    assert!(!network.are_friends(UserId(1), UserId(1)).unwrap());
}

#[test]
fn missing_user_leaves_no_half_edge() {
    let mut network = network_with(&[1]);
    let err = network.add_friendship(UserId(1), UserId(9)).unwrap_err();
    assert!(matches!(err, NetworkError::UserNotFound { user_id: UserId(9) }));
    assert_eq!(network.friend_count(UserId(1)).unwrap(), 0);

    let err = network.are_friends(UserId(9), UserId(1)).unwrap_err();
    assert!(matches!(err, NetworkError::UserNotFound { user_id: UserId(9) }));
}

#[test]
fn unfriend_removes_both_halves() {
    let mut network = network_with(&[1, 2]);
    network.add_friendship(UserId(1), UserId(2)).unwrap();

    assert!(network.remove_friendship(UserId(2), UserId(1)).unwrap());
    assert!(!network.are_friends(UserId(1), UserId(2)).unwrap());
    assert!(!network.are_friends(UserId(2), UserId(1)).unwrap());
    assert!(!network.remove_friendship(UserId(1), UserId(2)).unwrap());
}

#[test]
fn mutual_friends() {
    let mut network = network_with(&[1, 2, 3, 4, 5]);
    for (a, b) in [(1, 3), (1, 4), (2, 4), (2, 3), (1, 5)] {
        network.add_friendship(UserId(a), UserId(b)).unwrap();
    }
    assert_eq!(network.mutual_friends(UserId(1), UserId(2)).unwrap(), [UserId(3), UserId(4)]);
    assert!(network.mutual_friends(UserId(3), UserId(5)).unwrap().contains(&UserId(1)));
}

#[test]
fn friendship_notifications_are_opt_in() {
    let mut network = network_with(&[1, 2]);
    network.add_friendship(UserId(1), UserId(2)).unwrap();
    assert_eq!(network.view_notifications(UserId(1)).unwrap().count(), 0);

    let mut config = HearthConfig::default();
    config.network.notify_on_friendship = true;
    let mut network = network_with_config(&[1, 2], config);
    network.add_friendship(UserId(1), UserId(2)).unwrap();
    network.add_friendship(UserId(1), UserId(2)).unwrap();

    let ann: Vec<&str> = network.view_notifications(UserId(1)).unwrap().collect();
    let bob: Vec<&str> = network.view_notifications(UserId(2)).unwrap().collect();
    assert_eq!(ann, ["You are now friends with user2"]);
    assert_eq!(bob, ["You are now friends with user1"]);
}
