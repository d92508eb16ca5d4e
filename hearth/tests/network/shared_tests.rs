use std::thread;

use super::support::*;

fn shared_with(count: u64) -> SharedNetwork {
    let network = SharedNetwork::new();
    for id in 0..count {
        network.add_user(UserId(id), format!("user{id}"), "").unwrap();
    }
    network
}

#[test]
fn concurrent_friendships_stay_symmetric() {
    let network = shared_with(8);

    thread::scope(|scope| {
        for worker in 0..4u64 {
            let network = &network;
            scope.spawn(move || {
                for a in 0..8u64 {
                    for b in 0..8u64 {
                        // alternate argument order across workers to exercise lock ordering
                        let (x, y) = if worker % 2 == 0 { (a, b) } else { (b, a) };
                        let _ = network.add_friendship(UserId(x), UserId(y));
                    }
                }
            });
        }
    });

    for a in 0..8u64 {
        let count = network.with_user(UserId(a), |user| user.friends().len()).unwrap();
        assert_eq!(count, 7);
        for b in 0..8u64 {
            if a != b {
                assert!(network.are_friends(UserId(a), UserId(b)).unwrap());
            }
        }
    }
}

#[test]
fn concurrent_posts_get_unique_ids() {
    let network = shared_with(1);

    thread::scope(|scope| {
        for _ in 0..4 {
            let network = &network;
            scope.spawn(move || {
                for _ in 0..25 {
                    network.create_post(UserId(0), "p").unwrap();
                }
            });
        }
    });

    let ids: Vec<PostId> = network
        .with_user(UserId(0), |user| user.posts().iter().map(|post| post.id()).collect())
        .unwrap();
    assert_eq!(ids.len(), 100);
    assert_eq!(ids.first(), Some(&PostId(100)));
    assert_eq!(ids.last(), Some(&PostId(1)));
}

#[test]
fn remove_user_prunes_shared_state() {
    let network = shared_with(3);
    network.add_friendship(UserId(0), UserId(1)).unwrap();
    network.add_friendship(UserId(0), UserId(2)).unwrap();
    let post = network.create_post(UserId(0), "bye").unwrap();
    network.add_to_feed(UserId(1), post).unwrap();

    let removed = network.remove_user(UserId(0)).unwrap();
    assert_eq!(removed.friends().len(), 2);
    assert!(!network.contains_user(UserId(0)));
    assert!(network.render_feed(UserId(1)).unwrap().is_empty());
    assert!(!network.with_user(UserId(2), |user| user.is_friend_of(UserId(0))).unwrap());
    assert!(matches!(
        network.are_friends(UserId(0), UserId(1)),
        Err(NetworkError::UserNotFound { .. })
    ));
}

#[test]
fn shared_content_operations() {
    let mut config = HearthConfig::default();
    config.network.fan_out_posts = true;
    let network = SharedNetwork::with_config(config);
    network.add_user(UserId(1), "Ann", "").unwrap();
    network.add_user(UserId(2), "Bob", "").unwrap();
    assert!(matches!(
        network.add_user(UserId(1), "Again", ""),
        Err(NetworkError::DuplicateId { .. })
    ));
    network.add_friendship(UserId(1), UserId(2)).unwrap();

    let post = network.publish_post(UserId(1), "hello").unwrap();
    let feed = network.render_feed(UserId(2)).unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].author_name, "Ann");

    let comment = network.add_comment_to_post(UserId(1), post.post_id, "hi").unwrap();
    let reply = network.add_reply_to_comment(UserId(1), comment, "yo").unwrap();
    assert_eq!((comment, reply), (CommentId(1), CommentId(2)));

    network.add_notification(UserId(2), "ping").unwrap();
    assert_eq!(network.view_notifications(UserId(2)).unwrap(), ["ping"]);
}

#[test]
fn remove_user_during_concurrent_writes_leaves_no_references() {
    let network = shared_with(8);
    let post = network.create_post(UserId(0), "going away").unwrap();
    for id in 1..8u64 {
        network.add_friendship(UserId(0), UserId(id)).unwrap();
        network.add_to_feed(UserId(id), post).unwrap();
    }

    thread::scope(|scope| {
        for worker in 1..8u64 {
            let network = &network;
            scope.spawn(move || {
                for round in 0..200u64 {
                    // failures after the removal are expected
                    let _ = network.add_friendship(UserId(0), UserId(worker));
                    let _ = network.add_to_feed(UserId(worker), post);
                    let other = 1 + (worker + round) % 7;
                    let _ = network.add_friendship(UserId(worker), UserId(other));
                }
            });
        }
        let network = &network;
        scope.spawn(move || {
            for _ in 0..50 {
                thread::yield_now();
            }
            network.remove_user(UserId(0)).unwrap();
        });
    });

    assert!(!network.contains_user(UserId(0)));
    for id in 1..8u64 {
        let (lists_removed, feed_mentions_removed) = network
            .with_user(UserId(id), |user| {
                (
                    user.is_friend_of(UserId(0)),
                    user.feed().iter().any(|entry| entry.author_id == UserId(0)),
                )
            })
            .unwrap();
        assert!(!lists_removed, "user {id} still lists the removed user");
        assert!(!feed_mentions_removed, "user {id} feed still references the removed user");
        assert!(network.render_feed(UserId(id)).unwrap().is_empty());
    }
}

#[test]
fn writes_go_through_validation() {
    let network = shared_with(2);
    assert!(matches!(
        network.add_to_feed(UserId(1), PostRef::new(UserId(5), PostId(3))),
        Err(NetworkError::UserNotFound { user_id: UserId(5) })
    ));
    assert!(matches!(network.create_post(UserId(1), "   "), Err(NetworkError::Validation(_))));
    assert!(matches!(network.add_notification(UserId(1), ""), Err(NetworkError::Validation(_))));

    let feed_len = network.with_user(UserId(1), |user| user.feed().len()).unwrap();
    assert_eq!(feed_len, 0);
    let post_count = network.with_user(UserId(1), |user| user.posts().len()).unwrap();
    assert_eq!(post_count, 0);
}
