use super::support::*;

#[test]
fn post_ids_are_per_user_and_start_at_one() {
    let mut network = network_with(&[1, 2]);
    assert_eq!(network.create_post(UserId(1), "a").unwrap().id(), PostId(1));
    assert_eq!(network.create_post(UserId(1), "b").unwrap().id(), PostId(2));
    assert_eq!(network.create_post(UserId(2), "c").unwrap().id(), PostId(1));
    assert_eq!(network.create_post(UserId(1), "d").unwrap().id(), PostId(3));

    let ann = network.user(UserId(1)).unwrap();
    let bodies: Vec<&str> = ann.posts().iter().map(|post| post.body()).collect();
    assert_eq!(bodies, ["d", "b", "a"]);
    assert!(ann.posts().iter().all(|post| post.author_id() == UserId(1)));
}

#[test]
fn post_operations_on_missing_user() {
    let mut network = network_with(&[1]);
    assert!(matches!(
        network.create_post(UserId(5), "x"),
        Err(NetworkError::UserNotFound { user_id: UserId(5) })
    ));
    assert!(matches!(
        network.add_comment_to_post(UserId(5), PostId(1), "x"),
        Err(NetworkError::UserNotFound { .. })
    ));
    assert!(matches!(
        network.add_reply_to_comment(UserId(5), CommentId(1), "x"),
        Err(NetworkError::UserNotFound { .. })
    ));
}

#[test]
fn comment_on_missing_post() {
    let mut network = network_with(&[1]);
    let err = network.add_comment_to_post(UserId(1), PostId(3), "hi").unwrap_err();
    assert!(matches!(
        err,
        NetworkError::PostNotFound {
            user_id: UserId(1),
            post_id: PostId(3)
        }
    ));
    let err = network.add_reply_to_comment(UserId(1), CommentId(1), "hi").unwrap_err();
    assert!(matches!(err, NetworkError::CommentNotFound { .. }));
}

#[test]
fn thread_order_is_most_recent_first_with_replies_after_parent() {
    let mut network = network_with(&[1]);
    network.create_post(UserId(1), "post").unwrap();

    let a = network.add_comment_to_post(UserId(1), PostId(1), "a").unwrap().id();
    let b = network.add_comment_to_post(UserId(1), PostId(1), "b").unwrap().id();
    assert_eq!((a, b), (CommentId(1), CommentId(2)));
    assert_eq!(thread_bodies(&network, 1, 1), ["b", "a"]);

    let reply = network.add_reply_to_comment(UserId(1), b, "re b").unwrap();
    assert_eq!(reply.parent_id(), Some(b));
    assert_eq!(thread_bodies(&network, 1, 1), ["b", "re b", "a"]);

    let nested = network.add_reply_to_comment(UserId(1), CommentId(3), "re re b").unwrap().id();
    assert_eq!(thread_bodies(&network, 1, 1), ["b", "re b", "re re b", "a"]);
    let thread = network.get_post(UserId(1), PostId(1)).unwrap().comments();
    assert_eq!(thread.depth_of(nested), Some(2));
}

#[test]
fn comment_lookup_spans_all_posts_of_owner() {
    let mut network = network_with(&[1, 2]);
    network.create_post(UserId(1), "first").unwrap();
    network.create_post(UserId(1), "second").unwrap();
    network.add_comment_to_post(UserId(1), PostId(1), "on first").unwrap();
    network.add_comment_to_post(UserId(1), PostId(2), "on second").unwrap();

    assert_eq!(network.get_comment(UserId(1), CommentId(1)).unwrap().body(), "on first");
    assert_eq!(network.get_comment(UserId(1), CommentId(2)).unwrap().body(), "on second");

    // comment ids are scoped to the owning user
    assert!(matches!(
        network.get_comment(UserId(2), CommentId(1)),
        Err(NetworkError::CommentNotFound { .. })
    ));

    network.add_reply_to_comment(UserId(1), CommentId(1), "reply").unwrap();
    assert_eq!(thread_bodies(&network, 1, 1), ["on first", "reply"]);
    assert_eq!(thread_bodies(&network, 1, 2), ["on second"]);
}

#[test]
fn blank_bodies_are_rejected() {
    let mut network = network_with(&[1]);
    assert!(matches!(network.create_post(UserId(1), "   "), Err(NetworkError::Validation(_))));
    assert!(network.user(UserId(1)).unwrap().posts().is_empty());
    assert!(matches!(network.add_notification(UserId(1), ""), Err(NetworkError::Validation(_))));
}

#[test]
fn feed_is_explicit_and_most_recent_first() {
    let mut network = network_with(&[1, 2, 3]);
    network.add_friendship(UserId(1), UserId(3)).unwrap();
    let first = network.create_post(UserId(1), "first").unwrap().post_ref();
    let other = network.create_post(UserId(2), "other").unwrap().post_ref();

    // creating posts and friendships does not touch any feed
    assert!(feed_lines(&network, 3).is_empty());

    network.add_to_feed(UserId(3), first).unwrap();
    network.add_to_feed(UserId(3), other).unwrap();
    network.add_to_feed(UserId(3), first).unwrap();

    assert_eq!(
        feed_lines(&network, 3),
        [
            ("user1".to_string(), "first".to_string()),
            ("user2".to_string(), "other".to_string()),
            ("user1".to_string(), "first".to_string()),
        ]
    );
}

#[test]
fn publish_fans_out_only_when_enabled() {
    let mut network = network_with(&[1, 2, 3]);
    network.add_friendship(UserId(1), UserId(2)).unwrap();
    network.publish_post(UserId(1), "quiet").unwrap();
    assert!(feed_lines(&network, 2).is_empty());

    let mut config = HearthConfig::default();
    config.network.fan_out_posts = true;
    let mut network = network_with_config(&[1, 2, 3], config);
    network.add_friendship(UserId(1), UserId(2)).unwrap();
    let post = network.publish_post(UserId(1), "loud").unwrap();
    assert_eq!(post, PostRef::new(UserId(1), PostId(1)));

    assert_eq!(feed_lines(&network, 2), [("user1".to_string(), "loud".to_string())]);
    assert!(feed_lines(&network, 3).is_empty());
    assert!(feed_lines(&network, 1).is_empty());
}

#[test]
fn notifications_are_most_recent_first() {
    let mut network = network_with(&[1]);
    assert_eq!(network.add_notification(UserId(1), "one").unwrap().order(), 1);
    assert_eq!(network.add_notification(UserId(1), "two").unwrap().order(), 2);
    let seen: Vec<&str> = network.view_notifications(UserId(1)).unwrap().collect();
    assert_eq!(seen, ["two", "one"]);
    assert!(matches!(
        network.add_notification(UserId(4), "x"),
        Err(NetworkError::UserNotFound { .. })
    ));
}

#[test]
fn comment_notifications_are_opt_in() {
    let mut config = HearthConfig::default();
    config.network.notify_on_comment = true;
    let mut network = network_with_config(&[1], config);
    network.create_post(UserId(1), "post").unwrap();
    network.add_comment_to_post(UserId(1), PostId(1), "hi").unwrap();
    network.add_reply_to_comment(UserId(1), CommentId(1), "yo").unwrap();

    let seen: Vec<&str> = network.view_notifications(UserId(1)).unwrap().collect();
    assert_eq!(seen, ["New reply to comment 1 on your post", "New comment on your post 1"]);
}

#[test]
fn feed_never_holds_unshared_posts() {
    let mut network = network_with(&[2]);
    assert!(matches!(
        network.add_to_feed(UserId(2), PostRef::new(UserId(9), PostId(1))),
        Err(NetworkError::UserNotFound { user_id: UserId(9) })
    ));

    network.add_user(UserId(9), "Late", "").unwrap();
    network.create_post(UserId(9), "later").unwrap();
    assert!(feed_lines(&network, 2).is_empty());
    assert!(network.user(UserId(2)).unwrap().feed().is_empty());
}

#[test]
fn blank_post_is_rejected_without_consuming_an_id() {
    let mut network = network_with(&[1]);
    assert!(matches!(network.create_post(UserId(1), "   "), Err(NetworkError::Validation(_))));
    assert!(network.user(UserId(1)).unwrap().posts().is_empty());
    assert_eq!(network.create_post(UserId(1), "real").unwrap().id(), PostId(1));
}
