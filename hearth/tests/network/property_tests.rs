use proptest::prelude::*;

use super::support::*;

#[derive(Debug, Clone)]
enum Op {
    Befriend(u64, u64),
    Unfriend(u64, u64),
    Post(u64),
    Remove(u64),
    Add(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..6, 0u64..6).prop_map(|(a, b)| Op::Befriend(a, b)),
        1 => (0u64..6, 0u64..6).prop_map(|(a, b)| Op::Unfriend(a, b)),
        3 => (0u64..6).prop_map(Op::Post),
        1 => (0u64..6).prop_map(Op::Remove),
        1 => (0u64..6).prop_map(Op::Add),
    ]
}

proptest! {
    #[test]
    fn friendship_stays_symmetric(ops in prop::collection::vec(op(), 0..64)) {
        let mut network = network_with(&[0, 1, 2, 3, 4, 5]);
        for op in ops {
            // errors (missing users, self-friendship, duplicates) are part of the input space
            let _ = match op {
                Op::Befriend(a, b) => network.add_friendship(UserId(a), UserId(b)).map(drop),
                Op::Unfriend(a, b) => network.remove_friendship(UserId(a), UserId(b)).map(drop),
                Op::Post(a) => network.create_post(UserId(a), "p").map(drop),
                Op::Remove(a) => network.remove_user(UserId(a)).map(drop),
                Op::Add(a) => network.add_user(UserId(a), "again", "").map(drop),
            };
        }

        for user in network.users() {
            prop_assert!(!user.is_friend_of(user.id()));
            for friend in user.friends().iter() {
                let other = network.get_user(friend);
                prop_assert!(other.is_some(), "dangling edge {} -> {}", user.id(), friend);
                prop_assert!(other.unwrap().is_friend_of(user.id()));
            }
        }
    }

    #[test]
    fn post_ids_count_up_per_user(posts in prop::collection::vec(0u64..4, 0..40)) {
        let mut network = network_with(&[0, 1, 2, 3]);
        let mut expected = [0u64; 4];
        for author in posts {
            expected[author as usize] += 1;
            let id = network.create_post(UserId(author), "p").unwrap().id();
            prop_assert_eq!(id, PostId(expected[author as usize]));
        }
        for (author, count) in expected.iter().enumerate() {
            let user = network.user(UserId(author as u64)).unwrap();
            prop_assert_eq!(user.posts().len() as u64, *count);
        }
    }
}
