//! Store invariants under random operation sequences

use folio::{IndexKey, StoreError};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::test_utils::*;

const AUTHORS: [&str; 3] = ["X", "Y", "Z"];

fn assert_all_invariants(s: &folio::IndexedStore<Rec>) {
    s.check_invariants().unwrap();

    // Bijection: every stored key resolves to a record carrying that key
    for key in s.primary_keys() {
        assert_eq!(&s.lookup_by_primary(key).unwrap().key, key);
    }

    // Secondary consistency: each record appears exactly once under its key
    for r in s.iter() {
        let by_author = s.lookup_by_secondary("author", r.author.as_str()).unwrap();
        assert_eq!(by_author.iter().filter(|x| x.key == r.key).count(), 1);
        let by_shelf = s.lookup_by_secondary("shelf", r.shelf).unwrap();
        assert_eq!(by_shelf.iter().filter(|x| x.key == r.key).count(), 1);
    }

    // No dangling buckets: every bucket that exists has members
    for author in AUTHORS {
        let present = s.contains_bucket("author", author).unwrap();
        let members = s.lookup_by_secondary("author", author).unwrap().len();
        assert_eq!(present, members > 0);
    }
}

#[test]
fn seeded_random_walk_preserves_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut s = store();

    for _ in 0..2_000 {
        let key = format!("r{}", rng.gen_range(0..40));
        match rng.gen_range(0..4) {
            0 => {
                let author = AUTHORS[rng.gen_range(0..AUTHORS.len())];
                let _ = s.insert(rec(&key, author));
            }
            1 => {
                let _ = s.remove(&key);
            }
            2 => {
                let author = AUTHORS[rng.gen_range(0..AUTHORS.len())].to_string();
                let shelf = rng.gen_range(0..5);
                let _ = s.update(&key, |r| {
                    r.author = author;
                    r.shelf = shelf;
                });
            }
            _ => {
                let before = snapshot(&s);
                let result = s.update(&key, |r| r.key.push('!'));
                assert!(result.is_err());
                assert_eq!(before, snapshot(&s));
            }
        }
        assert_all_invariants(&s);
    }
}

#[test]
fn rejected_update_is_byte_for_byte_noop() {
    let mut s = store();
    s.insert(rec("A", "X")).unwrap();
    s.insert(rec("B", "X")).unwrap();
    s.insert(rec("C", "Y")).unwrap();
    let before = snapshot(&s);

    let err = s
        .update(&k("B"), |r| {
            r.author = "Z".to_string();
            r.shelf = 9;
            r.key = "Q".to_string();
        })
        .unwrap_err();

    assert!(matches!(err, StoreError::ImmutableKey { .. }));
    assert_eq!(before, snapshot(&s));
    assert!(!s.contains_bucket("author", "Z").unwrap());
    assert!(!s.contains_bucket("shelf", IndexKey::Int(9)).unwrap());
}

#[test]
fn failed_remove_and_insert_do_not_touch_state() {
    let mut s = store();
    s.insert(rec("A", "X")).unwrap();
    let before = snapshot(&s);

    assert!(s.remove(&k("missing")).unwrap_err().is_not_found());
    assert!(s.insert(rec("A", "Z")).unwrap_err().is_duplicate());
    assert!(s.update(&k("missing"), |r| r.shelf = 1).unwrap_err().is_not_found());

    assert_eq!(before, snapshot(&s));
    let c = s.counters();
    assert_eq!((c.remove_failures, c.insert_failures, c.update_failures), (1, 1, 1));
}

proptest! {
    #[test]
    fn insert_then_remove_all_leaves_no_buckets(
        authors in proptest::collection::vec(0usize..3, 1..30)
    ) {
        let mut s = store();
        for (i, a) in authors.iter().enumerate() {
            s.insert(rec(&format!("k{}", i), AUTHORS[*a])).unwrap();
        }
        assert_all_invariants(&s);

        for i in 0..authors.len() {
            s.remove(&format!("k{}", i)).unwrap();
        }
        prop_assert!(s.is_empty());
        prop_assert_eq!(s.bucket_count("author").unwrap(), 0);
        prop_assert_eq!(s.bucket_count("shelf").unwrap(), 0);
    }
}
