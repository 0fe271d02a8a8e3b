//! Canonical store walkthroughs

use crate::test_utils::*;

#[test]
fn insert_is_visible_through_both_indices() {
    let mut s = store();
    s.insert(rec("A", "X")).unwrap();

    assert_eq!(s.lookup_by_primary(&k("A")), Some(&rec("A", "X")));
    assert_eq!(keys(s.lookup_by_secondary("author", "X").unwrap()), vec!["A"]);
}

#[test]
fn removing_one_of_two_leaves_the_other() {
    let mut s = store();
    s.insert(rec("A", "X")).unwrap();
    s.insert(rec("B", "X")).unwrap();

    s.remove(&k("A")).unwrap();
    assert_eq!(keys(s.lookup_by_secondary("author", "X").unwrap()), vec!["B"]);
}

#[test]
fn removing_last_member_deletes_bucket() {
    let mut s = store();
    s.insert(rec("A", "X")).unwrap();
    s.remove(&k("A")).unwrap();

    assert!(s.lookup_by_secondary("author", "X").unwrap().is_empty());
    assert!(!s.contains_bucket("author", "X").unwrap());
    assert_eq!(s.stats().indexes[0].distinct_keys, 0);
}

#[test]
fn duplicate_insert_keeps_first_record() {
    let mut s = store();
    s.insert(rec("A", "X")).unwrap();

    let err = s.insert(rec("A", "Y")).unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(s.len(), 1);
    assert_eq!(s.lookup_by_primary(&k("A")), Some(&rec("A", "X")));
    assert!(!s.contains_bucket("author", "Y").unwrap());
}

#[test]
fn update_moves_record_between_author_buckets() {
    let mut s = store();
    s.insert(rec("A", "X")).unwrap();

    s.update(&k("A"), |r| r.author = "Y".to_string()).unwrap();
    assert!(keys(s.lookup_by_secondary("author", "X").unwrap()).is_empty());
    assert_eq!(keys(s.lookup_by_secondary("author", "Y").unwrap()), vec!["A"]);
}

#[test]
fn insertion_order_survives_interleaved_mutations() {
    let mut s = store();
    for key in ["A", "B", "C", "D"] {
        s.insert(rec(key, "X")).unwrap();
    }
    s.remove(&k("B")).unwrap();
    s.update(&k("C"), |r| r.author = "Y".to_string()).unwrap();
    s.insert(rec("E", "X")).unwrap();
    s.update(&k("C"), |r| r.author = "X".to_string()).unwrap();

    assert_eq!(
        keys(s.lookup_by_secondary("author", "X").unwrap()),
        vec!["A", "D", "E", "C"]
    );
}
