//! Shared fixtures for the conformance suite

use folio::{IndexKey, IndexSpec, IndexedStore, Record, StoreOptions};

/// Minimal record with one secondary field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rec {
    pub key: String,
    pub author: String,
    pub shelf: i64,
}

impl Record for Rec {
    type Key = String;
    const FIELDS: &'static [&'static str] = &["author", "shelf"];

    fn primary_key(&self) -> &String {
        &self.key
    }

    fn field(&self, name: &str) -> Option<IndexKey> {
        match name {
            "author" => Some(IndexKey::from(&self.author)),
            "shelf" => Some(IndexKey::Int(self.shelf)),
            _ => None,
        }
    }
}

pub fn rec(key: &str, author: &str) -> Rec {
    Rec {
        key: key.to_string(),
        author: author.to_string(),
        shelf: 0,
    }
}

pub fn k(key: &str) -> String {
    key.to_string()
}

/// Store indexed by `author` and `shelf`, verifying invariants on every mutation
pub fn store() -> IndexedStore<Rec> {
    IndexedStore::with_options(
        vec![IndexSpec::field("author", "author"), IndexSpec::field("shelf", "shelf")],
        StoreOptions::new().verify_invariants(true),
    )
    .unwrap()
}

/// Primary keys of a lookup result, in result order
pub fn keys(records: Vec<&Rec>) -> Vec<String> {
    records.into_iter().map(|r| r.key.clone()).collect()
}

/// Full observable state: every record plus every bucket of every index
pub fn snapshot(store: &IndexedStore<Rec>) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    let mut records: Vec<&Rec> = store.iter().collect();
    records.sort_by(|a, b| a.key.cmp(&b.key));
    for r in &records {
        out.push((format!("primary:{}", r.key), vec![format!("{:?}", r)]));
    }
    let mut authors: Vec<&str> = records.iter().map(|r| r.author.as_str()).collect();
    authors.sort_unstable();
    authors.dedup();
    for a in authors {
        out.push((
            format!("author:{}", a),
            keys(store.lookup_by_secondary("author", a).unwrap()),
        ));
    }
    let mut shelves: Vec<i64> = records.iter().map(|r| r.shelf).collect();
    shelves.sort_unstable();
    shelves.dedup();
    for s in shelves {
        out.push((
            format!("shelf:{}", s),
            keys(store.lookup_by_secondary("shelf", s).unwrap()),
        ));
    }
    out
}
