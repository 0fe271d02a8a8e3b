//! Library catalog and simulator, end to end

use folio::{run_simulation, Book, Library, SearchType, SharedStore, SimulationConfig};
use std::sync::Arc;
use std::thread;

#[test]
fn catalog_lifecycle() {
    let mut lib = Library::new("Integration").unwrap();
    lib.add_book(Book::new("Beloved", "Toni Morrison", 1987, "Fiction", "100"))
        .unwrap();
    lib.add_book(Book::new("Jazz", "Toni Morrison", 1992, "Fiction", "101"))
        .unwrap();
    lib.add_book(Book::new("Sula", "Toni Morrison", 1973, "fiction", "102"))
        .unwrap();

    assert_eq!(lib.search("fiction", SearchType::Genre).unwrap().len(), 3);
    assert_eq!(lib.search("1992", SearchType::Year).unwrap()[0].title, "Jazz");
    assert_eq!(lib.unique_authors(), 1);

    let years: Vec<i32> = lib
        .books_in_year_range(1970, 1990)
        .unwrap()
        .into_iter()
        .map(|b| b.year)
        .collect();
    assert_eq!(years, vec![1973, 1987]);

    lib.remove_book("101").unwrap();
    lib.update_book("102", |b| b.author = "T. Morrison".to_string())
        .unwrap();
    assert_eq!(lib.unique_authors(), 2);
    assert!(lib.check_indices().is_ok());
}

#[test]
fn simulation_is_reproducible_and_consistent() {
    let cfg = SimulationConfig::default()
        .steps(500)
        .seed(42)
        .verify_invariants(true);
    let a = run_simulation(&cfg).unwrap();
    let b = run_simulation(&cfg).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.events.values().sum::<usize>(), 500);
    assert_eq!(a.final_books as u64, a.counters.inserts - a.counters.removes);
}

#[test]
fn shared_catalog_store_across_threads() {
    use folio::{IndexKey, IndexSpec};

    let store: SharedStore<Book> = SharedStore::new(vec![
        IndexSpec::field("author", "author"),
        IndexSpec::field("genre", "genre").normalized(IndexKey::to_lowercase),
    ])
    .unwrap();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    let isbn = format!("{}-{}", t, i);
                    store
                        .insert(Book::new("T", format!("Author {}", t), 2000, "Poetry", isbn))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.len(), 200);
    assert_eq!(store.lookup_by_secondary("genre", "POETRY").unwrap().len(), 200);
    assert_eq!(store.lookup_by_secondary("author", "Author 2").unwrap().len(), 50);
    store.check_invariants().unwrap();
}
