//! Random book generation

use folio_primitives::Book;
use rand::seq::SliceRandom;
use rand::Rng;

/// Genres the generator and the re-genre event draw from
pub const GENRES: &[&str] = &[
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Fantasy",
    "Biography",
    "History",
    "Self-Help",
    "Poetry",
];

const TITLES: &[&str] = &[
    "The Great Adventure",
    "Mystery of the Old House",
    "Journey to the Unknown",
    "Secrets of the Forest",
    "Tales from the Past",
    "Dreams and Reality",
    "Echoes of Time",
    "Shadows and Light",
    "Legends of Tomorrow",
    "Whispers in the Wind",
];

const AUTHORS: &[&str] = &[
    "John Smith",
    "Emily Johnson",
    "Michael Brown",
    "Sarah Davis",
    "Robert Wilson",
    "Jennifer Taylor",
    "David Anderson",
    "Lisa Martinez",
    "James Thomas",
    "Patricia Garcia",
];

/// Earliest generated publication year
pub const MIN_YEAR: i32 = 1900;
/// Latest generated publication year
pub const MAX_YEAR: i32 = 2025;

/// Pick one entry of a non-empty table
pub(crate) fn pick<'a, R: Rng + ?Sized>(rng: &mut R, table: &[&'a str]) -> &'a str {
    table.choose(rng).copied().unwrap_or_default()
}

/// Generate a book with random title, author, genre, year and 10-digit ISBN
pub fn generate_random_book<R: Rng + ?Sized>(rng: &mut R) -> Book {
    let title = pick(rng, TITLES);
    let author = pick(rng, AUTHORS);
    let year = rng.gen_range(MIN_YEAR..=MAX_YEAR);
    let genre = pick(rng, GENRES);
    let isbn = rng.gen_range(1_000_000_000u64..=9_999_999_999u64).to_string();
    Book::new(title, author, year, genre, isbn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_fields_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let book = generate_random_book(&mut rng);
            assert!(TITLES.contains(&book.title.as_str()));
            assert!(AUTHORS.contains(&book.author.as_str()));
            assert!(GENRES.contains(&book.genre.as_str()));
            assert!((MIN_YEAR..=MAX_YEAR).contains(&book.year));
            assert_eq!(book.isbn.len(), 10);
        }
    }

    #[test]
    fn test_same_seed_same_books() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            let (x, y) = (generate_random_book(&mut a), generate_random_book(&mut b));
            assert_eq!(
                (&x.isbn, &x.title, &x.author, x.year, &x.genre),
                (&y.isbn, &y.title, &y.author, y.year, &y.genre)
            );
        }
    }
}
