//! Canonical book names used to validate scripture references and to drive
//! the book autocomplete in the console.

/// Old Testament books in canonical order.
pub const OLD_TESTAMENT: &[&str] = &[
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
];

/// New Testament books in canonical order.
pub const NEW_TESTAMENT: &[&str] = &[
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Every book, Old Testament first.
pub fn all_books() -> impl Iterator<Item = &'static str> {
    OLD_TESTAMENT.iter().chain(NEW_TESTAMENT.iter()).copied()
}

/// Match a typed book name against the canon, ignoring case and surrounding
/// whitespace. Returns the canonical spelling used in verse keys.
pub fn canonical_book(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    if wanted.is_empty() {
        return None;
    }
    all_books().find(|book| book.eq_ignore_ascii_case(wanted))
}

/// First canonical book whose name starts with `prefix` (case-insensitive).
pub fn book_suggestion(prefix: &str) -> Option<&'static str> {
    let prefix = prefix.trim_start().to_lowercase();
    if prefix.is_empty() {
        return None;
    }
    all_books().find(|book| book.to_lowercase().starts_with(&prefix))
}
