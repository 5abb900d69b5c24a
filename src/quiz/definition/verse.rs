use std::fmt;

use crate::error::QuizError;

const REFERENCE_SEPARATOR: char = ';';

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Verse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl Verse {
    pub fn new(book: &str, chapter: u32, verse: u32) -> Self {
        Verse {
            book: book.to_owned(),
            chapter,
            verse,
        }
    }
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

fn malformed(reference: &str, reason: impl Into<String>) -> QuizError {
    QuizError::MalformedReference {
        reference: reference.to_owned(),
        reason: reason.into(),
    }
}

fn parse_number(reference: &str, token: &str) -> Result<u32, QuizError> {
    token
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(reference, format!("`{}` is not a chapter or verse number", token)))
}

/// Parses `chapter:verse` or `chapter:first-last` into the verses it covers, in ascending order.
pub fn parse_reference(book: &str, reference: &str) -> Result<Vec<Verse>, QuizError> {
    let reference = reference.trim();
    let (chapter, verses) = match reference.split(':').collect::<Vec<&str>>().as_slice() {
        [chapter, verses] => (*chapter, *verses),
        _ => return Err(malformed(reference, "expected exactly one `:`")),
    };

    let chapter = parse_number(reference, chapter)?;
    match verses.split_once('-') {
        Some((low, high)) => {
            let low = parse_number(reference, low)?;
            let high = parse_number(reference, high)?;
            if low > high {
                return Err(QuizError::InvalidRange {
                    reference: reference.to_owned(),
                    low,
                    high,
                });
            }
            Ok((low..=high)
                .map(|verse| Verse::new(book, chapter, verse))
                .collect())
        }
        None => {
            let verse = parse_number(reference, verses)?;
            Ok(vec![Verse::new(book, chapter, verse)])
        }
    }
}

/// Parses a cell that may hold several references separated by `;`, keeping their order.
pub fn parse_references(book: &str, cell: &str) -> Result<Vec<Verse>, QuizError> {
    let mut verses = Vec::new();
    for reference in cell
        .split(REFERENCE_SEPARATOR)
        .map(str::trim)
        .filter(|r| !r.is_empty())
    {
        verses.append(&mut parse_reference(book, reference)?);
    }
    if verses.is_empty() {
        return Err(malformed(cell, "no reference given"));
    }
    Ok(verses)
}
