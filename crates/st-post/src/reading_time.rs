//! Reading-time estimation.

use st_content::ContentSection;

/// Assumed reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Count whitespace-delimited words in every section heading and body block.
pub fn count_words(sections: &[ContentSection]) -> usize {
    sections
        .iter()
        .map(|section| {
            let heading = section
                .heading
                .as_deref()
                .map_or(0, |h| h.split_whitespace().count());
            let body: usize = section
                .body
                .iter()
                .map(|block| block.text.split_whitespace().count())
                .sum();
            heading + body
        })
        .sum()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Empty content yields zero minutes.
pub fn estimate_reading_minutes(sections: &[ContentSection]) -> usize {
    count_words(sections).div_ceil(WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use st_richtext::Block;

    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn section(heading: &str, body_words: &[usize]) -> ContentSection {
        ContentSection::new(
            heading,
            body_words
                .iter()
                .map(|&n| Block::paragraph(words(n)))
                .collect(),
        )
    }

    #[test]
    fn test_exactly_one_minute() {
        let sections = [section("Hello World", &[198])];
        assert_eq!(count_words(&sections), 200);
        assert_eq!(estimate_reading_minutes(&sections), 1);
    }

    #[test]
    fn test_rounds_up_partial_minute() {
        assert_eq!(
            estimate_reading_minutes(&[section("Hello World", &[197])]),
            1
        );
        assert_eq!(
            estimate_reading_minutes(&[section("Hello World", &[199])]),
            2
        );
    }

    #[test]
    fn test_counts_every_section_and_block() {
        let sections = [section("One two three", &[10, 20]), section("Four", &[5])];
        assert_eq!(count_words(&sections), 3 + 30 + 1 + 5);
    }

    #[test]
    fn test_empty_content_is_zero_minutes() {
        assert_eq!(estimate_reading_minutes(&[]), 0);
        let empty = ContentSection {
            heading: None,
            body: vec![],
        };
        assert_eq!(estimate_reading_minutes(&[empty]), 0);
    }

    #[test]
    fn test_irregular_whitespace() {
        let sections = [ContentSection::new(
            "  spaced   heading ",
            vec![Block::paragraph("line one\nline\ttwo")],
        )];
        assert_eq!(count_words(&sections), 6);
    }

    #[test]
    fn test_blocks_without_text_count_zero() {
        let sections = [ContentSection::new(
            "Gallery",
            vec![Block::image("https://example.com/a.png", None)],
        )];
        assert_eq!(count_words(&sections), 1);
    }
}
