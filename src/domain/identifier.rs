//! Card identifier normalization.
//!
//! Stored identifiers are two-digit zero-padded numbers (`"03"`), optionally
//! followed by the variant marker (`"03P"`). Range is not checked here: an
//! identifier outside the catalog is simply not found.

/// Suffix marking the special variant of a card.
pub const VARIANT_MARKER: char = 'P';

const PAD_WIDTH: usize = 2;

/// Converts a raw identifier (`"3"`, `"3P"`, `" 03p "`) into its canonical form.
pub fn normalize_card_no(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.contains(|c: char| c.eq_ignore_ascii_case(&VARIANT_MARKER)) {
        let number: String = trimmed
            .chars()
            .filter(|c| !c.eq_ignore_ascii_case(&VARIANT_MARKER))
            .collect();
        format!("{:0>width$}{}", number, VARIANT_MARKER, width = PAD_WIDTH)
    } else {
        format!("{:0>width$}", trimmed, width = PAD_WIDTH)
    }
}

/// Whether `card_no` is already in stored form: digits, optional marker, padded.
pub fn is_canonical(card_no: &str) -> bool {
    let digits = card_no.strip_suffix(VARIANT_MARKER).unwrap_or(card_no);
    digits.len() >= PAD_WIDTH && digits.chars().all(|c| c.is_ascii_digit())
}

/// Numeric part of a canonical identifier, if it has one.
pub fn card_number(card_no: &str) -> Option<u32> {
    card_no
        .strip_suffix(VARIANT_MARKER)
        .unwrap_or(card_no)
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_numbers() {
        assert_eq!(normalize_card_no("3"), "03");
        assert_eq!(normalize_card_no("03"), "03");
        assert_eq!(normalize_card_no("61"), "61");
        assert_eq!(normalize_card_no("100"), "100");
    }

    #[test]
    fn test_normalize_variant_marker() {
        assert_eq!(normalize_card_no("3P"), "03P");
        assert_eq!(normalize_card_no("03P"), "03P");
        assert_eq!(normalize_card_no("12P"), "12P");
        assert_eq!(normalize_card_no(" 3p "), "03P");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["1", "01", "9P", "09P", "61", "7p", "", "P", "abc"] {
            let once = normalize_card_no(raw);
            assert_eq!(normalize_card_no(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn test_canonical_and_number() {
        assert!(is_canonical("03"));
        assert!(is_canonical("03P"));
        assert!(!is_canonical("3"));
        assert!(!is_canonical("0x"));
        assert_eq!(card_number("03P"), Some(3));
        assert_eq!(card_number("61"), Some(61));
        assert_eq!(card_number("zz"), None);
    }
}
