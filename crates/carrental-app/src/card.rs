//! Credit card display formatting.

/// Group separator.
pub const SEPARATOR: char = '-';

/// Characters per group.
pub const GROUP_LEN: usize = 4;

/// Regroup a card number into blocks of four separated by `-`.
///
/// Existing separators are dropped first, so the transform is idempotent and
/// keeps every other character in order. No other validation is done.
///
/// ```
/// use carrental_app::card::format_card_number;
///
/// assert_eq!(format_card_number("1234567890123456"), "1234-5678-9012-3456");
/// assert_eq!(format_card_number("1234-5678-9012-3456"), "1234-5678-9012-3456");
/// ```
pub fn format_card_number(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / GROUP_LEN);

    for (i, c) in raw.chars().filter(|&c| c != SEPARATOR).enumerate() {
        if i > 0 && i % GROUP_LEN == 0 {
            out.push(SEPARATOR);
        }
        out.push(c);
    }

    out
}
