/// Chunk size for each read of the request stream
pub const DEFAULT_BUFFER_SIZE: usize = 4096;
/// Pending-connection queue length of the char-count listener
pub const DEFAULT_BACKLOG: u32 = 5;

const RESPONSE_PREFIX: &str = "Alphabetic character count: ";

/// Counts characters with the Unicode `Alphabetic` property
///
/// Letters from every script count; digits, punctuation, whitespace and
/// symbols do not.
///
/// ```
/// use sockpair::tcp::count_alphabetic;
///
/// assert_eq!(count_alphabetic("abc123"), 3);
/// assert_eq!(count_alphabetic("héllo"), 5);
/// assert_eq!(count_alphabetic(""), 0);
/// ```
pub fn count_alphabetic(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

pub fn format_count_response(count: usize) -> String {
    format!("{RESPONSE_PREFIX}{count}")
}

/// Extracts the count from a server reply
pub fn parse_count_response(text: &str) -> Option<usize> {
    let digits = text.strip_prefix(RESPONSE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
