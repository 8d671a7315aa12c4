/// Converts a LIKE pattern into an (unanchored) regular expression.
///
/// `%` and `*` match any run of characters, `_` and `?` match a single
/// character and `\` makes the next character match itself. Every other
/// character matches itself.
///
/// ```
/// assert_eq!(".*car.", qom::fulltext::like_pattern_to_regex("%car_"));
/// assert_eq!("100%", qom::fulltext::like_pattern_to_regex(r"100\%"));
/// assert_eq!(r"a\.b", qom::fulltext::like_pattern_to_regex("a.b"));
/// ```
pub fn like_pattern_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' | '*' => regex.push_str(".*"),
            '_' | '?' => regex.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => push_literal(&mut regex, escaped),
                None => push_literal(&mut regex, '\\'),
            },
            _ => push_literal(&mut regex, c),
        }
    }
    regex
}

fn push_literal(regex: &mut String, c: char) {
    let mut buffer = [0; 4];
    regex.push_str(&regex::escape(c.encode_utf8(&mut buffer)));
}
