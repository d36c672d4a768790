/// Bind the last two words with a non-breaking space so a title never ends
/// with a single word on its own line.
pub fn prevent_widows(text: &str) -> String {
    let mut words: Vec<&str> = text.split(' ').collect();
    if words.len() < 2 {
        return text.to_string();
    }

    let last = words.pop().unwrap_or_default();
    let before_last = words.pop().unwrap_or_default();
    let joined = format!("{}\u{00A0}{}", before_last, last);

    let mut out = words.join(" ");
    if !words.is_empty() {
        out.push(' ');
    }
    out.push_str(&joined);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevent_widows() {
        assert_eq!(prevent_widows("a b c"), "a b\u{00A0}c");
        assert_eq!(prevent_widows("dos palabras"), "dos\u{00A0}palabras");
        assert_eq!(prevent_widows("sola"), "sola");
        assert_eq!(prevent_widows(""), "");
    }
}
