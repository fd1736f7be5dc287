/// Splits `text` into chunks of at most `max_len` characters.
pub fn paginate(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let chars: Vec<char> = text.chars().collect();

    if chars.len() <= max_len {
        return vec![text.to_string()];
    }

    chars
        .chunks(max_len)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_page() {
        assert_eq!(paginate("hello", 1900), vec!["hello".to_string()]);
        assert_eq!(paginate("", 10), vec![String::new()]);
    }

    #[test]
    fn test_long_text_split_in_order() {
        let text = "a".repeat(4000);
        let pages = paginate(&text, 1900);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 1900);
        assert_eq!(pages[2].len(), 200);
        assert_eq!(pages.concat(), text);
    }

    #[test]
    fn test_multibyte_characters_not_split() {
        let text = "é".repeat(5);
        let pages = paginate(&text, 2);
        assert_eq!(pages, vec!["éé", "éé", "é"]);
    }
}
