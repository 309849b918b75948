/// Greedy word wrap by character count.
///
/// Words are accumulated into a line while the joined length stays within
/// `max_chars`; the word that would overflow starts the next line. A word
/// longer than `max_chars` is kept whole on a line of its own. Lengths count
/// `char`s, not bytes, so accented descriptions wrap like their ASCII forms.
pub fn wrap_words<'a, I>(words: I, max_chars: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in words {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Wraps free text, splitting on any whitespace.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    wrap_words(text.split_whitespace(), max_chars)
}
