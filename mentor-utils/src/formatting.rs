/// Neutralize user or model supplied `@` mentions before echoing text back.
pub fn escape_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Split text into pieces of at most `max_chars` characters, preferring line
/// boundaries and only cutting inside a line when it is longer than a piece.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.trim().lines() {
        let line = line.trim_end();
        let line_len = line.chars().count();
        let separator = usize::from(current_len > 0);

        if current_len + separator + line_len <= max_chars {
            if separator == 1 {
                current.push('\n');
            }
            current.push_str(line);
            current_len += separator + line_len;
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= max_chars {
            current.push_str(line);
            current_len = line_len;
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        for piece in chars.chunks(max_chars) {
            if piece.len() == max_chars {
                chunks.push(piece.iter().collect());
            } else {
                current = piece.iter().collect();
                current_len = piece.len();
            }
        }
    }

    if current_len > 0 || chunks.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Render a fixed-width text bar, e.g. `▰▰▰▱▱▱▱▱▱▱` for 30/100.
pub fn progress_bar(value: u64, total: u64, width: usize) -> String {
    let total = total.max(1);
    let value = value.min(total);
    let filled = ((value as u128 * width as u128) / total as u128) as usize;

    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n('▰', filled));
    bar.extend(std::iter::repeat_n('▱', width - filled));
    bar
}
