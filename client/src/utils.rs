use std::io::{self, Write};

/// Characters of a relay response shown in the log preview.
pub const PREVIEW_CHARS: usize = 100;

/// First [`PREVIEW_CHARS`] characters of `response`, always followed by `...`.
pub fn response_preview(response: &str) -> String {
    let head: String = response.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

pub fn prompt(label: &str) -> io::Result<()> {
    print!("{} ", label);
    io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_previews_still_get_the_marker() {
        assert_eq!(response_preview("ok"), "ok...");
    }

    #[test]
    fn long_previews_are_cut_on_char_boundaries() {
        let long = "é".repeat(150);
        let preview = response_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("é..."));
    }
}
