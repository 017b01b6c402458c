//! Cosmetic clean-up for model replies. Only applied when `TIDY_REPLIES` is on.

const SENTENCE_END: [char; 3] = ['.', '!', '?'];

/// Applies every clean-up step in order.
pub fn tidy(text: &str) -> String {
    space_after_sentence_end(&collapse_blank_lines(text))
}

/// Replaces every run of three or more newlines with exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run <= 2 {
                out.push(ch);
            }
        } else {
            run = 0;
            out.push(ch);
        }
    }
    out
}

/// Inserts one space between a sentence-ending mark and a capital letter that
/// directly follows it, e.g. `"Done.Next"` becomes `"Done. Next"`.
pub fn space_after_sentence_end(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if ch.is_uppercase() && prev.is_some_and(|p| SENTENCE_END.contains(&p)) {
            out.push(' ');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{collapse_blank_lines, space_after_sentence_end, tidy};

    #[test]
    fn collapse_reduces_long_newline_runs_to_two() {
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb\n\n\n"), "a\n\nb\n\n");
    }

    #[test]
    fn collapse_leaves_short_runs_alone() {
        assert_eq!(collapse_blank_lines("a\nb\n\nc"), "a\nb\n\nc");
        assert_eq!(collapse_blank_lines(""), "");
    }

    #[test]
    fn collapse_never_leaves_triple_newline_and_is_idempotent() {
        let inputs = [
            "\n\n\n",
            "x\n\n\n\ny\n\n\n\n\n\nz",
            "\n\n \n\n\n",
            "no newlines here",
            "trailing\n\n\n\n",
        ];
        for input in inputs {
            let once = collapse_blank_lines(input);
            assert!(!once.contains("\n\n\n"), "triple newline in {once:?}");
            assert_eq!(collapse_blank_lines(&once), once);
        }
    }

    #[test]
    fn spacing_inserted_before_capital_after_sentence_end() {
        assert_eq!(space_after_sentence_end("Done.Next"), "Done. Next");
        assert_eq!(space_after_sentence_end("Really?Yes!Great"), "Really? Yes! Great");
    }

    #[test]
    fn spacing_ignores_lowercase_digits_and_existing_spaces() {
        assert_eq!(space_after_sentence_end("3.14 and e.g.x"), "3.14 and e.g.x");
        assert_eq!(space_after_sentence_end("Done. Next"), "Done. Next");
        assert_eq!(space_after_sentence_end(".A"), ". A");
    }

    #[test]
    fn tidy_is_idempotent() {
        let raw = "Hello.World\n\n\n\nBye!See you";
        let once = tidy(raw);
        assert_eq!(once, "Hello. World\n\nBye! See you");
        assert_eq!(tidy(&once), once);
    }

    #[test]
    fn tidy_leaves_plain_reply_untouched() {
        assert_eq!(tidy("Hi there!"), "Hi there!");
    }
}
