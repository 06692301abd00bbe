pub(crate) const GLYPH_WIDTH: i32 = 3;
pub(crate) const GLYPH_HEIGHT: i32 = 5;
pub(crate) const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;
pub(crate) const LINE_ADVANCE: i32 = GLYPH_HEIGHT + 2;

const ASCII_GLYPHS: [u16; 95] = [
    0x0000, 0x2482, 0x5a00, 0x5f7d, 0x7ddf, 0x52a5, 0x2aab, 0x2400, //
    0x1491, 0x4494, 0x0aa8, 0x05d0, 0x0014, 0x01c0, 0x0002, 0x12a4, //
    0x7b6f, 0x2c97, 0x73e7, 0x73cf, 0x5bc9, 0x79cf, 0x79ef, 0x7292, //
    0x7bef, 0x7bcf, 0x0410, 0x0414, 0x1511, 0x0e38, 0x4454, 0x72c2, //
    0x7be7, 0x2bed, 0x6bae, 0x7927, 0x6b6e, 0x79a7, 0x79a4, 0x796f, //
    0x5bed, 0x7497, 0x726f, 0x5bad, 0x4927, 0x5fed, 0x5ffd, 0x7b6f, //
    0x6ba4, 0x7b79, 0x6bad, 0x79cf, 0x7492, 0x5b6f, 0x5b6a, 0x5bfd, //
    0x5aad, 0x5a92, 0x72a7, 0x6926, 0x4891, 0x324b, 0x2a00, 0x0007, //
    0x4400, 0x0e7f, 0x49ae, 0x0f27, 0x13ef, 0x0fa7, 0x39a4, 0x0f79, //
    0x49ad, 0x2092, 0x106a, 0x4bad, 0x4927, 0x0ded, 0x0d6d, 0x0f6f, //
    0x0d74, 0x0f79, 0x0d64, 0x0f8f, 0x2e93, 0x0b6f, 0x0b6a, 0x0b7a, //
    0x0a95, 0x0b79, 0x0e57, 0x3593, 0x2492, 0x64d6, 0x0780,
];

const FALLBACK_GLYPH: u16 = 0x72c2;

pub(crate) fn glyph_bits(ch: char) -> u16 {
    match ch {
        ' '..='~' => ASCII_GLYPHS[ch as usize - ' ' as usize],
        _ => FALLBACK_GLYPH,
    }
}

pub(crate) fn glyph_pixel_set(bits: u16, col: i32, row: i32) -> bool {
    let shift = (GLYPH_HEIGHT - 1 - row) * GLYPH_WIDTH + (GLYPH_WIDTH - 1 - col);
    (bits >> shift) & 1 == 1
}

pub(crate) fn text_width(text: &str) -> i32 {
    let chars = text.chars().count() as i32;
    if chars == 0 {
        0
    } else {
        chars * GLYPH_ADVANCE - 1
    }
}

pub(crate) fn wrap_text(text: &str, max_width: i32) -> Vec<String> {
    let max_chars = ((max_width + 1) / GLYPH_ADVANCE).max(1) as usize;
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: &str = word;
            loop {
                let line_chars = line.chars().count();
                let word_chars = word.chars().count();
                let needed = if line.is_empty() {
                    word_chars
                } else {
                    line_chars + 1 + word_chars
                };
                if needed <= max_chars {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(word);
                    break;
                }
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    continue;
                }
                let split = word
                    .char_indices()
                    .nth(max_chars)
                    .map(|(index, _)| index)
                    .unwrap_or(word.len());
                lines.push(word[..split].to_string());
                word = &word[split..];
                if word.is_empty() {
                    break;
                }
            }
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_rows_decode_top_down() {
        // 'T' is a full top bar over a centered stem.
        let t = glyph_bits('T');
        assert!((0..3).all(|col| glyph_pixel_set(t, col, 0)));
        assert!(!glyph_pixel_set(t, 0, 4));
        assert!(glyph_pixel_set(t, 1, 4));
    }

    #[test]
    fn space_is_blank_and_non_ascii_falls_back() {
        assert_eq!(glyph_bits(' '), 0);
        assert_eq!(glyph_bits('é'), FALLBACK_GLYPH);
        assert_eq!(glyph_bits('?'), FALLBACK_GLYPH);
    }

    #[test]
    fn text_width_has_no_trailing_gap() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("a"), 3);
        assert_eq!(text_width("ab"), 7);
    }

    #[test]
    fn wrap_breaks_between_words() {
        let lines = wrap_text("Hamlet stabs the rat", text_width("Hamlet stabs"));
        assert_eq!(lines, vec!["Hamlet stabs", "the rat"]);
    }

    #[test]
    fn wrap_honors_explicit_newlines() {
        let lines = wrap_text("Kenny: Mmmmmmmm.\n*Kenny dies*", 200);
        assert_eq!(lines, vec!["Kenny: Mmmmmmmm.", "*Kenny dies*"]);
    }

    #[test]
    fn wrap_splits_words_longer_than_a_line() {
        let lines = wrap_text("abcdefgh", text_width("abc"));
        assert_eq!(lines, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wrapped_lines_fit_the_width() {
        let width = 122;
        let text = "Queen Gertrude:  Hamlet, o, Hamlet.  Wherefore art thou staring at my curtain?";
        for line in wrap_text(text, width) {
            assert!(text_width(&line) <= width, "line={line}");
        }
    }
}
