use pinyin::ToPinyin;

const SEPARATOR: char = '_';

/// Turns a note name (or link target) into the lowercase, underscore
/// delimited form Hexo posts are addressed by.
///
/// 1. Chinese characters become their toneless pinyin, consecutive syllables
///    joined by `_` but glued directly to neighbouring non-Chinese text
/// 2. spaces and `%20` become `_`
/// 3. everything is lowercased
///
/// The transform is idempotent: slugging a slug returns it unchanged.
pub fn normalize(text: &str) -> String {
    let transliterated = transliterate(text);
    space_to_underscore(&transliterated).to_lowercase()
}

/// Normalizes the heading part of a `#fragment`.
///
/// Hexo anchors keep the heading's case, so only spaces and dots are rewritten.
pub fn normalize_fragment(fragment: &str) -> String {
    space_to_underscore(fragment).replace('.', "_")
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if is_cjk(c) {
            match c.to_pinyin() {
                Some(py) => out.push_str(py.plain()),
                None => out.push(c),
            }
            out.push(SEPARATOR);
            in_run = true;
        } else {
            if in_run {
                out.pop();
                in_run = false;
            }
            out.push(c);
        }
    }

    if in_run {
        out.pop();
    }
    out
}

fn space_to_underscore(text: &str) -> String {
    text.replace(' ', "_").replace("%20", "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn spaces_and_percent_encoding() {
        assert_eq!(normalize("My Note"), "my_note");
        assert_eq!(normalize("My%20Note"), "my_note");
        assert_eq!(normalize("my_note"), "my_note");
    }

    #[test]
    fn chinese_run_is_underscore_joined() {
        assert_eq!(normalize("中文笔记"), "zhong_wen_bi_ji");
    }

    #[test]
    fn chinese_run_glues_to_latin_text() {
        assert_eq!(normalize("日Test"), "ritest");
        assert_eq!(normalize("Test日"), "testri");
        assert_eq!(normalize("Rust学习笔记2"), "rustxue_xi_bi_ji2");
    }

    #[test]
    fn space_between_runs_becomes_single_underscore() {
        assert_eq!(normalize("中 文"), "zhong_wen");
        assert_eq!(normalize("Hexo 博客"), "hexo_bo_ke");
    }

    #[test]
    fn other_characters_are_only_lowercased() {
        let cases = vec![
            ("/Other-Note", "/other-note"),
            ("https://example.com/a.png", "https://example.com/a.png"),
            ("Héllo Wörld", "héllo_wörld"),
            ("ガイド", "ガイド"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize(input), expected, "Mismatch for {:?}", input);
        }
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "",
            "My Note",
            "My%20Note",
            "日Test",
            "中文 Note%20二",
            "%%2020",
            "ALL CAPS/Path Segment.png",
            "İstanbul",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "Not idempotent for {:?}", input);
        }
    }

    #[test]
    fn fragment_keeps_case() {
        assert_eq!(normalize_fragment("Getting Started"), "Getting_Started");
        assert_eq!(normalize_fragment("Step%201"), "Step_1");
        assert_eq!(normalize_fragment("v1.2 Notes"), "v1_2_Notes");
    }
}
