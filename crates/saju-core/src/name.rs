//! Name stroke heuristic.
//!
//! A coarse estimate, not a real stroke count: each precomposed Hangul
//! syllable contributes 5–14 strokes derived from its code point, any other
//! character contributes 3.

use crate::element::Element;

const HANGUL_FIRST: u32 = 0xAC00; // 가
const HANGUL_LAST: u32 = 0xD7A3; // 힣
const HANGUL_BASE_STROKES: u32 = 5;
const FALLBACK_STROKES: u32 = 3;

/// Estimated stroke count of a name. Blank names have zero strokes.
/// Surrounding whitespace is trimmed first, so it never counts as 3-stroke
/// characters.
pub fn strokes(name: &str) -> u32 {
    let name = name.trim();
    name.chars().map(char_strokes).sum()
}

fn char_strokes(c: char) -> u32 {
    let code = u32::from(c);
    if (HANGUL_FIRST..=HANGUL_LAST).contains(&code) {
        HANGUL_BASE_STROKES + (code - HANGUL_FIRST) % 10
    } else {
        FALLBACK_STROKES
    }
}

/// Element of a name: `strokes mod 5` over wood, fire, earth, metal, water.
/// Blank names are earth.
pub fn name_element(name: &str) -> Element {
    if name.trim().is_empty() {
        return Element::Earth;
    }
    Element::ALL[(strokes(name) % 5) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangul_strokes() {
        assert_eq!(strokes("가"), 5);
        assert_eq!(strokes("김철수"), 29);
        assert_eq!(strokes("이영희"), 36);
    }

    #[test]
    fn test_fallback_strokes() {
        assert_eq!(strokes("Kim"), 9);
        assert_eq!(strokes("A1"), 6);
    }

    #[test]
    fn test_mixed_script() {
        assert_eq!(strokes("가A"), 8);
    }

    #[test]
    fn test_blank_name() {
        assert_eq!(strokes(""), 0);
        assert_eq!(strokes("   "), 0);
        assert_eq!(name_element(""), Element::Earth);
        assert_eq!(name_element("  "), Element::Earth);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(strokes(" 다"), strokes("다"));
        assert_eq!(strokes("다 "), 9);
        assert_eq!(name_element(" 다 "), Element::Water);
        // inner spaces still count
        assert_eq!(strokes("가 가"), 13);
    }

    #[test]
    fn test_name_element() {
        assert_eq!(name_element("김철수"), Element::Water); // 29 % 5 = 4
        assert_eq!(name_element("이영희"), Element::Fire); // 36 % 5 = 1
        assert_eq!(name_element("가"), Element::Wood); // 5 % 5 = 0
    }

    #[test]
    fn test_per_syllable_range() {
        for c in ['가', '각', '힣', '뷁', '한'] {
            let s = char_strokes(c);
            assert!((5..=14).contains(&s), "{c}: {s}");
        }
    }
}
