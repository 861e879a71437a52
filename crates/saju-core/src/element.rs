use serde::{Deserialize, Serialize};

use crate::ganzhi::FourPillars;

/// The five phases (오행).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Fixed order used wherever an index selects an element
    /// (e.g. the name-stroke heuristic).
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// Generative cycle (상생): wood → fire → earth → metal → water → wood.
    pub fn generates(self, other: Element) -> bool {
        matches!(
            (self, other),
            (Element::Wood, Element::Fire)
                | (Element::Fire, Element::Earth)
                | (Element::Earth, Element::Metal)
                | (Element::Metal, Element::Water)
                | (Element::Water, Element::Wood)
        )
    }

    /// Destructive cycle (상극): wood → earth, fire → metal, earth → water,
    /// metal → wood, water → fire.
    pub fn destroys(self, other: Element) -> bool {
        matches!(
            (self, other),
            (Element::Wood, Element::Earth)
                | (Element::Fire, Element::Metal)
                | (Element::Earth, Element::Water)
                | (Element::Metal, Element::Wood)
                | (Element::Water, Element::Fire)
        )
    }

    pub fn hangul(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }
}

/// Either element generates the other.
pub fn is_generative_pair(a: Element, b: Element) -> bool {
    a.generates(b) || b.generates(a)
}

/// Either element destroys the other.
pub fn is_destructive_pair(a: Element, b: Element) -> bool {
    a.destroys(b) || b.destroys(a)
}

/// Yin/yang polarity of a stem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

/// Generative and destructive pairings between two charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTally {
    pub generative: u32,
    pub destructive: u32,
}

/// Compare all 8 elements of one chart against all 8 of the other (64 pairs).
///
/// Each pair is tested against both cycles independently, so a pair may
/// count toward both tallies.
pub fn analyze_elements(a: &FourPillars, b: &FourPillars) -> ElementTally {
    let lhs = a.elements();
    let rhs = b.elements();
    let mut tally = ElementTally::default();

    for &x in &lhs {
        for &y in &rhs {
            if is_generative_pair(x, y) {
                tally.generative += 1;
            }
            if is_destructive_pair(x, y) {
                tally.destructive += 1;
            }
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::convert;

    #[test]
    fn test_generative_cycle_closes() {
        let mut e = Element::Wood;
        for _ in 0..5 {
            let next = Element::ALL
                .into_iter()
                .find(|&n| e.generates(n))
                .unwrap();
            e = next;
        }
        assert_eq!(e, Element::Wood);
    }

    #[test]
    fn test_each_element_destroys_exactly_one() {
        for e in Element::ALL {
            let n = Element::ALL.iter().filter(|&&o| e.destroys(o)).count();
            assert_eq!(n, 1, "{e:?}");
        }
    }

    #[test]
    fn test_cycles_are_disjoint() {
        for a in Element::ALL {
            for b in Element::ALL {
                assert!(!(is_generative_pair(a, b) && is_destructive_pair(a, b)));
            }
        }
    }

    #[test]
    fn test_same_element_is_neutral() {
        for e in Element::ALL {
            assert!(!is_generative_pair(e, e));
            assert!(!is_destructive_pair(e, e));
        }
    }

    #[test]
    fn test_known_tally() {
        let a = convert(1990, 5, 15, 12).unwrap();
        let b = convert(1992, 8, 20, 12).unwrap();
        let tally = analyze_elements(&a, &b);
        assert_eq!(tally.generative, 26);
        assert_eq!(tally.destructive, 23);
    }

    #[test]
    fn test_tally_bounded_by_pair_count() {
        let a = convert(2001, 1, 1, 0).unwrap();
        let b = convert(1955, 12, 31, 23).unwrap();
        let tally = analyze_elements(&a, &b);
        assert!(tally.generative + tally.destructive <= 64);
    }
}
