//! Heavenly stems (천간), earthly branches (지지) and the four-pillar chart.
//!
//! Stems and branches serialize as their hangul symbols; a pillar
//! serializes as `{"gan": .., "ji": ..}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Element, Polarity};

/// One of the ten heavenly stems, in cyclic order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "갑")]
    Gap,
    #[serde(rename = "을")]
    Eul,
    #[serde(rename = "병")]
    Byeong,
    #[serde(rename = "정")]
    Jeong,
    #[serde(rename = "무")]
    Mu,
    #[serde(rename = "기")]
    Gi,
    #[serde(rename = "경")]
    Gyeong,
    #[serde(rename = "신")]
    Sin,
    #[serde(rename = "임")]
    Im,
    #[serde(rename = "계")]
    Gye,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Gap,
        Stem::Eul,
        Stem::Byeong,
        Stem::Jeong,
        Stem::Mu,
        Stem::Gi,
        Stem::Gyeong,
        Stem::Sin,
        Stem::Im,
        Stem::Gye,
    ];

    const HANGUL: [&'static str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

    /// Stem at cyclic position `i` (wraps modulo 10).
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 10]
    }

    /// 0-based position in the cycle.
    pub fn index(self) -> usize {
        self as usize
    }

    /// 1-based position, as used by the remote scoring encoding.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Consecutive pairs share an element: 갑을 wood, 병정 fire, 무기 earth,
    /// 경신 metal, 임계 water.
    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }

    /// Even positions are yang (갑 병 무 경 임), odd positions yin.
    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn hangul(self) -> &'static str {
        Self::HANGUL[self.index()]
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hangul())
    }
}

impl FromStr for Stem {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::HANGUL
            .iter()
            .position(|&h| h == s.trim())
            .map(Self::from_index)
            .ok_or_else(|| UnknownSymbol::new("stem", s))
    }
}

/// One of the twelve earthly branches, in cyclic order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "자")]
    Ja,
    #[serde(rename = "축")]
    Chuk,
    #[serde(rename = "인")]
    In,
    #[serde(rename = "묘")]
    Myo,
    #[serde(rename = "진")]
    Jin,
    #[serde(rename = "사")]
    Sa,
    #[serde(rename = "오")]
    O,
    #[serde(rename = "미")]
    Mi,
    #[serde(rename = "신")]
    Sin,
    #[serde(rename = "유")]
    Yu,
    #[serde(rename = "술")]
    Sul,
    #[serde(rename = "해")]
    Hae,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Ja,
        Branch::Chuk,
        Branch::In,
        Branch::Myo,
        Branch::Jin,
        Branch::Sa,
        Branch::O,
        Branch::Mi,
        Branch::Sin,
        Branch::Yu,
        Branch::Sul,
        Branch::Hae,
    ];

    const HANGUL: [&'static str; 12] = [
        "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
    ];

    const ELEMENTS: [Element; 12] = [
        Element::Water, // 자
        Element::Earth, // 축
        Element::Wood,  // 인
        Element::Wood,  // 묘
        Element::Earth, // 진
        Element::Fire,  // 사
        Element::Fire,  // 오
        Element::Earth, // 미
        Element::Metal, // 신
        Element::Metal, // 유
        Element::Earth, // 술
        Element::Water, // 해
    ];

    /// Branch at cyclic position `i` (wraps modulo 12).
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// 1-based position, as used by the remote scoring encoding.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn element(self) -> Element {
        Self::ELEMENTS[self.index()]
    }

    pub fn hangul(self) -> &'static str {
        Self::HANGUL[self.index()]
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hangul())
    }
}

impl FromStr for Branch {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::HANGUL
            .iter()
            .position(|&h| h == s.trim())
            .map(Self::from_index)
            .ok_or_else(|| UnknownSymbol::new("branch", s))
    }
}

/// A symbol that is not part of the stem or branch cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSymbol {
    pub kind: &'static str,
    pub symbol: String,
}

impl UnknownSymbol {
    fn new(kind: &'static str, symbol: &str) -> Self {
        Self {
            kind,
            symbol: symbol.to_string(),
        }
    }
}

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.symbol)
    }
}

impl std::error::Error for UnknownSymbol {}

/// A stem/branch pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    #[serde(rename = "gan")]
    pub stem: Stem,
    #[serde(rename = "ji")]
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Build from a sexagenary cycle offset: the same offset selects the
    /// stem (mod 10) and the branch (mod 12).
    pub fn from_cycle(offset: usize) -> Self {
        Self::new(Stem::from_index(offset), Branch::from_index(offset))
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Year, month, day and hour pillars of one birth timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Year, month, day, hour branches.
    pub fn branches(&self) -> [Branch; 4] {
        self.pillars().map(|p| p.branch)
    }

    /// Stem then branch element for each pillar, in pillar order.
    pub fn elements(&self) -> [Element; 8] {
        let p = self.pillars();
        [
            p[0].stem.element(),
            p[0].branch.element(),
            p[1].stem.element(),
            p[1].branch.element(),
            p[2].stem.element(),
            p[2].branch.element(),
            p[3].stem.element(),
            p[3].branch.element(),
        ]
    }

    /// Polarity of the day stem (일간).
    pub fn day_polarity(&self) -> Polarity {
        self.day.stem.polarity()
    }

    /// `[yearStem, yearBranch, monthStem, monthBranch, dayStem, dayBranch]`,
    /// 1-based. The hour pillar is not part of the encoding.
    pub fn remote_encoding(&self) -> [u8; 6] {
        [
            self.year.stem.number(),
            self.year.branch.number(),
            self.month.stem.number(),
            self.month.branch.number(),
            self.day.stem.number(),
            self.day.branch.number(),
        ]
    }
}

impl fmt::Display for FourPillars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Stem::from_index(10), Stem::Gap);
        assert_eq!(Stem::from_index(17), Stem::Sin);
        assert_eq!(Branch::from_index(12), Branch::Ja);
        assert_eq!(Branch::from_index(20), Branch::Sin);
    }

    #[test]
    fn test_yang_stems() {
        let yang: Vec<&str> = Stem::ALL
            .iter()
            .filter(|s| s.polarity() == Polarity::Yang)
            .map(|s| s.hangul())
            .collect();
        assert_eq!(yang, vec!["갑", "병", "무", "경", "임"]);
    }

    #[test]
    fn test_stem_elements() {
        assert_eq!(Stem::Gap.element(), Element::Wood);
        assert_eq!(Stem::Jeong.element(), Element::Fire);
        assert_eq!(Stem::Gi.element(), Element::Earth);
        assert_eq!(Stem::Sin.element(), Element::Metal);
        assert_eq!(Stem::Gye.element(), Element::Water);
    }

    #[test]
    fn test_branch_elements() {
        let earth: Vec<Branch> = Branch::ALL
            .into_iter()
            .filter(|b| b.element() == Element::Earth)
            .collect();
        assert_eq!(
            earth,
            vec![Branch::Chuk, Branch::Jin, Branch::Mi, Branch::Sul]
        );
        assert_eq!(Branch::Ja.element(), Element::Water);
        assert_eq!(Branch::Hae.element(), Element::Water);
        assert_eq!(Branch::O.element(), Element::Fire);
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("경".parse::<Stem>().unwrap(), Stem::Gyeong);
        assert_eq!("신".parse::<Stem>().unwrap(), Stem::Sin);
        assert_eq!("신".parse::<Branch>().unwrap(), Branch::Sin);
        assert_eq!(" 해 ".parse::<Branch>().unwrap(), Branch::Hae);
        let err = "x".parse::<Branch>().unwrap_err();
        assert_eq!(err.kind, "branch");
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for s in Stem::ALL {
            assert_eq!(s.to_string().parse::<Stem>().unwrap(), s);
        }
        for b in Branch::ALL {
            assert_eq!(b.to_string().parse::<Branch>().unwrap(), b);
        }
    }

    #[test]
    fn test_pillar_serializes_as_gan_ji() {
        let p = Pillar::new(Stem::Gyeong, Branch::O);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json, serde_json::json!({"gan": "경", "ji": "오"}));
    }

    #[test]
    fn test_from_cycle() {
        assert_eq!(Pillar::from_cycle(0).to_string(), "갑자");
        assert_eq!(Pillar::from_cycle(59).to_string(), "계해");
        assert_eq!(Pillar::from_cycle(60), Pillar::from_cycle(0));
    }
}
