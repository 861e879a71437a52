//! Branch-pair relation tables used by the affliction analysis.
//!
//! Tables are indexed by branch position and applied directionally:
//! a relation `x → y` means "x, found in chart A, is afflicted by y in
//! chart B".

use crate::ganzhi::Branch;
use crate::ganzhi::Branch::*;

/// 충 (opposition). Involutive: every branch opposes the one six steps away.
const OPPOSITION: [Branch; 12] = [O, Mi, Sin, Yu, Sul, Hae, Ja, Chuk, In, Myo, Jin, Sa];

/// 형 (punishment). 0–3 targets per branch; 오, 유 and 해 punish themselves.
const PUNISHMENT: [&[Branch]; 12] = [
    &[Myo],            // 자
    &[Jin, Sul, Mi],   // 축
    &[Sa, Sin],        // 인
    &[Ja],             // 묘
    &[Chuk, Sul, Mi],  // 진
    &[In, Sin],        // 사
    &[O],              // 오
    &[Chuk, Jin, Sul], // 미
    &[In, Sa],         // 신
    &[Yu],             // 유
    &[Chuk, Jin, Mi],  // 술
    &[Hae],            // 해
];

/// 파 (breaking).
const BREAKING: [Branch; 12] = [Yu, Sin, Hae, O, Myo, Ja, Myo, Chuk, Chuk, Ja, Jin, In];

/// 해 (harm).
const HARM: [Branch; 12] = [Hae, Sin, Sa, Jin, Myo, In, Ja, Chuk, Chuk, O, Hae, Ja];

pub fn opposition(b: Branch) -> Branch {
    OPPOSITION[b.index()]
}

pub fn punishment(b: Branch) -> &'static [Branch] {
    PUNISHMENT[b.index()]
}

pub fn breaking(b: Branch) -> Branch {
    BREAKING[b.index()]
}

pub fn harm(b: Branch) -> Branch {
    HARM[b.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposition_is_involutive() {
        for b in Branch::ALL {
            assert_eq!(opposition(opposition(b)), b, "{b}");
            assert_ne!(opposition(b), b);
        }
    }

    #[test]
    fn test_opposition_six_steps() {
        for b in Branch::ALL {
            assert_eq!(opposition(b).index(), (b.index() + 6) % 12);
        }
    }

    #[test]
    fn test_self_punishing_branches() {
        let selfish: Vec<Branch> = Branch::ALL
            .into_iter()
            .filter(|&b| punishment(b).contains(&b))
            .collect();
        assert_eq!(selfish, vec![O, Yu, Hae]);
    }

    #[test]
    fn test_punishment_target_counts() {
        assert_eq!(punishment(Ja), &[Myo]);
        assert_eq!(punishment(Chuk).len(), 3);
        assert_eq!(punishment(In).len(), 2);
        for b in Branch::ALL {
            assert!((1..=3).contains(&punishment(b).len()));
        }
    }

    #[test]
    fn test_breaking_and_harm_spot_checks() {
        assert_eq!(breaking(Ja), Yu);
        assert_eq!(breaking(Jin), Myo);
        assert_eq!(breaking(Sul), Jin);
        assert_eq!(harm(Ja), Hae);
        assert_eq!(harm(Yu), O);
        assert_eq!(harm(Hae), Ja);
    }

    #[test]
    fn test_breaking_is_not_involutive() {
        // 진 → 묘 but 묘 → 오
        assert_eq!(breaking(Jin), Myo);
        assert_ne!(breaking(Myo), Jin);
    }
}
