//! Competitive rank model: tiers, divisions and the total order over them.

use std::fmt;

use serde::{Deserialize, Serialize};

pub type LeaguePoints = u16;

/// Competitive tiers from lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub const ALL: [Tier; 10] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    pub fn index(self) -> u8 {
        match self {
            Tier::Iron => 0,
            Tier::Bronze => 1,
            Tier::Silver => 2,
            Tier::Gold => 3,
            Tier::Platinum => 4,
            Tier::Emerald => 5,
            Tier::Diamond => 6,
            Tier::Master => 7,
            Tier::Grandmaster => 8,
            Tier::Challenger => 9,
        }
    }

    /// Divisions exist below the top two tiers only.
    pub fn has_divisions(self) -> bool {
        !matches!(self, Tier::Grandmaster | Tier::Challenger)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        };
        write!(f, "{}", name)
    }
}

/// Divisions within a tier, from lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Division {
    IV,
    III,
    II,
    I,
}

impl Division {
    pub const ALL: [Division; 4] = [Division::IV, Division::III, Division::II, Division::I];

    pub fn index(self) -> u8 {
        match self {
            Division::IV => 0,
            Division::III => 1,
            Division::II => 2,
            Division::I => 3,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Division::IV => "IV",
            Division::III => "III",
            Division::II => "II",
            Division::I => "I",
        };
        write!(f, "{}", name)
    }
}

/// Rank in one ranked queue. Equality is structural; the ordering used for
/// promotion/demotion detection comes from [`RankEntry::score`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub tier: Tier,
    /// Absent for the divisionless top tiers.
    pub division: Option<Division>,
    pub points: LeaguePoints,
}

impl RankEntry {
    /// Total order over (tier, division); points never move the score.
    /// A missing division counts as the single top division of its tier.
    pub fn score(&self) -> u8 {
        self.tier.index() * 4 + self.division.map_or(3, Division::index)
    }
}

impl fmt::Display for RankEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.division {
            Some(division) => write!(f, "{} {} ({} LP)", self.tier, division, self.points),
            None => write!(f, "{} ({} LP)", self.tier, self.points),
        }
    }
}

/// Direction of a rank change, strictly derived from the score delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
    Promoted,
    Demoted,
}

impl fmt::Display for RankDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankDirection::Promoted => write!(f, "promoted"),
            RankDirection::Demoted => write!(f, "demoted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tier: Tier, division: Option<Division>) -> RankEntry {
        RankEntry {
            tier,
            division,
            points: 0,
        }
    }

    #[test]
    fn score_is_strictly_monotonic_along_the_promotion_path() {
        let mut previous: Option<RankEntry> = None;

        for tier in Tier::ALL {
            let divisions: &[Option<Division>] = if tier.has_divisions() {
                &[
                    Some(Division::IV),
                    Some(Division::III),
                    Some(Division::II),
                    Some(Division::I),
                ]
            } else {
                &[None]
            };

            for division in divisions {
                let current = entry(tier, *division);
                if let Some(prev) = previous {
                    assert!(
                        current.score() > prev.score(),
                        "{} should outrank {}",
                        current,
                        prev
                    );
                }
                previous = Some(current);
            }
        }
    }

    #[test]
    fn score_spot_checks() {
        assert!(
            entry(Tier::Gold, Some(Division::II)).score()
                > entry(Tier::Gold, Some(Division::III)).score()
        );
        assert!(
            entry(Tier::Silver, Some(Division::I)).score()
                > entry(Tier::Bronze, Some(Division::I)).score()
        );
        assert!(entry(Tier::Challenger, None).score() > entry(Tier::Grandmaster, None).score());
    }

    #[test]
    fn points_never_move_the_score() {
        let low = RankEntry {
            tier: Tier::Gold,
            division: Some(Division::II),
            points: 0,
        };
        let high = RankEntry {
            tier: Tier::Gold,
            division: Some(Division::II),
            points: 99,
        };
        assert_eq!(low.score(), high.score());
        assert_ne!(low, high);
    }

    #[test]
    fn tier_serde_uses_the_api_spelling() {
        let tier: Tier = serde_json::from_str("\"GRANDMASTER\"").unwrap();
        assert_eq!(tier, Tier::Grandmaster);
        assert_eq!(serde_json::to_string(&Tier::Iron).unwrap(), "\"IRON\"");

        let division: Division = serde_json::from_str("\"IV\"").unwrap();
        assert_eq!(division, Division::IV);
    }
}
