//! Domain types shared across the Riftwatch components.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod events;
pub mod lol_match;
pub mod rank;
pub mod traits;

pub use rank::{Division, LeaguePoints, RankDirection, RankEntry, Tier};

/// Riot regions selectable when registering an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, poise::ChoiceParameter)]
pub enum Region {
    Na,
    Euw,
    Eune,
    Oce,
    Ru,
    Tr,
    Br,
    Lan,
    Las,
    Jp,
    Kr,
    Tw,
}

impl Region {
    /// Host serving the continent-level APIs: Account-V1, Match-V5.
    pub fn regional_host(self) -> &'static str {
        match self {
            Region::Na | Region::Br | Region::Lan | Region::Las => "americas.api.riotgames.com",
            Region::Euw | Region::Eune | Region::Tr | Region::Ru => "europe.api.riotgames.com",
            Region::Kr | Region::Jp => "asia.api.riotgames.com",
            Region::Oce | Region::Tw => "sea.api.riotgames.com",
        }
    }

    /// Host serving the platform-level APIs: Summoner-V4, League-V4,
    /// Mastery-V4.
    pub fn platform_host(self) -> &'static str {
        match self {
            Region::Na => "na1.api.riotgames.com",
            Region::Br => "br1.api.riotgames.com",
            Region::Lan => "la1.api.riotgames.com",
            Region::Las => "la2.api.riotgames.com",
            Region::Euw => "euw1.api.riotgames.com",
            Region::Eune => "eun1.api.riotgames.com",
            Region::Tr => "tr1.api.riotgames.com",
            Region::Ru => "ru.api.riotgames.com",
            Region::Kr => "kr.api.riotgames.com",
            Region::Jp => "jp1.api.riotgames.com",
            Region::Oce => "oc1.api.riotgames.com",
            Region::Tw => "tw2.api.riotgames.com",
        }
    }
}

/// Logical bucket a match belongs to, derived from the numeric Riot queue id.
///
/// Streaks are counted per category; only [`QueueCategory::SoloDuo`] and
/// [`QueueCategory::Flex`] carry rank entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QueueCategory {
    /// Ranked Solo/Duo
    SoloDuo,
    /// Ranked Flex
    Flex,
    /// 5v5 Normal Draft Picks
    NormalDraft,
    /// 5v5 Howling Abyss ARAM
    Aram,
    /// 2v2v2v2 Arena
    Arena,
}

impl QueueCategory {
    /// Map a Riot queue id to a category. Unknown ids are unsupported and
    /// yield `None`: the match is skipped by the caller, never processed.
    pub fn from_queue_id(queue_id: u16) -> Option<Self> {
        match queue_id {
            400 | 430 => Some(Self::NormalDraft),
            420 => Some(Self::SoloDuo),
            440 => Some(Self::Flex),
            450 => Some(Self::Aram),
            1700 => Some(Self::Arena),
            _ => None,
        }
    }

    /// The League-V4 `queueType` string for ranked categories.
    pub fn league_queue_type(&self) -> Option<&'static str> {
        match self {
            QueueCategory::SoloDuo => Some("RANKED_SOLO_5x5"),
            QueueCategory::Flex => Some("RANKED_FLEX_SR"),
            _ => None,
        }
    }

    pub fn from_league_queue_type(queue_type: &str) -> Option<Self> {
        match queue_type {
            "RANKED_SOLO_5x5" => Some(Self::SoloDuo),
            "RANKED_FLEX_SR" => Some(Self::Flex),
            _ => None,
        }
    }
}

impl fmt::Display for QueueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueueCategory::SoloDuo => "Ranked Solo/Duo",
            QueueCategory::Flex => "Ranked Flex",
            QueueCategory::NormalDraft => "Normal Draft",
            QueueCategory::Aram => "ARAM",
            QueueCategory::Arena => "Arena",
        };
        write!(f, "{}", name)
    }
}

/// Consecutive same-result counter for one queue category.
///
/// `wins` and `losses` are never both non-zero: recording a result zeroes
/// the opposite counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub wins: u32,
    pub losses: u32,
}

impl Streak {
    /// Record one result and return the resulting streak length.
    pub fn record(&mut self, win: bool) -> u32 {
        if win {
            self.wins += 1;
            self.losses = 0;
            self.wins
        } else {
            self.losses += 1;
            self.wins = 0;
            self.losses
        }
    }
}

/// One tracked game account and its last-known snapshot state, used as the
/// diff baseline on the next poll tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedAccount {
    pub game_name: String,
    pub tag_line: String,
    pub region: Region,
    /// Stable account identifier, independent of the display name.
    pub puuid: String,
    pub summoner_id: String,
    pub last_match_id: Option<String>,
    #[serde(default)]
    pub rank_entries: BTreeMap<QueueCategory, RankEntry>,
    #[serde(default)]
    pub streaks: BTreeMap<QueueCategory, Streak>,
    pub last_queue: Option<QueueCategory>,
}

impl TrackedAccount {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_category_maps_known_ids_and_rejects_the_rest() {
        assert_eq!(QueueCategory::from_queue_id(400), Some(QueueCategory::NormalDraft));
        assert_eq!(QueueCategory::from_queue_id(430), Some(QueueCategory::NormalDraft));
        assert_eq!(QueueCategory::from_queue_id(420), Some(QueueCategory::SoloDuo));
        assert_eq!(QueueCategory::from_queue_id(440), Some(QueueCategory::Flex));
        assert_eq!(QueueCategory::from_queue_id(450), Some(QueueCategory::Aram));
        assert_eq!(QueueCategory::from_queue_id(1700), Some(QueueCategory::Arena));
        assert_eq!(QueueCategory::from_queue_id(9999), None);
    }

    #[test]
    fn queue_category_league_strings_round_trip_for_ranked_queues() {
        assert_eq!(
            QueueCategory::from_league_queue_type("RANKED_SOLO_5x5"),
            Some(QueueCategory::SoloDuo)
        );
        assert_eq!(
            QueueCategory::from_league_queue_type("RANKED_FLEX_SR"),
            Some(QueueCategory::Flex)
        );
        assert_eq!(QueueCategory::from_league_queue_type("CHERRY"), None);
        assert_eq!(QueueCategory::Aram.league_queue_type(), None);
    }

    #[test]
    fn streak_zeroes_the_opposite_counter() {
        let mut streak = Streak::default();

        assert_eq!(streak.record(true), 1);
        assert_eq!(streak.record(true), 2);
        assert_eq!((streak.wins, streak.losses), (2, 0));

        assert_eq!(streak.record(false), 1);
        assert_eq!((streak.wins, streak.losses), (0, 1));

        assert_eq!(streak.record(true), 1);
        assert_eq!((streak.wins, streak.losses), (1, 0));
    }

    #[test]
    fn region_hosts() {
        assert_eq!(Region::Euw.platform_host(), "euw1.api.riotgames.com");
        assert_eq!(Region::Na.regional_host(), "americas.api.riotgames.com");
    }
}
