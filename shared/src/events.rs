//! Events emitted by one reconciliation pass, delivered to the notification
//! sink in emission order: match result first, then rank events.

use poise::serenity_prelude::UserId;

use crate::rank::{RankDirection, RankEntry};
use crate::QueueCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    MatchResult(MatchResultEvent),
    NewRank(NewRankEvent),
    RankChange(RankChangeEvent),
    StreakLoss(StreakLossAlert),
}

/// A newly completed match, with the streak length it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResultEvent {
    pub user: UserId,
    pub riot_id: String,
    pub queue: QueueCategory,
    pub win: bool,
    /// Length of the streak after this result.
    pub streak: u32,
}

/// First rank entry ever seen for a queue: a fresh placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRankEvent {
    pub user: UserId,
    pub riot_id: String,
    pub queue: QueueCategory,
    pub entry: RankEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankChangeEvent {
    pub user: UserId,
    pub riot_id: String,
    pub queue: QueueCategory,
    pub direction: RankDirection,
    pub entry: RankEntry,
}

/// Extra alert delivered to the designated subscriber on each of their losses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakLossAlert {
    pub user: UserId,
    pub riot_id: String,
    pub queue: QueueCategory,
}
