//! Pure reconciliation of one tracked account against freshly fetched data.
//!
//! `reconcile` is a function of (stored snapshot, fetched data) to (updated
//! snapshot, events): it performs no I/O, so every decision rule lives here
//! and is unit-testable without a network or a store.

use std::collections::BTreeMap;

use poise::serenity_prelude::UserId;
use riftwatch_shared::{
    QueueCategory, TrackedAccount,
    events::{MatchResultEvent, NewRankEvent, RankChangeEvent, TrackerEvent},
    lol_match::Match,
    rank::{RankDirection, RankEntry},
};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The tracked account is missing from a match it supposedly played.
    /// The snapshot is left untouched so the match is retried next tick.
    #[error("participant {puuid} not found in match {match_id}")]
    ParticipantMissing { match_id: String, puuid: String },
}

/// Freshly fetched data for one account. `None` means the corresponding
/// fetch produced no usable data this tick.
#[derive(Debug, Default)]
pub struct ReconcileInput {
    /// Latest match id plus its detail, supplied when the id differs from
    /// the stored one.
    pub new_match: Option<(String, Match)>,
    pub rank_entries: Option<BTreeMap<QueueCategory, RankEntry>>,
}

#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The snapshot carrying every update of this tick.
    pub account: TrackedAccount,
    /// Emitted in delivery order: the match result first, then rank events
    /// in queue order.
    pub events: Vec<TrackerEvent>,
}

/// Diff the stored snapshot against the fetched data.
///
/// Either the returned account carries the full set of updates for this
/// tick, or the error leaves the caller's snapshot unchanged.
pub fn reconcile(
    user: UserId,
    snapshot: &TrackedAccount,
    input: ReconcileInput,
) -> Result<ReconcileOutcome, ReconcileError> {
    let mut account = snapshot.clone();
    let mut events = Vec::new();

    if let Some((match_id, detail)) = input.new_match {
        if account.last_match_id.as_deref() != Some(match_id.as_str()) {
            apply_match_result(user, &mut account, &mut events, match_id, &detail)?;
        }
    }

    if let Some(fetched) = input.rank_entries {
        apply_rank_entries(user, &mut account, &mut events, fetched);
    }

    Ok(ReconcileOutcome { account, events })
}

fn apply_match_result(
    user: UserId,
    account: &mut TrackedAccount,
    events: &mut Vec<TrackerEvent>,
    match_id: String,
    detail: &Match,
) -> Result<(), ReconcileError> {
    let Some(queue) = detail.queue_category() else {
        warn!(
            queue_id = detail.queue_id,
            %match_id,
            "unsupported queue type, skipping match"
        );
        return Ok(());
    };

    let participant =
        detail
            .participant(&account.puuid)
            .ok_or_else(|| ReconcileError::ParticipantMissing {
                match_id: match_id.clone(),
                puuid: account.puuid.clone(),
            })?;

    let win = participant.win;
    let streak = account.streaks.entry(queue).or_default().record(win);
    account.last_queue = Some(queue);
    account.last_match_id = Some(match_id);

    events.push(TrackerEvent::MatchResult(MatchResultEvent {
        user,
        riot_id: account.riot_id(),
        queue,
        win,
        streak,
    }));
    Ok(())
}

fn apply_rank_entries(
    user: UserId,
    account: &mut TrackedAccount,
    events: &mut Vec<TrackerEvent>,
    fetched: BTreeMap<QueueCategory, RankEntry>,
) {
    for (queue, entry) in fetched {
        match account.rank_entries.get(&queue) {
            None => {
                events.push(TrackerEvent::NewRank(NewRankEvent {
                    user,
                    riot_id: account.riot_id(),
                    queue,
                    entry: entry.clone(),
                }));
            }
            Some(stored) if *stored != entry => {
                let old_score = stored.score();
                let new_score = entry.score();
                if new_score != old_score {
                    let direction = if new_score > old_score {
                        RankDirection::Promoted
                    } else {
                        RankDirection::Demoted
                    };
                    events.push(TrackerEvent::RankChange(RankChangeEvent {
                        user,
                        riot_id: account.riot_id(),
                        queue,
                        direction,
                        entry: entry.clone(),
                    }));
                } else {
                    debug!(?queue, "points-only change, stored silently");
                }
            }
            Some(_) => {}
        }

        // The stored entry is always refreshed with the latest fetched
        // value, event or not.
        account.rank_entries.insert(queue, entry);
    }
}
