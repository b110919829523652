//! Periodic poll scheduler driving one reconciliation pass per tracked
//! account and handing the resulting events to the notification sink.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use futures::{StreamExt, stream};
use poise::serenity_prelude::UserId;
use riftwatch_riot_api::{
    api::lol::{LeagueApi, MatchApi},
    types::Fetched,
};
use riftwatch_shared::{
    QueueCategory, TrackedAccount,
    events::{StreakLossAlert, TrackerEvent},
    lol_match::Match,
    rank::RankEntry,
    traits::EventSink,
};
use riftwatch_store::SharedPlayerStore;
use tracing::{debug, error, info, warn};

pub mod reconcile;

use reconcile::{ReconcileError, ReconcileInput, ReconcileOutcome, reconcile};

/// How many accounts are polled concurrently within one tick.
const POLL_CONCURRENCY: usize = 10;

pub struct ResultPoller<Api> {
    api: Arc<Api>,
    store: SharedPlayerStore,
    sink: Arc<dyn EventSink>,
    poll_interval: Duration,
    /// User additionally alerted on each of their own losses.
    loss_alert_user: Option<UserId>,
}

impl<Api> ResultPoller<Api>
where
    Api: LeagueApi + MatchApi + 'static,
{
    pub fn new(
        api: Arc<Api>,
        store: SharedPlayerStore,
        sink: Arc<dyn EventSink>,
        poll_interval: Duration,
        loss_alert_user: Option<UserId>,
    ) -> Self {
        Self {
            api,
            store,
            sink,
            poll_interval,
            loss_alert_user,
        }
    }

    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!("poller started, interval {:?}", self.poll_interval);

            let mut interval = tokio::time::interval(self.poll_interval);

            // A failed cycle is logged inside poll_once and never tears the
            // loop down.
            loop {
                interval.tick().await;
                self.poll_once().await
            }
        })
    }

    /// One full pass over the roster. Per-account failures are logged and
    /// never abort the remaining accounts; the snapshot is persisted once at
    /// the end of the pass.
    async fn poll_once(&self) {
        info!("🔄 starting poll cycle");

        let accounts = self.store.all_accounts().await;
        stream::iter(accounts)
            .for_each_concurrent(POLL_CONCURRENCY, |(user, account)| async move {
                if let Err(e) = self.process_account(user, &account).await {
                    error!(
                        "processing {} exited with error: {e}",
                        account.riot_id()
                    );
                }
            })
            .await;

        if let Err(e) = self.store.save().await {
            error!("persisting the roster snapshot failed: {e}");
        }
    }

    async fn process_account(
        &self,
        user: UserId,
        snapshot: &TrackedAccount,
    ) -> Result<(), ReconcileError> {
        debug!("checking {}", snapshot.riot_id());

        let input = ReconcileInput {
            new_match: self.fetch_new_match(snapshot).await,
            rank_entries: self.fetch_rank_entries(snapshot).await,
        };

        let ReconcileOutcome { account, events } = reconcile(user, snapshot, input)?;
        self.store.commit(user, account).await;

        for event in with_loss_alerts(events, self.loss_alert_user) {
            self.sink.notify(&event).await;
        }
        Ok(())
    }

    /// The latest match with its detail, when it differs from the stored
    /// one. Fetch failures degrade to `None`: no data this tick, retried on
    /// the next one.
    async fn fetch_new_match(&self, account: &TrackedAccount) -> Option<(String, Match)> {
        let latest = match self
            .api
            .get_latest_match_id(&account.puuid, account.region)
            .await
        {
            Ok(Fetched::Found(Some(id))) => id,
            Ok(Fetched::Found(None)) | Ok(Fetched::NotFound) => {
                debug!("no match history for {}", account.riot_id());
                return None;
            }
            Err(e) => {
                warn!("fetching latest match id for {} failed: {e}", account.riot_id());
                return None;
            }
        };

        if account.last_match_id.as_deref() == Some(latest.as_str()) {
            debug!("{} no new result", account.riot_id());
            return None;
        }

        match self.api.get_match(&latest, account.region).await {
            Ok(Fetched::Found(detail)) => Some((latest, detail)),
            Ok(Fetched::NotFound) => {
                warn!("match {latest} not found on the API");
                None
            }
            Err(e) => {
                warn!("fetching match {latest} failed: {e}");
                None
            }
        }
    }

    async fn fetch_rank_entries(
        &self,
        account: &TrackedAccount,
    ) -> Option<BTreeMap<QueueCategory, RankEntry>> {
        match self
            .api
            .get_rank_entries(&account.summoner_id, account.region)
            .await
        {
            Ok(Fetched::Found(entries)) => Some(entries),
            Ok(Fetched::NotFound) => {
                debug!("no league entries for {}", account.riot_id());
                None
            }
            Err(e) => {
                warn!("fetching rank entries for {} failed: {e}", account.riot_id());
                None
            }
        }
    }
}

/// Sink-side condition: the designated subscriber additionally receives a
/// streak-loss alert right after their own losing match result.
pub fn with_loss_alerts(
    events: Vec<TrackerEvent>,
    designated: Option<UserId>,
) -> Vec<TrackerEvent> {
    let Some(designated) = designated else {
        return events;
    };

    let mut out = Vec::with_capacity(events.len() + 1);
    for event in events {
        let loss_alert = match &event {
            TrackerEvent::MatchResult(result) if !result.win && result.user == designated => {
                Some(TrackerEvent::StreakLoss(StreakLossAlert {
                    user: result.user,
                    riot_id: result.riot_id.clone(),
                    queue: result.queue,
                }))
            }
            _ => None,
        };
        out.push(event);
        if let Some(alert) = loss_alert {
            out.push(alert);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftwatch_shared::events::MatchResultEvent;

    fn loss(user: UserId) -> TrackerEvent {
        TrackerEvent::MatchResult(MatchResultEvent {
            user,
            riot_id: "Game#TAG".to_string(),
            queue: QueueCategory::SoloDuo,
            win: false,
            streak: 2,
        })
    }

    fn win(user: UserId) -> TrackerEvent {
        TrackerEvent::MatchResult(MatchResultEvent {
            user,
            riot_id: "Game#TAG".to_string(),
            queue: QueueCategory::SoloDuo,
            win: true,
            streak: 1,
        })
    }

    #[test]
    fn designated_user_loss_appends_an_alert_right_after() {
        let designated = UserId::new(5);
        let events = with_loss_alerts(vec![loss(designated)], Some(designated));

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TrackerEvent::MatchResult(_)));
        assert!(matches!(
            &events[1],
            TrackerEvent::StreakLoss(StreakLossAlert { user, .. }) if *user == designated
        ));
    }

    #[test]
    fn wins_and_other_users_get_no_alert() {
        let designated = UserId::new(5);

        assert_eq!(
            with_loss_alerts(vec![win(designated)], Some(designated)).len(),
            1
        );
        assert_eq!(
            with_loss_alerts(vec![loss(UserId::new(6))], Some(designated)).len(),
            1
        );
        assert_eq!(with_loss_alerts(vec![loss(UserId::new(5))], None).len(), 1);
    }
}
