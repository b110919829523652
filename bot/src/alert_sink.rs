//! Discord rendering of tracker events into the configured alert channel.

use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, ChannelId, CreateMessage, Mention};
use riftwatch_shared::events::TrackerEvent;
use riftwatch_shared::traits::EventSink;
use tracing::error;

/// A way to send a message, so alert delivery is testable without a gateway.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, channel_id: ChannelId, msg: CreateMessage)
        -> serenity::Result<()>;
}

#[async_trait]
impl MessageSender for Arc<serenity::Http> {
    async fn send_message(
        &self,
        channel_id: ChannelId,
        msg: CreateMessage,
    ) -> serenity::Result<()> {
        channel_id.send_message(self, msg).await.map(|_| ())
    }
}

/// [`EventSink`] delivering a human-readable rendering of every event to a
/// fixed channel. Send failures are logged and never reach the scheduler.
pub struct DiscordEventSink<S> {
    sender: S,
    channel: ChannelId,
}

impl<S: MessageSender> DiscordEventSink<S> {
    pub fn new(sender: S, channel: ChannelId) -> Self {
        Self { sender, channel }
    }
}

fn render(event: &TrackerEvent) -> String {
    match event {
        TrackerEvent::MatchResult(e) => {
            let (verb, unit) = if e.win { ("won", "win") } else { ("lost", "loss") };
            format!(
                "{} just {} a game in {} with Riot ID: {} ({} {} streak)",
                Mention::User(e.user),
                verb,
                e.queue,
                e.riot_id,
                e.streak,
                unit
            )
        }
        TrackerEvent::NewRank(e) => format!(
            "{} has a new rank in {}: **{}** with Riot ID: {}",
            Mention::User(e.user),
            e.queue,
            e.entry,
            e.riot_id
        ),
        TrackerEvent::RankChange(e) => format!(
            "{} has been **{}** to **{}** in {} with Riot ID: {}",
            Mention::User(e.user),
            e.direction,
            e.entry,
            e.queue,
            e.riot_id
        ),
        TrackerEvent::StreakLoss(e) => format!(
            "{} just lost a game in {} with Riot ID: {}",
            Mention::User(e.user),
            e.queue,
            e.riot_id
        ),
    }
}

#[async_trait]
impl<S: MessageSender> EventSink for DiscordEventSink<S> {
    async fn notify(&self, event: &TrackerEvent) {
        let message = CreateMessage::new().content(render(event));
        if let Err(e) = self.sender.send_message(self.channel, message).await {
            error!("failed to send alert message: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poise::serenity_prelude::{self as serenity, UserId};
    use riftwatch_shared::events::{
        MatchResultEvent, NewRankEvent, RankChangeEvent, StreakLossAlert,
    };
    use riftwatch_shared::rank::{Division, RankDirection, RankEntry, Tier};
    use riftwatch_shared::QueueCategory;
    use std::sync::{Arc, Mutex};

    struct DummySender {
        pub sent: Arc<Mutex<Vec<(ChannelId, String)>>>,
        pub fail: bool,
    }

    #[async_trait]
    impl MessageSender for DummySender {
        async fn send_message(
            &self,
            channel_id: ChannelId,
            msg: CreateMessage,
        ) -> serenity::Result<()> {
            if self.fail {
                return Err(serenity::Error::Other("fail"));
            }
            let data = serde_json::to_string(&msg).unwrap();
            self.sent.lock().unwrap().push((channel_id, data));
            Ok(())
        }
    }

    fn entry() -> RankEntry {
        RankEntry {
            tier: Tier::Gold,
            division: Some(Division::I),
            points: 5,
        }
    }

    #[tokio::test]
    async fn events_are_rendered_into_the_configured_channel() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = DiscordEventSink::new(
            DummySender {
                sent: sent.clone(),
                fail: false,
            },
            ChannelId::new(10),
        );

        sink.notify(&TrackerEvent::RankChange(RankChangeEvent {
            user: UserId::new(1),
            riot_id: "Game#TAG".to_string(),
            queue: QueueCategory::SoloDuo,
            direction: RankDirection::Promoted,
            entry: entry(),
        }))
        .await;

        let messages = sent.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, ChannelId::new(10));
        assert!(messages[0].1.contains("promoted"));
        assert!(messages[0].1.contains("GOLD I (5 LP)"));
        assert!(messages[0].1.contains("Game#TAG"));
    }

    #[tokio::test]
    async fn each_event_kind_has_a_rendering() {
        let user = UserId::new(1);
        let riot_id = "Game#TAG".to_string();

        let match_result = render(&TrackerEvent::MatchResult(MatchResultEvent {
            user,
            riot_id: riot_id.clone(),
            queue: QueueCategory::Aram,
            win: false,
            streak: 3,
        }));
        assert!(match_result.contains("lost"));
        assert!(match_result.contains("3 loss streak"));
        assert!(match_result.contains("ARAM"));

        let new_rank = render(&TrackerEvent::NewRank(NewRankEvent {
            user,
            riot_id: riot_id.clone(),
            queue: QueueCategory::Flex,
            entry: entry(),
        }));
        assert!(new_rank.contains("new rank"));
        assert!(new_rank.contains("Ranked Flex"));

        let streak_loss = render(&TrackerEvent::StreakLoss(StreakLossAlert {
            user,
            riot_id,
            queue: QueueCategory::SoloDuo,
        }));
        assert!(streak_loss.contains("just lost"));
        assert!(streak_loss.contains("<@1>"));
    }

    #[tokio::test]
    async fn sender_failures_are_swallowed() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = DiscordEventSink::new(
            DummySender {
                sent: sent.clone(),
                fail: true,
            },
            ChannelId::new(10),
        );

        sink.notify(&TrackerEvent::StreakLoss(StreakLossAlert {
            user: UserId::new(1),
            riot_id: "Game#TAG".to_string(),
            queue: QueueCategory::SoloDuo,
        }))
        .await;

        assert!(sent.lock().unwrap().is_empty());
    }
}
