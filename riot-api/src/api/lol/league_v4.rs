use std::collections::BTreeMap;

use async_trait::async_trait;
use riftwatch_shared::{
    QueueCategory, Region,
    rank::{Division, LeaguePoints, RankEntry, Tier},
};
use serde::Deserialize;

use crate::types::FetchResult;

use super::super::client::{ApiRequest, decode_json};

/// Representation of one league entry response element.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: Tier,
    pub rank: Division,
    pub league_points: LeaguePoints,
}

impl LeagueEntryDto {
    /// The queue category this entry ranks, for the queues the tracker
    /// follows (solo/duo and flex). Everything else maps to `None`.
    pub fn queue_category(&self) -> Option<QueueCategory> {
        QueueCategory::from_league_queue_type(&self.queue_type)
    }

    pub fn into_rank_entry(self) -> RankEntry {
        // The API reports rank "I" for the divisionless top tiers.
        let division = self.tier.has_divisions().then_some(self.rank);
        RankEntry {
            tier: self.tier,
            division,
            points: self.league_points,
        }
    }
}

/// Riot League-V4 API.
#[async_trait]
pub trait LeagueApi: ApiRequest {
    /// Current ranked entries keyed by queue category. Queues the account is
    /// unranked in are simply absent from the map.
    async fn get_rank_entries(
        &self,
        summoner_id: &str,
        region: Region,
    ) -> FetchResult<BTreeMap<QueueCategory, RankEntry>> {
        tracing::trace!("[RIOT::CLIENT] get_rank_entries {}", summoner_id);
        let path = format!(
            "https://{}/lol/league/v4/entries/by-summoner/{}",
            region.platform_host(),
            summoner_id
        );

        let raw = self.request(path).await?;
        Ok(decode_json::<Vec<LeagueEntryDto>>(raw)?.map(|entries| {
            entries
                .into_iter()
                .filter_map(|entry| {
                    entry
                        .queue_category()
                        .map(|queue| (queue, entry.into_rank_entry()))
                })
                .collect()
        }))
    }
}
