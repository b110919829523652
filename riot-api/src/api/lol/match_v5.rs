use async_trait::async_trait;
use riftwatch_shared::{
    Region,
    lol_match::{Match, MatchParticipant},
};
use serde::Deserialize;

use crate::types::FetchResult;

use super::super::client::{ApiRequest, decode_json};

/// Representation of the match data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub info: InfoDto,
}

impl From<MatchDto> for Match {
    fn from(value: MatchDto) -> Self {
        Self {
            queue_id: value.info.queue_id,
            participants: value
                .info
                .participants
                .into_iter()
                .map(|participant| participant.into())
                .collect(),
        }
    }
}

/// Representation of the match info data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    pub queue_id: u16,
    pub participants: Vec<ParticipantDto>,
}

/// Representation of the participant data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
}

impl From<ParticipantDto> for MatchParticipant {
    fn from(value: ParticipantDto) -> Self {
        Self {
            puuid: value.puuid,
            champion_name: value.champion_name,
            win: value.win,
        }
    }
}

/// Riot Match-V5 API.
#[async_trait]
pub trait MatchApi: ApiRequest {
    /// Most recent match id for an account. `Found(None)` means the account
    /// exists but has an empty match history.
    async fn get_latest_match_id(
        &self,
        puuid: &str,
        region: Region,
    ) -> FetchResult<Option<String>> {
        tracing::trace!("[RIOT::CLIENT] get_latest_match_id {}", puuid);
        let path = format!(
            "https://{}/lol/match/v5/matches/by-puuid/{}/ids?start=0&count=1",
            region.regional_host(),
            puuid
        );

        let raw = self.request(path).await?;
        Ok(decode_json::<Vec<String>>(raw)?.map(|ids| ids.into_iter().next()))
    }

    async fn get_match(&self, match_id: &str, region: Region) -> FetchResult<Match> {
        tracing::trace!("[RIOT::CLIENT] get_match {}", match_id);
        let path = format!(
            "https://{}/lol/match/v5/matches/{}",
            region.regional_host(),
            match_id
        );

        let raw = self.request(path).await?;
        Ok(decode_json::<MatchDto>(raw)?.map(Match::from))
    }
}
