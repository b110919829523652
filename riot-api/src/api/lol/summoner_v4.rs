use async_trait::async_trait;
use riftwatch_shared::Region;
use serde::Deserialize;

use crate::types::FetchResult;

use super::super::client::{ApiRequest, decode_json};

/// Representation of the summoner data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id, the key into League-V4.
    pub id: String,
}

/// Riot Summoner-V4 API.
#[async_trait]
pub trait SummonerApi: ApiRequest {
    async fn get_summoner_by_puuid(
        &self,
        puuid: &str,
        region: Region,
    ) -> FetchResult<SummonerDto> {
        tracing::trace!("[RIOT::CLIENT] get_summoner_by_puuid {}", puuid);
        let path = format!(
            "https://{}/lol/summoner/v4/summoners/by-puuid/{}",
            region.platform_host(),
            puuid
        );

        decode_json(self.request(path).await?)
    }
}
