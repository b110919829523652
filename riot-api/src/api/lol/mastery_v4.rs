use async_trait::async_trait;
use riftwatch_shared::Region;
use serde::Deserialize;

use crate::types::FetchResult;

use super::super::client::{ApiRequest, decode_json};

/// Representation of the champion mastery response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MasteryDto {
    pub champion_level: u32,
    pub champion_points: u32,
}

/// Riot Champion-Mastery-V4 API. A 404 means the account never played the
/// champion.
#[async_trait]
pub trait MasteryApi: ApiRequest {
    async fn get_mastery(
        &self,
        puuid: &str,
        champion_id: u32,
        region: Region,
    ) -> FetchResult<MasteryDto> {
        tracing::trace!("[RIOT::CLIENT] get_mastery {} champion {}", puuid, champion_id);
        let path = format!(
            "https://{}/lol/champion-mastery/v4/champion-masteries/by-puuid/{}/by-champion/{}",
            region.platform_host(),
            puuid,
            champion_id
        );

        decode_json(self.request(path).await?)
    }
}
