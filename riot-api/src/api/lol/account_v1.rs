use async_trait::async_trait;
use riftwatch_shared::Region;
use serde::Deserialize;

use crate::types::FetchResult;

use super::super::client::{ApiRequest, decode_json};

/// Representation of the account data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

/// Riot Account-V1 API. A 404 means the riot id simply does not exist.
#[async_trait]
pub trait AccountApi: ApiRequest {
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> FetchResult<AccountDto> {
        tracing::trace!("[RIOT::CLIENT] get_account_by_riot_id {}#{}", game_name, tag_line);
        let path = format!(
            "https://{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            region.regional_host(),
            game_name,
            tag_line
        );

        decode_json(self.request(path).await?)
    }
}
