use async_trait::async_trait;
use bytes::Bytes;

use crate::types::FetchResult;

use super::client::{ApiClientBase, ApiRequest};

pub mod account_v1;
pub mod ddragon;
pub mod league_v4;
pub mod mastery_v4;
pub mod match_v5;
pub mod summoner_v4;

pub use account_v1::{AccountApi, AccountDto};
pub use ddragon::DdragonApi;
pub use league_v4::{LeagueApi, LeagueEntryDto};
pub use mastery_v4::{MasteryApi, MasteryDto};
pub use match_v5::{MatchApi, MatchDto};
pub use summoner_v4::{SummonerApi, SummonerDto};

/// All APIs required for the entire tracking scope of the bot.
pub trait LolApiFull:
    AccountApi + SummonerApi + LeagueApi + MatchApi + MasteryApi + DdragonApi
{
}

/// High level client implementing all LoL related APIs used by the bot.
#[derive(Debug)]
pub struct LolApiClient(ApiClientBase);

impl LolApiClient {
    /// Create a new API client using the provided key.
    pub fn new(api_key: String) -> Self {
        Self(ApiClientBase::new(api_key))
    }

    /// Spawn a task logging periodic metrics about requests.
    pub fn start_metrics_logging(&self) {
        let metrics = self.0.metrics.clone();
        tokio::spawn(async move { metrics.log_loop().await });
    }
}

#[async_trait]
impl ApiRequest for LolApiClient {
    async fn request(&self, url: String) -> FetchResult<Bytes> {
        self.0.request(url).await
    }
}

impl AccountApi for LolApiClient {}
impl SummonerApi for LolApiClient {}
impl LeagueApi for LolApiClient {}
impl MatchApi for LolApiClient {}
impl MasteryApi for LolApiClient {}
impl DdragonApi for LolApiClient {}
impl LolApiFull for LolApiClient {}
