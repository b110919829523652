use std::env;

use riftwatch_riot_api::api::lol::{
    AccountApi, DdragonApi, LeagueApi, LolApiClient, MatchApi, SummonerApi,
};
use riftwatch_riot_api::types::Fetched;
use riftwatch_shared::Region;

fn live_client() -> LolApiClient {
    dotenvy::dotenv().ok();
    let key = env::var("RIOT_API_KEY").expect("RIOT_API_KEY not set");
    LolApiClient::new(key)
}

#[tokio::test]
#[ignore = "API Key required"]
async fn account_summoner_and_leagues_resolve() {
    let api = live_client();

    let account = api
        .get_account_by_riot_id("Le Conservateur", "3012", Region::Euw)
        .await
        .unwrap()
        .found()
        .expect("account should exist");

    let summoner = api
        .get_summoner_by_puuid(&account.puuid, Region::Euw)
        .await
        .unwrap()
        .found()
        .expect("summoner should exist");

    let entries = api
        .get_rank_entries(&summoner.id, Region::Euw)
        .await
        .unwrap()
        .found()
        .expect("entries endpoint should answer");

    for queue in entries.keys() {
        assert!(queue.league_queue_type().is_some());
    }
}

#[tokio::test]
#[ignore = "API Key required"]
async fn latest_match_id_and_match_detail_work() {
    let api = live_client();

    let account = api
        .get_account_by_riot_id("Le Conservateur", "3012", Region::Euw)
        .await
        .unwrap()
        .found()
        .expect("account should exist");

    let last_id = api
        .get_latest_match_id(&account.puuid, Region::Euw)
        .await
        .unwrap()
        .found()
        .flatten()
        .expect("should return a match id");

    let match_data = api
        .get_match(&last_id, Region::Euw)
        .await
        .unwrap()
        .found()
        .expect("match should exist");

    assert!(match_data.participant(&account.puuid).is_some());
}

#[tokio::test]
#[ignore = "network required"]
async fn champion_ids_resolve_case_insensitively() {
    let api = live_client();

    let id = api.get_champion_id("aatrox").await.unwrap();
    assert_eq!(id, Fetched::Found(Some(266)));

    let missing = api.get_champion_id("not a champion").await.unwrap();
    assert_eq!(missing, Fetched::Found(None));
}
