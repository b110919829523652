use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::types::{FetchResult, Fetched};

use super::super::client::{ApiRequest, decode_json};

const VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

/// Representation of the champion catalog response.
#[derive(Deserialize, Debug, Clone)]
pub struct ChampionCatalogDto {
    pub data: HashMap<String, ChampionDto>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChampionDto {
    pub name: String,
    /// Numeric champion id, transported as a string by ddragon.
    #[serde(deserialize_with = "u32_from_string")]
    pub key: u32,
}

fn u32_from_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Ddragon static-data catalog, versioned separately from the live API.
#[async_trait]
pub trait DdragonApi: ApiRequest {
    /// Most recent data version. An empty version list counts as absence.
    async fn get_latest_version(&self) -> FetchResult<String> {
        tracing::trace!("[RIOT::CLIENT] get_latest_version");
        let raw = self.request(VERSIONS_URL.to_string()).await?;
        Ok(
            match decode_json::<Vec<String>>(raw)?.map(|versions| versions.into_iter().next()) {
                Fetched::Found(Some(version)) => Fetched::Found(version),
                _ => Fetched::NotFound,
            },
        )
    }

    /// Resolve a champion's numeric id by display name, case-insensitively.
    /// `Found(None)` means the catalog was fetched but knows no such
    /// champion.
    async fn get_champion_id(&self, champion_name: &str) -> FetchResult<Option<u32>> {
        let version = match self.get_latest_version().await? {
            Fetched::Found(version) => version,
            Fetched::NotFound => return Ok(Fetched::NotFound),
        };

        let path = format!(
            "https://ddragon.leagueoflegends.com/cdn/{}/data/en_US/champion.json",
            version
        );

        let raw = self.request(path).await?;
        Ok(decode_json::<ChampionCatalogDto>(raw)?.map(|catalog| {
            catalog
                .data
                .into_values()
                .find(|champion| champion.name.eq_ignore_ascii_case(champion_name))
                .map(|champion| champion.key)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn champion_catalog_parses_numeric_keys() {
        let catalog: ChampionCatalogDto = serde_json::from_str(
            r#"{"data": {"Aatrox": {"name": "Aatrox", "key": "266"}}}"#,
        )
        .unwrap();

        let champion = &catalog.data["Aatrox"];
        assert_eq!(champion.key, 266);
        assert!(champion.name.eq_ignore_ascii_case("aatrox"));
    }

    #[test]
    fn non_numeric_keys_are_rejected() {
        let result: Result<ChampionCatalogDto, _> =
            serde_json::from_str(r#"{"data": {"Aatrox": {"name": "Aatrox", "key": "oops"}}}"#);
        assert!(result.is_err());
    }
}
