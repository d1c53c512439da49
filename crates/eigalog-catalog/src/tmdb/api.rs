use eigalog_models::{Movie, MovieId, WatchProvider};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::CatalogError;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: u64,
    title: String,
    #[serde(default)]
    overview: String,
}

#[derive(Debug, Deserialize)]
struct NowPlayingResponse {
    #[serde(default)]
    results: Vec<NowPlayingEntry>,
}

#[derive(Debug, Deserialize)]
struct NowPlayingEntry {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct WatchProvidersResponse {
    #[serde(default)]
    results: HashMap<String, RegionProviders>,
}

#[derive(Debug, Default, Deserialize)]
struct RegionProviders {
    #[serde(default)]
    flatrate: Vec<ProviderEntry>,
}

#[derive(Debug, Deserialize)]
struct ProviderEntry {
    provider_id: u32,
    provider_name: String,
    logo_path: Option<String>,
}

async fn read_success_body(
    response: reqwest::Response,
    movie_id: Option<MovieId>,
) -> Result<String, CatalogError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = movie_id {
            return Err(CatalogError::NotFound(id));
        }
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::Api { status, body });
    }
    Ok(response.text().await?)
}

/// Fetch movie metadata by identifier.
pub async fn get_movie(
    client: &Client,
    access_token: &str,
    language: &str,
    id: MovieId,
) -> Result<Movie, CatalogError> {
    let url = format!("{}/movie/{}?language={}", TMDB_BASE_URL, id, language);

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    let body = read_success_body(response, Some(id)).await?;
    parse_movie(&body)
}

/// Fetch the identifiers in the region's current now-playing listing.
pub async fn get_now_playing_ids(
    client: &Client,
    access_token: &str,
    language: &str,
    region: &str,
) -> Result<Vec<MovieId>, CatalogError> {
    let url = format!(
        "{}/movie/now_playing?language={}&region={}",
        TMDB_BASE_URL, language, region
    );

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    let body = read_success_body(response, None).await?;
    parse_now_playing_ids(&body)
}

/// Fetch the movie's flatrate providers for the given region.
///
/// A movie with no listing for the region, or no flatrate tier, yields an
/// empty list rather than an error.
pub async fn get_watch_providers(
    client: &Client,
    access_token: &str,
    region: &str,
    id: MovieId,
) -> Result<Vec<WatchProvider>, CatalogError> {
    let url = format!("{}/movie/{}/watch/providers", TMDB_BASE_URL, id);

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .send()
        .await?;

    let body = read_success_body(response, Some(id)).await?;
    parse_watch_providers(&body, region)
}

fn parse_movie(body: &str) -> Result<Movie, CatalogError> {
    let parsed: MovieResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::Malformed(format!("movie payload: {}", e)))?;
    Ok(Movie {
        id: MovieId(parsed.id),
        title: parsed.title,
        overview: parsed.overview,
    })
}

fn parse_now_playing_ids(body: &str) -> Result<Vec<MovieId>, CatalogError> {
    let parsed: NowPlayingResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::Malformed(format!("now-playing payload: {}", e)))?;
    Ok(parsed.results.into_iter().map(|m| MovieId(m.id)).collect())
}

fn parse_watch_providers(body: &str, region: &str) -> Result<Vec<WatchProvider>, CatalogError> {
    let parsed: WatchProvidersResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::Malformed(format!("watch-providers payload: {}", e)))?;

    let providers = match parsed.results.get(region) {
        Some(region_providers) => region_providers
            .flatrate
            .iter()
            .map(|p| WatchProvider {
                provider_id: p.provider_id,
                provider_name: p.provider_name.clone(),
                logo_path: p.logo_path.clone(),
            })
            .collect(),
        None => {
            debug!("No watch providers listed for region {}", region);
            Vec::new()
        }
    };
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie() {
        let body = r#"{
            "id": 550,
            "title": "Fight Club",
            "overview": "A ticking-time-bomb insomniac...",
            "release_date": "1999-10-15",
            "vote_average": 8.4
        }"#;

        let movie = parse_movie(body).unwrap();
        assert_eq!(movie.id, MovieId(550));
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.overview, "A ticking-time-bomb insomniac...");
    }

    #[test]
    fn test_parse_movie_missing_overview() {
        let body = r#"{"id": 550, "title": "Fight Club"}"#;

        let movie = parse_movie(body).unwrap();
        assert_eq!(movie.overview, "");
    }

    #[test]
    fn test_parse_movie_malformed() {
        assert!(matches!(
            parse_movie("not json"),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_now_playing_ids() {
        let body = r#"{
            "dates": {"maximum": "2024-06-19", "minimum": "2024-05-08"},
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception"},
                {"id": 693134, "title": "Dune: Part Two"}
            ]
        }"#;

        let ids = parse_now_playing_ids(body).unwrap();
        assert_eq!(ids, vec![MovieId(27205), MovieId(693134)]);
        assert!(!ids.contains(&MovieId(550)));
    }

    #[test]
    fn test_parse_watch_providers_region_flatrate() {
        let body = r#"{
            "id": 550,
            "results": {
                "JP": {
                    "link": "https://www.themoviedb.org/movie/550/watch?locale=JP",
                    "flatrate": [
                        {"provider_id": 8, "provider_name": "Netflix", "logo_path": "/n.jpg", "display_priority": 1},
                        {"provider_id": 15, "provider_name": "Hulu", "logo_path": "/h.jpg", "display_priority": 2}
                    ],
                    "rent": [
                        {"provider_id": 68, "provider_name": "Microsoft Store", "logo_path": "/m.jpg", "display_priority": 10}
                    ]
                },
                "US": {
                    "flatrate": [
                        {"provider_id": 1899, "provider_name": "Max", "logo_path": "/x.jpg", "display_priority": 1}
                    ]
                }
            }
        }"#;

        let providers = parse_watch_providers(body, "JP").unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].provider_name, "Netflix");
        assert_eq!(providers[1].provider_name, "Hulu");
        assert_eq!(providers[0].logo_url(45).as_deref(), Some("https://image.tmdb.org/t/p/w45/n.jpg"));
    }

    #[test]
    fn test_parse_watch_providers_region_absent() {
        let body = r#"{"id": 550, "results": {}}"#;
        assert!(parse_watch_providers(body, "JP").unwrap().is_empty());
    }

    #[test]
    fn test_parse_watch_providers_no_flatrate_tier() {
        let body = r#"{"id": 550, "results": {"JP": {"rent": [{"provider_id": 68, "provider_name": "Microsoft Store", "logo_path": null}]}}}"#;
        assert!(parse_watch_providers(body, "JP").unwrap().is_empty());
    }
}
