//! HTTP client for the Jamendo v3 REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::CatalogSettings;
use crate::error::{Error, Result};

use super::model::{AlbumRecord, ArtistRecord, Envelope, TrackRecord};
use super::{Album, AlbumQuery, Artist, ArtistQuery, Catalog, DEFAULT_LIMIT, Order, Track, TrackQuery};

type Params = Vec<(&'static str, String)>;

/// Jamendo catalog client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct JamendoClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    image_size: u32,
}

impl JamendoClient {
    pub fn new(settings: &CatalogSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client_id: settings.client_id.clone(),
            image_size: settings.image_size,
        })
    }

    fn base_params(&self) -> Params {
        vec![
            ("client_id", self.client_id.clone()),
            ("format", "json".to_string()),
            ("imagesize", self.image_size.to_string()),
        ]
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, params: Params) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let body = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        decode_results(&body)
    }
}

/// Decode a Jamendo envelope, turning a failed header into [`Error::Api`].
pub(crate) fn decode_results<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    let headers = envelope.headers;
    if !headers.is_success() {
        return Err(Error::Api {
            code: headers.code,
            message: headers
                .error_message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(headers.status),
        });
    }
    if let Some(w) = headers.warnings.as_deref().filter(|w| !w.trim().is_empty()) {
        warn!(warnings = w, "catalog returned warnings");
    }
    debug!(results_count = headers.results_count, "catalog response decoded");
    Ok(envelope.results)
}

pub(crate) fn track_params(query: &TrackQuery) -> Params {
    let mut params: Params = vec![
        ("limit", query.limit.to_string()),
        ("offset", query.offset.to_string()),
        ("order", query.order.as_str().to_string()),
        ("include", "musicinfo".to_string()),
    ];
    let tags: Vec<&str> = query
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        params.push(("tags", tags.join("+")));
    }
    if let Some(search) = query.search.as_deref() {
        params.push(("search", search.to_string()));
    }
    params
}

fn listing_params(limit: u32, offset: u32, order: Order, search: Option<&str>) -> Params {
    let mut params: Params = vec![
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
        ("order", order.as_str().to_string()),
    ];
    if let Some(search) = search {
        params.push(("search", search.to_string()));
    }
    params
}

impl Catalog for JamendoClient {
    #[instrument(skip(self), err(Display))]
    async fn tracks(&self, query: &TrackQuery) -> Result<Vec<Track>> {
        let mut params = self.base_params();
        params.extend(track_params(query));
        let records: Vec<TrackRecord> = self.fetch("tracks", params).await?;
        Ok(records.into_iter().map(Track::from).collect())
    }

    #[instrument(skip(self), err(Display))]
    async fn albums(&self, query: &AlbumQuery) -> Result<Vec<Album>> {
        let mut params = self.base_params();
        params.extend(listing_params(
            query.limit,
            query.offset,
            query.order,
            query.search.as_deref(),
        ));
        let records: Vec<AlbumRecord> = self.fetch("albums", params).await?;
        Ok(records.into_iter().map(Album::from).collect())
    }

    #[instrument(skip(self), err(Display))]
    async fn artists(&self, query: &ArtistQuery) -> Result<Vec<Artist>> {
        let mut params = self.base_params();
        params.extend(listing_params(
            query.limit,
            query.offset,
            query.order,
            query.search.as_deref(),
        ));
        let records: Vec<ArtistRecord> = self.fetch("artists", params).await?;
        Ok(records.into_iter().map(Artist::from).collect())
    }

    #[instrument(skip(self), err(Display))]
    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>> {
        let mut params = self.base_params();
        params.extend([
            ("album_id", album_id.to_string()),
            ("include", "musicinfo".to_string()),
            ("order", Order::TrackPosition.as_str().to_string()),
            // Albums rarely exceed this; the API default would be 10.
            ("limit", "200".to_string()),
        ]);
        let records: Vec<TrackRecord> = self.fetch("tracks", params).await?;
        Ok(records.into_iter().map(Track::from).collect())
    }

    #[instrument(skip(self), err(Display))]
    async fn artist_tracks(&self, artist_id: &str, limit: u32) -> Result<Vec<Track>> {
        let mut params = self.base_params();
        params.extend([
            ("artist_id", artist_id.to_string()),
            ("limit", limit.to_string()),
            ("order", Order::PopularityTotal.as_str().to_string()),
            ("include", "musicinfo".to_string()),
        ]);
        let records: Vec<TrackRecord> = self.fetch("tracks", params).await?;
        Ok(records.into_iter().map(Track::from).collect())
    }

    #[instrument(skip(self), err(Display))]
    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<Album>> {
        let mut params = self.base_params();
        params.extend([
            ("artist_id", artist_id.to_string()),
            ("limit", DEFAULT_LIMIT.to_string()),
            ("order", Order::ReleaseDateDesc.as_str().to_string()),
        ]);
        let records: Vec<AlbumRecord> = self.fetch("albums", params).await?;
        Ok(records.into_iter().map(Album::from).collect())
    }
}
