use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{config::Config, error::FetchError};

/// Where monthly game archives come from.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    async fn list_archives(&self, username: &str) -> Result<Vec<String>, FetchError>;

    /// Raw game records of one archive. Records are left undecoded so that a
    /// single bad record does not take the whole archive down.
    async fn archive_games(&self, archive_url: &str) -> Result<Vec<serde_json::Value>, FetchError>;
}

#[derive(Deserialize)]
struct ArchivesResponse {
    archives: Vec<String>,
}

#[derive(Deserialize)]
struct GamesResponse {
    games: Vec<serde_json::Value>,
}

pub struct ChessComClient {
    client: Client,
    api_base: String,
}

impl ChessComClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(ChessComClient {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ArchiveSource for ChessComClient {
    async fn list_archives(&self, username: &str) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/player/{}/games/archives", self.api_base, username);
        let response: ArchivesResponse = self.get_json(&url).await?;
        Ok(response.archives)
    }

    async fn archive_games(&self, archive_url: &str) -> Result<Vec<serde_json::Value>, FetchError> {
        let response: GamesResponse = self.get_json(archive_url).await?;
        Ok(response.games)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{header::USER_AGENT, HeaderMap, Uri},
        routing::get,
        Json, Router,
    };
    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;

    const AGENT: &str = "chess-archive-test/1.0";

    /// `(path, user agent)` of every request the server saw.
    #[derive(Clone, Default)]
    struct Seen(Arc<Mutex<Vec<(String, String)>>>);

    impl Seen {
        fn record(&self, uri: &Uri, headers: &HeaderMap) {
            let agent = headers
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            self.0.lock().unwrap().push((uri.path().to_string(), agent));
        }

        fn requests(&self) -> Vec<(String, String)> {
            self.0.lock().unwrap().clone()
        }
    }

    async fn archives(State(seen): State<Seen>, uri: Uri, headers: HeaderMap) -> Json<Value> {
        seen.record(&uri, &headers);
        Json(json!({
            "archives": [
                "https://api.chess.com/pub/player/hikaru/games/2023/01",
                "https://api.chess.com/pub/player/hikaru/games/2023/02",
            ]
        }))
    }

    async fn games(State(seen): State<Seen>, uri: Uri, headers: HeaderMap) -> Json<Value> {
        seen.record(&uri, &headers);
        Json(json!({
            "games": [
                {"url": "https://www.chess.com/game/live/1", "end_time": 1672600000},
                {"url": "https://www.chess.com/game/live/2"},
            ]
        }))
    }

    async fn serve(seen: Seen) -> String {
        let app = Router::new()
            .route("/pub/player/:username/games/archives", get(archives))
            .route("/pub/player/:username/games/2023/01", get(games))
            .with_state(seen);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/pub")
    }

    fn client(api_base: &str) -> ChessComClient {
        ChessComClient::new(&Config {
            user_agent: AGENT.to_string(),
            api_base: api_base.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_archives_request() {
        let seen = Seen::default();
        let base = serve(seen.clone()).await;

        let archives = client(&format!("{base}/")).list_archives("Hikaru").await.unwrap();

        assert_eq!(archives.len(), 2);
        assert!(archives[0].ends_with("/games/2023/01"));
        assert_eq!(
            seen.requests(),
            vec![(
                "/pub/player/Hikaru/games/archives".to_string(),
                AGENT.to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_archive_games_request() {
        let seen = Seen::default();
        let base = serve(seen.clone()).await;

        let games = client(&base)
            .archive_games(&format!("{base}/player/hikaru/games/2023/01"))
            .await
            .unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0]["url"], "https://www.chess.com/game/live/1");
        assert_eq!(
            seen.requests(),
            vec![(
                "/pub/player/hikaru/games/2023/01".to_string(),
                AGENT.to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let seen = Seen::default();
        let base = serve(seen.clone()).await;
        let url = format!("{base}/player/hikaru/games/1999/01");

        match client(&base).archive_games(&url).await {
            Err(FetchError::Status { url: failed, status }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(failed, url);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(seen.requests().is_empty());
    }
}
