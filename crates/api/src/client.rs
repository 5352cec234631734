use std::sync::Arc;

use metflix_types::{
    credits::Credits,
    media::{Genre, MediaId, Movie, TvShow},
    page::Page,
    video::Video,
};
use tracing::{debug, error};

use super::{
    cache::ClientCache, endpoint::Endpoint, error::Error, rate_limit::RateLimitedClient,
    response::ClientResponse,
};

/// Configuration for the client.
/// api_key: Upstream catalog API key (required).
/// language: Result language. (default: "en-US")
/// max_retries: The maximum number of retries for a request. (default: 0)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub language: Option<String>,
    pub max_retries: Option<usize>,
}

impl Config {
    const DEFAULT_LANGUAGE: &'static str = "en-US";
    const DEFAULT_MAX_RETRIES: usize = 0;

    pub fn new(api_key: String, language: Option<String>, max_retries: Option<usize>) -> Self {
        Config {
            api_key,
            language,
            max_retries,
        }
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(Self::DEFAULT_LANGUAGE)
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries.unwrap_or(Self::DEFAULT_MAX_RETRIES)
    }
}

/// A client for the upstream movie/TV catalog API.
///
/// Requests go through a rate-limited transport respecting the
/// upstream's 40-requests-per-10-seconds budget, carry
/// `If-Modified-Since` when the endpoint was fetched before, and a 304
/// is answered from the response cache. Failures are not retried unless
/// `max_retries` is raised explicitly.
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
    http: Arc<RateLimitedClient>,
    cache: Arc<ClientCache>,
}

impl Client {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            http: Arc::new(RateLimitedClient::default()),
            cache: Arc::new(ClientCache::new()),
        }
    }

    async fn new_request(&self, endpoint: &Endpoint) -> Result<reqwest::Request, Error> {
        let url = endpoint
            .url(&self.cfg.api_key, self.cfg.language())
            .parse::<reqwest::Url>()
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let mut request = reqwest::Request::new(reqwest::Method::GET, url);
        if let Some(time) = self.cache.last_called(endpoint.clone()).await {
            if let Ok(value) = reqwest::header::HeaderValue::from_str(&time.to_rfc2822()) {
                request
                    .headers_mut()
                    .insert(reqwest::header::IF_MODIFIED_SINCE, value);
            }
        }
        Ok(request)
    }

    pub async fn get(&self, endpoint: &Endpoint) -> Result<ClientResponse, Error> {
        debug!("Sending request to {}", endpoint);
        let request = self.new_request(endpoint).await?;
        self.handle_response(endpoint, self.http.execute(request).await?)
            .await
    }

    pub async fn get_with_retry(&self, endpoint: &Endpoint) -> Result<ClientResponse, Error> {
        let mut retries: usize = 0;
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(retries as u64)).await;
            match self.get(endpoint).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if let Error::StatusCode(404) = e {
                        return Err(e);
                    }
                    if retries >= self.cfg.max_retries() {
                        return Err(e);
                    }
                    error!(
                        "Error getting {}: {}, retrying {} more times",
                        endpoint,
                        e,
                        (self.cfg.max_retries() - retries),
                    );
                    retries += 1;
                }
            }
        }
    }

    async fn handle_response(
        &self,
        endpoint: &Endpoint,
        resp: reqwest::Response,
    ) -> Result<ClientResponse, Error> {
        match resp.status() {
            reqwest::StatusCode::OK => {
                debug!("request: {} status: OK", endpoint);
                let parsed = ClientResponse::parse(endpoint, resp).await?;
                self.cache.update(endpoint.clone(), parsed.clone()).await;
                Ok(parsed)
            }
            reqwest::StatusCode::NOT_MODIFIED => {
                debug!("request: {} status: NOT_MODIFIED", endpoint);
                self.cache
                    .last_response(endpoint.clone())
                    .await
                    .ok_or(Error::NoCachedResponse)
            }
            status => {
                error!("request {} status: {}", endpoint, status);
                Err(Error::StatusCode(status.as_u16()))
            }
        }
    }

    async fn get_movie_page(&self, endpoint: Endpoint) -> Result<Arc<Page<Movie>>, Error> {
        match self.get_with_retry(&endpoint).await? {
            ClientResponse::Movies(page) => Ok(page),
            _ => Err(Error::InvalidResponse),
        }
    }

    async fn get_show_page(&self, endpoint: Endpoint) -> Result<Arc<Page<TvShow>>, Error> {
        match self.get_with_retry(&endpoint).await? {
            ClientResponse::Shows(page) => Ok(page),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn popular_movies(&self, page: u32) -> Result<Arc<Page<Movie>>, Error> {
        self.get_movie_page(Endpoint::PopularMovies(page)).await
    }

    pub async fn top_rated_movies(&self, page: u32) -> Result<Arc<Page<Movie>>, Error> {
        self.get_movie_page(Endpoint::TopRatedMovies(page)).await
    }

    pub async fn now_playing_movies(&self, page: u32) -> Result<Arc<Page<Movie>>, Error> {
        self.get_movie_page(Endpoint::NowPlayingMovies(page)).await
    }

    pub async fn upcoming_movies(&self, page: u32) -> Result<Arc<Page<Movie>>, Error> {
        self.get_movie_page(Endpoint::UpcomingMovies(page)).await
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> Result<Arc<Page<Movie>>, Error> {
        self.get_movie_page(Endpoint::SearchMovies(query.to_string(), page))
            .await
    }

    pub async fn popular_shows(&self, page: u32) -> Result<Arc<Page<TvShow>>, Error> {
        self.get_show_page(Endpoint::PopularShows(page)).await
    }

    pub async fn top_rated_shows(&self, page: u32) -> Result<Arc<Page<TvShow>>, Error> {
        self.get_show_page(Endpoint::TopRatedShows(page)).await
    }

    pub async fn on_the_air_shows(&self, page: u32) -> Result<Arc<Page<TvShow>>, Error> {
        self.get_show_page(Endpoint::OnTheAirShows(page)).await
    }

    pub async fn airing_today_shows(&self, page: u32) -> Result<Arc<Page<TvShow>>, Error> {
        self.get_show_page(Endpoint::AiringTodayShows(page)).await
    }

    pub async fn search_shows(&self, query: &str, page: u32) -> Result<Arc<Page<TvShow>>, Error> {
        self.get_show_page(Endpoint::SearchShows(query.to_string(), page))
            .await
    }

    pub async fn movie_details(&self, id: MediaId) -> Result<Arc<Movie>, Error> {
        match self.get_with_retry(&Endpoint::MovieDetails(id)).await? {
            ClientResponse::MovieDetails(movie) => Ok(movie),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn show_details(&self, id: MediaId) -> Result<Arc<TvShow>, Error> {
        match self.get_with_retry(&Endpoint::ShowDetails(id)).await? {
            ClientResponse::ShowDetails(show) => Ok(show),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn movie_videos(&self, id: MediaId) -> Result<Arc<Vec<Video>>, Error> {
        match self.get_with_retry(&Endpoint::MovieVideos(id)).await? {
            ClientResponse::Videos(videos) => Ok(videos),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn show_videos(&self, id: MediaId) -> Result<Arc<Vec<Video>>, Error> {
        match self.get_with_retry(&Endpoint::ShowVideos(id)).await? {
            ClientResponse::Videos(videos) => Ok(videos),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn movie_credits(&self, id: MediaId) -> Result<Arc<Credits>, Error> {
        match self.get_with_retry(&Endpoint::MovieCredits(id)).await? {
            ClientResponse::Credits(credits) => Ok(credits),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn show_credits(&self, id: MediaId) -> Result<Arc<Credits>, Error> {
        match self.get_with_retry(&Endpoint::ShowCredits(id)).await? {
            ClientResponse::Credits(credits) => Ok(credits),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn movie_genres(&self) -> Result<Arc<Vec<Genre>>, Error> {
        match self.get_with_retry(&Endpoint::MovieGenres).await? {
            ClientResponse::Genres(genres) => Ok(genres),
            _ => Err(Error::InvalidResponse),
        }
    }

    pub async fn show_genres(&self) -> Result<Arc<Vec<Genre>>, Error> {
        match self.get_with_retry(&Endpoint::ShowGenres).await? {
            ClientResponse::Genres(genres) => Ok(genres),
            _ => Err(Error::InvalidResponse),
        }
    }
}
