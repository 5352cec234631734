use std::sync::Arc;

use metflix_types::{
    credits::Credits,
    media::{Genre, GenreListResponse, Movie, TvShow},
    page::Page,
    video::{Video, VideosResponse},
};

use super::{endpoint::Endpoint, error::Error};

#[derive(Debug, Clone)]
pub enum ClientResponse {
    Movies(Arc<Page<Movie>>),
    Shows(Arc<Page<TvShow>>),
    MovieDetails(Arc<Movie>),
    ShowDetails(Arc<TvShow>),
    Videos(Arc<Vec<Video>>),
    Credits(Arc<Credits>),
    Genres(Arc<Vec<Genre>>),
    NotModified,
}

impl ClientResponse {
    pub async fn parse(endpoint: &Endpoint, resp: reqwest::Response) -> Result<Self, Error> {
        match endpoint {
            Endpoint::PopularMovies(_)
            | Endpoint::TopRatedMovies(_)
            | Endpoint::NowPlayingMovies(_)
            | Endpoint::UpcomingMovies(_)
            | Endpoint::SearchMovies(_, _) => {
                Ok(ClientResponse::Movies(Arc::new(decode(resp).await?)))
            }
            Endpoint::PopularShows(_)
            | Endpoint::TopRatedShows(_)
            | Endpoint::OnTheAirShows(_)
            | Endpoint::AiringTodayShows(_)
            | Endpoint::SearchShows(_, _) => {
                Ok(ClientResponse::Shows(Arc::new(decode(resp).await?)))
            }
            Endpoint::MovieDetails(_) => {
                Ok(ClientResponse::MovieDetails(Arc::new(decode(resp).await?)))
            }
            Endpoint::ShowDetails(_) => {
                Ok(ClientResponse::ShowDetails(Arc::new(decode(resp).await?)))
            }
            Endpoint::MovieVideos(_) | Endpoint::ShowVideos(_) => Ok(ClientResponse::Videos(
                Arc::new(decode::<VideosResponse>(resp).await?.results),
            )),
            Endpoint::MovieCredits(_) | Endpoint::ShowCredits(_) => {
                Ok(ClientResponse::Credits(Arc::new(decode(resp).await?)))
            }
            Endpoint::MovieGenres | Endpoint::ShowGenres => Ok(ClientResponse::Genres(Arc::new(
                decode::<GenreListResponse>(resp).await?.genres,
            ))),
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    resp.json().await.map_err(|e| Error::Decode(e.to_string()))
}
