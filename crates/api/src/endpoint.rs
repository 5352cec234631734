use std::fmt::{Display, Formatter};

use metflix_types::media::MediaId;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    PopularMovies(u32),
    TopRatedMovies(u32),
    NowPlayingMovies(u32),
    UpcomingMovies(u32),
    PopularShows(u32),
    TopRatedShows(u32),
    OnTheAirShows(u32),
    AiringTodayShows(u32),
    SearchMovies(String, u32),
    SearchShows(String, u32),
    MovieDetails(MediaId),
    ShowDetails(MediaId),
    MovieVideos(MediaId),
    ShowVideos(MediaId),
    MovieCredits(MediaId),
    ShowCredits(MediaId),
    MovieGenres,
    ShowGenres,
}

impl Endpoint {
    const BASE_URL: &'static str = "https://api.themoviedb.org/3";

    pub fn path(&self) -> String {
        match self {
            Self::PopularMovies(_) => "/movie/popular".to_string(),
            Self::TopRatedMovies(_) => "/movie/top_rated".to_string(),
            Self::NowPlayingMovies(_) => "/movie/now_playing".to_string(),
            Self::UpcomingMovies(_) => "/movie/upcoming".to_string(),
            Self::PopularShows(_) => "/tv/popular".to_string(),
            Self::TopRatedShows(_) => "/tv/top_rated".to_string(),
            Self::OnTheAirShows(_) => "/tv/on_the_air".to_string(),
            Self::AiringTodayShows(_) => "/tv/airing_today".to_string(),
            Self::SearchMovies(_, _) => "/search/movie".to_string(),
            Self::SearchShows(_, _) => "/search/tv".to_string(),
            Self::MovieDetails(id) => format!("/movie/{}", id),
            Self::ShowDetails(id) => format!("/tv/{}", id),
            Self::MovieVideos(id) => format!("/movie/{}/videos", id),
            Self::ShowVideos(id) => format!("/tv/{}/videos", id),
            Self::MovieCredits(id) => format!("/movie/{}/credits", id),
            Self::ShowCredits(id) => format!("/tv/{}/credits", id),
            Self::MovieGenres => "/genre/movie/list".to_string(),
            Self::ShowGenres => "/genre/tv/list".to_string(),
        }
    }

    pub fn page(&self) -> Option<u32> {
        match self {
            Self::PopularMovies(page)
            | Self::TopRatedMovies(page)
            | Self::NowPlayingMovies(page)
            | Self::UpcomingMovies(page)
            | Self::PopularShows(page)
            | Self::TopRatedShows(page)
            | Self::OnTheAirShows(page)
            | Self::AiringTodayShows(page)
            | Self::SearchMovies(_, page)
            | Self::SearchShows(_, page) => Some(*page),
            _ => None,
        }
    }

    pub fn search_query(&self) -> Option<&str> {
        match self {
            Self::SearchMovies(query, _) | Self::SearchShows(query, _) => Some(query),
            _ => None,
        }
    }

    /// Full request URL including credentials. Never logged; use the
    /// `Display` form for that.
    pub fn url(&self, api_key: &str, language: &str) -> String {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            Self::BASE_URL,
            self.path(),
            api_key,
            language
        );
        if let Some(query) = self.search_query() {
            url.push_str("&query=");
            url.push_str(&percent_encode(query));
        }
        if let Some(page) = self.page() {
            url.push_str(&format!("&page={}", page));
        }
        url
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())?;
        if let Some(query) = self.search_query() {
            write!(f, "?query={}", percent_encode(query))?;
        }
        if let Some(page) = self.page() {
            write!(f, "{}page={}", if self.search_query().is_some() { "&" } else { "?" }, page)?;
        }
        Ok(())
    }
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_url_carries_page() {
        let url = Endpoint::PopularMovies(3).url("secret", "en-US");
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/movie/popular?api_key=secret&language=en-US&page=3"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = Endpoint::SearchShows("breaking bad".to_string(), 2).url("secret", "en-US");
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/search/tv?api_key=secret&language=en-US&query=breaking%20bad&page=2"
        );
    }

    #[test]
    fn test_detail_paths() {
        assert_eq!(Endpoint::MovieDetails(603).path(), "/movie/603");
        assert_eq!(Endpoint::ShowVideos(1396).path(), "/tv/1396/videos");
        assert_eq!(Endpoint::MovieGenres.path(), "/genre/movie/list");
    }

    #[test]
    fn test_display_hides_credentials() {
        let rendered = Endpoint::SearchMovies("dune".to_string(), 1).to_string();
        assert_eq!(rendered, "/search/movie?query=dune&page=1");
        assert_eq!(Endpoint::PopularShows(7).to_string(), "/tv/popular?page=7");
        assert_eq!(Endpoint::ShowGenres.to_string(), "/genre/tv/list");
    }
}
