use serde::{Deserialize, Serialize};

pub type MediaId = u64;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<Genre>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Movie {
    pub id: MediaId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    pub genres: Option<Vec<Genre>>,
    pub runtime: Option<u32>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TvShow {
    pub id: MediaId,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    pub genres: Option<Vec<Genre>>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub episode_run_time: Option<Vec<u32>>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub original_language: Option<String>,
    pub original_name: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// The path segment the upstream API uses for this kind of record.
    pub fn path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A catalog record with its kind made explicit.
///
/// The discriminant is written at ingestion time and serialized as a
/// `media_type` field, so persisted items and mixed search results
/// round-trip without inspecting which fields happen to be present.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "media_type")]
pub enum MediaItem {
    #[serde(rename = "movie")]
    Movie(Movie),
    #[serde(rename = "tv")]
    Tv(TvShow),
}

impl MediaItem {
    pub fn id(&self) -> MediaId {
        match self {
            MediaItem::Movie(m) => m.id,
            MediaItem::Tv(s) => s.id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            MediaItem::Movie(_) => MediaType::Movie,
            MediaItem::Tv(_) => MediaType::Tv,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MediaItem::Movie(m) => &m.title,
            MediaItem::Tv(s) => &s.name,
        }
    }

    pub fn overview(&self) -> &str {
        match self {
            MediaItem::Movie(m) => &m.overview,
            MediaItem::Tv(s) => &s.overview,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.poster_path.as_deref(),
            MediaItem::Tv(s) => s.poster_path.as_deref(),
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.backdrop_path.as_deref(),
            MediaItem::Tv(s) => s.backdrop_path.as_deref(),
        }
    }

    /// Release date for movies, first air date for shows.
    pub fn release_date(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.release_date.as_deref(),
            MediaItem::Tv(s) => s.first_air_date.as_deref(),
        }
    }

    pub fn release_year(&self) -> Option<&str> {
        self.release_date()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
    }

    pub fn vote_average(&self) -> f64 {
        match self {
            MediaItem::Movie(m) => m.vote_average,
            MediaItem::Tv(s) => s.vote_average,
        }
    }
}

impl From<Movie> for MediaItem {
    fn from(movie: Movie) -> Self {
        MediaItem::Movie(movie)
    }
}

impl From<TvShow> for MediaItem {
    fn from(show: TvShow) -> Self {
        MediaItem::Tv(show)
    }
}

impl PartialEq for MediaItem {
    fn eq(&self, other: &Self) -> bool {
        self.media_type() == other.media_type() && self.id() == other.id()
    }
}

impl Eq for MediaItem {}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MediaId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            release_date: Some("1999-03-31".to_string()),
            vote_average: 8.2,
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_list_payload() {
        let raw = r#"{
            "id": 603,
            "title": "The Matrix",
            "overview": "Set in the 22nd century.",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "genre_ids": [28, 878],
            "popularity": 83.9
        }"#;
        let movie: Movie = serde_json::from_str(raw).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert!(movie.backdrop_path.is_none());
        assert!(movie.genres.is_none());
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_item_carries_explicit_tag() {
        let item = MediaItem::from(movie(603, "The Matrix"));
        let raw = serde_json::to_string(&item).unwrap();
        assert!(raw.contains(r#""media_type":"movie""#));

        let back: MediaItem = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.media_type(), MediaType::Movie);
        assert_eq!(back.id(), 603);
    }

    #[test]
    fn test_decode_tagged_show() {
        let raw = r#"{
            "media_type": "tv",
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "vote_average": 8.9
        }"#;
        let item: MediaItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.media_type(), MediaType::Tv);
        assert_eq!(item.title(), "Breaking Bad");
        assert_eq!(item.release_year(), Some("2008"));
    }

    #[test]
    fn test_identity_is_type_and_id() {
        let movie = MediaItem::from(movie(42, "a"));
        let show = MediaItem::from(TvShow {
            id: 42,
            name: "b".to_string(),
            ..Default::default()
        });
        assert_ne!(movie, show);
        assert_eq!(movie, MediaItem::from(super::Movie {
            id: 42,
            ..Default::default()
        }));
    }

    #[test]
    fn test_release_year_absent_when_date_empty() {
        let mut m = movie(1, "x");
        m.release_date = Some(String::new());
        assert_eq!(MediaItem::from(m).release_year(), None);
    }
}
