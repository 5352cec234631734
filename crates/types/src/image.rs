const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Clone, Copy, Debug, Default)]
pub enum PosterSize {
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
    Original,
}

#[derive(Clone, Copy, Debug, Default)]
pub enum BackdropSize {
    Small,
    #[default]
    Medium,
    Original,
}

impl PosterSize {
    fn segment(&self) -> &'static str {
        match self {
            PosterSize::Small => "w185",
            PosterSize::Medium => "w342",
            PosterSize::Large => "w500",
            PosterSize::XLarge => "w780",
            PosterSize::Original => "original",
        }
    }
}

impl BackdropSize {
    fn segment(&self) -> &'static str {
        match self {
            BackdropSize::Small => "w780",
            BackdropSize::Medium => "w1280",
            BackdropSize::Original => "original",
        }
    }
}

pub fn poster_url(path: &str, size: PosterSize) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size.segment(), path)
}

pub fn backdrop_url(path: &str, size: BackdropSize) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size.segment(), path)
}
