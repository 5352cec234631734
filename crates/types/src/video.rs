use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
    pub published_at: Option<String>,
    pub size: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VideosResponse {
    pub id: u64,
    pub results: Vec<Video>,
}

impl Video {
    pub fn is_trailer(&self) -> bool {
        self.kind == "Trailer"
    }

    pub fn is_youtube(&self) -> bool {
        self.site == "YouTube"
    }

    /// Watch URL for videos hosted on YouTube.
    pub fn youtube_url(&self) -> Option<String> {
        if self.is_youtube() {
            Some(format!("https://www.youtube.com/watch?v={}", self.key))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(site: &str, kind: &str) -> Video {
        Video {
            id: "533ec654c3a36854480003eb".to_string(),
            key: "SUXWAEX2jlg".to_string(),
            name: "Trailer 1".to_string(),
            site: site.to_string(),
            kind: kind.to_string(),
            official: true,
            published_at: None,
            size: Some(720),
        }
    }

    #[test]
    fn test_youtube_trailer() {
        let v = video("YouTube", "Trailer");
        assert!(v.is_trailer());
        assert_eq!(
            v.youtube_url().unwrap(),
            "https://www.youtube.com/watch?v=SUXWAEX2jlg"
        );
    }

    #[test]
    fn test_no_url_off_youtube() {
        let v = video("Vimeo", "Clip");
        assert!(!v.is_trailer());
        assert!(v.youtube_url().is_none());
    }
}
