use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cast {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Crew {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub job: String,
    pub profile_path: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credits {
    pub id: u64,
    #[serde(default)]
    pub cast: Vec<Cast>,
    #[serde(default)]
    pub crew: Vec<Crew>,
}

impl Credits {
    /// Cast in billing order. The upstream already sorts by `order`.
    pub fn top_billed(&self, n: usize) -> impl Iterator<Item = &Cast> {
        self.cast.iter().take(n)
    }

    pub fn directors(&self) -> impl Iterator<Item = &Crew> {
        self.crew.iter().filter(|c| c.job == "Director")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_filter_credits() {
        let raw = r#"{
            "id": 603,
            "cast": [
                {"id": 6384, "name": "Keanu Reeves", "character": "Neo", "profile_path": null, "order": 0},
                {"id": 2975, "name": "Laurence Fishburne", "character": "Morpheus", "profile_path": null, "order": 1}
            ],
            "crew": [
                {"id": 9339, "name": "Lilly Wachowski", "department": "Directing", "job": "Director", "profile_path": null},
                {"id": 1091, "name": "Bill Pope", "department": "Camera", "job": "Director of Photography", "profile_path": null}
            ]
        }"#;
        let credits: Credits = serde_json::from_str(raw).unwrap();
        assert_eq!(credits.top_billed(1).count(), 1);
        let directors: Vec<_> = credits.directors().map(|c| c.name.as_str()).collect();
        assert_eq!(directors, vec!["Lilly Wachowski"]);
    }
}
