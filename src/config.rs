// Configuration for a cover request: the ten form fields sent to the
// generator and the request settings (endpoint, static headers, cookie
// language, timeout). Defaults reproduce the stock Swedish test cover.

use crate::error::CoverError;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, COOKIE, ORIGIN,
    REFERER,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://intra.kth.se/kth-cover/kth-cover.pdf";

/// Environment variable that overrides the generator endpoint.
pub const ENDPOINT_ENV: &str = "KTH_COVER_URL";

/// Form fields for one cover. Serialized names match the generator's
/// field names, so the same shape is used for parameter files.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverParams {
    pub degree: String,
    #[serde(deserialize_with = "number_or_string")]
    pub exam: u32,
    pub area: String,
    #[serde(deserialize_with = "number_or_string")]
    pub year: u16,
    pub school: String,
    pub title: String,
    pub secondary_title: String,
    pub author: String,
    pub trita: String,
    /// Opaque value the generator insists on; without it no page is made.
    pub model: String,
}

impl Default for CoverParams {
    fn default() -> Self {
        CoverParams {
            degree: "second-level-30".into(),
            exam: 4,
            area: "Informationsteknik".into(),
            year: 2019,
            school: "Skolan för elektroteknik och datavetenskap".into(),
            title: "Svensk titel".into(),
            secondary_title: "Svensk undertitel".into(),
            author: "Å.B. Normalle".into(),
            trita: "TRITA-EECS-EX-2019:28".into(),
            model: "1337-brynjan!".into(),
        }
    }
}

impl CoverParams {
    /// Field name/value pairs in the order they go on the wire.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("degree", self.degree.clone()),
            ("exam", self.exam.to_string()),
            ("area", self.area.clone()),
            ("year", self.year.to_string()),
            ("school", self.school.clone()),
            ("title", self.title.clone()),
            ("secondaryTitle", self.secondary_title.clone()),
            ("author", self.author.clone()),
            ("trita", self.trita.clone()),
            ("model", self.model.clone()),
        ]
    }

    /// Load a JSON parameter file. Keys that are absent keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, CoverError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| CoverError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&data)
            .map_err(|e| CoverError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Per-user parameter file, e.g. `~/.config/kth-cover/params.json`.
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kth-cover").join("params.json"))
    }
}

/// Scalar fields may be given as `2019` or `"2019"`; both reach the wire as text.
fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// Cover language, selected through the `PLAY_LANG` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Swedish,
    English,
}

impl Language {
    pub fn cookie(&self) -> &'static str {
        match self {
            Language::Swedish => "PLAY_LANG=sv",
            Language::English => "PLAY_LANG=en",
        }
    }
}

/// Where and how the request is sent.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub endpoint: String,
    pub referer: String,
    pub origin: String,
    pub accept_encoding: String,
    pub accept_language: String,
    pub accept: String,
    pub language: Language,
    pub timeout: Option<Duration>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        RequestConfig {
            endpoint: DEFAULT_ENDPOINT.into(),
            referer: "https://intra.kth.se/kth-cover".into(),
            origin: "https://intra.kth.se".into(),
            accept_encoding: "gzip, deflate, br".into(),
            accept_language: "en-US,en;q=0.9".into(),
            accept: concat!(
                "text/html,application/xhtml+xml,application/xml;q=0.9,",
                "image/webp,image/apng,*/*;q=0.8"
            )
            .into(),
            language: Language::Swedish,
            timeout: None,
        }
    }
}

impl RequestConfig {
    /// Defaults, with the endpoint taken from `KTH_COVER_URL` when set.
    pub fn from_env() -> Self {
        let mut config = RequestConfig::default();
        if let Ok(url) = std::env::var(ENDPOINT_ENV) {
            if !url.trim().is_empty() {
                config.endpoint = url;
            }
        }
        config
    }

    /// Static headers sent with every cover request.
    pub fn headers(&self) -> Result<HeaderMap, CoverError> {
        let mut headers = HeaderMap::new();
        insert(&mut headers, REFERER, &self.referer)?;
        insert(&mut headers, ORIGIN, &self.origin)?;
        insert(&mut headers, ACCEPT_ENCODING, &self.accept_encoding)?;
        insert(&mut headers, ACCEPT_LANGUAGE, &self.accept_language)?;
        insert(&mut headers, ACCEPT, &self.accept)?;
        insert(&mut headers, COOKIE, self.language.cookie())?;
        Ok(headers)
    }
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), CoverError> {
    let val = HeaderValue::from_str(value).map_err(|_| {
        CoverError::Config(format!("invalid value for header {}: {:?}", name, value))
    })?;
    headers.insert(name, val);
    Ok(())
}
