//! Form bodies (`application/x-www-form-urlencoded`) and their conversion
//! into mutation inputs.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ApiError;
use stagebook_db::entities::{artist, venue, Genres};
use stagebook_db::mutation::{ArtistInput, ShowInput, VenueInput};

const START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Deserialize)]
#[serde(untagged)]
enum Checkbox {
    Flag(bool),
    Text(String),
}

/// HTML checkboxes submit "y"/"on" when ticked and nothing otherwise. A JSON
/// boolean, as found in a prefilled form document, is taken as is.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Checkbox::deserialize(deserializer)? {
        Checkbox::Flag(ticked) => ticked,
        Checkbox::Text(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "on" | "true" | "1"
        ),
    })
}

fn optional(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn require_all(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t);
    }
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    /// Comma-separated
    pub genres: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    pub fn into_input(self) -> Result<VenueInput, ApiError> {
        require_all(&[
            ("name", self.name.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("address", self.address.as_str()),
        ])?;

        Ok(VenueInput {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website: optional(self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description),
            genres: Genres::from_csv(&self.genres),
        })
    }
}

impl From<venue::Model> for VenueForm {
    fn from(v: venue::Model) -> Self {
        Self {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone.unwrap_or_default(),
            image_link: v.image_link.unwrap_or_default(),
            facebook_link: v.facebook_link.unwrap_or_default(),
            website_link: v.website.unwrap_or_default(),
            genres: v.genres.to_csv(),
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    /// Comma-separated, at least one
    pub genres: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    pub fn into_input(self) -> Result<ArtistInput, ApiError> {
        require_all(&[
            ("name", self.name.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
        ])?;
        let genres = Genres::from_csv(&self.genres);
        if genres.is_empty() {
            return Err(ApiError::Validation(
                "an artist needs at least one genre".to_string(),
            ));
        }

        Ok(ArtistInput {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone: optional(self.phone),
            genres,
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website: optional(self.website_link),
            looking_venues: self.seeking_venue,
            seeking_description: optional(self.seeking_description),
        })
    }
}

impl From<artist::Model> for ArtistForm {
    fn from(a: artist::Model) -> Self {
        Self {
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone.unwrap_or_default(),
            image_link: a.image_link.unwrap_or_default(),
            facebook_link: a.facebook_link.unwrap_or_default(),
            website_link: a.website.unwrap_or_default(),
            genres: a.genres.to_csv(),
            seeking_venue: a.looking_venues,
            seeking_description: a.seeking_description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// Blank form with the start time preset to the current time.
    pub fn blank() -> Self {
        Self {
            start_time: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            ..Self::default()
        }
    }

    pub fn into_input(self) -> Result<ShowInput, ApiError> {
        require_all(&[
            ("artist_id", self.artist_id.as_str()),
            ("venue_id", self.venue_id.as_str()),
            ("start_time", self.start_time.as_str()),
        ])?;

        let artist_id = self
            .artist_id
            .trim()
            .parse()
            .map_err(|_| ApiError::Validation("artist_id must be an integer".to_string()))?;
        let venue_id = self
            .venue_id
            .trim()
            .parse()
            .map_err(|_| ApiError::Validation("venue_id must be an integer".to_string()))?;
        let start_time = parse_start_time(&self.start_time).ok_or_else(|| {
            ApiError::Validation(format!("unrecognized start_time: {}", self.start_time))
        })?;

        Ok(ShowInput {
            venue_id,
            artist_id,
            start_time,
        })
    }
}
