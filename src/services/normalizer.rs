//! Maps a raw catalog record onto the shape the store persists.

use crate::clients::RawRecord;
use crate::models::NewAnime;
use crate::parser::parse_aired_date;
use crate::services::import_service::ImportError;

/// Normalizes one catalog record.
///
/// Optional fields pass through untouched; the release date goes through the
/// aired-date fallback chain. Genre names are trimmed and blank ones dropped,
/// order is kept. Category resolution happens later, against the store.
///
/// # Errors
///
/// Returns [`ImportError::Internal`] when the record carries no usable title,
/// since the title is the dedup key and cannot be stored empty.
pub fn normalize_record(raw: &RawRecord) -> Result<NewAnime, ImportError> {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ImportError::Internal("catalog record has no title".to_string()))?;

    Ok(NewAnime {
        title: title.to_string(),
        synopsis: raw.synopsis.clone(),
        episodes: raw.episodes,
        image_url: raw.image_url().map(str::to_string),
        status: raw.status.clone(),
        release_date: parse_aired_date(raw.aired_from()),
        genres: raw
            .genre_names()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::jikan::{Aired, Genre, ImageVariant, Images};
    use chrono::NaiveDate;

    fn record(title: Option<&str>, aired_from: Option<&str>) -> RawRecord {
        RawRecord {
            mal_id: Some(1),
            title: title.map(str::to_string),
            synopsis: Some("Synopsis".to_string()),
            episodes: Some(12),
            images: Some(Images {
                jpg: Some(ImageVariant {
                    image_url: Some("https://example.com/cover.jpg".to_string()),
                }),
            }),
            status: Some("Finished Airing".to_string()),
            aired: Some(Aired {
                from: aired_from.map(str::to_string),
            }),
            genres: Some(vec![
                Genre {
                    name: Some("Action".to_string()),
                },
                Genre { name: None },
                Genre {
                    name: Some("  ".to_string()),
                },
                Genre {
                    name: Some(" Drama ".to_string()),
                },
            ]),
        }
    }

    #[test]
    fn maps_all_fields() {
        let anime =
            normalize_record(&record(Some("Cowboy Bebop"), Some("1998-04-03T00:00:00+00:00")))
                .unwrap();

        assert_eq!(anime.title, "Cowboy Bebop");
        assert_eq!(anime.synopsis.as_deref(), Some("Synopsis"));
        assert_eq!(anime.episodes, Some(12));
        assert_eq!(
            anime.image_url.as_deref(),
            Some("https://example.com/cover.jpg")
        );
        assert_eq!(anime.status.as_deref(), Some("Finished Airing"));
        assert_eq!(anime.release_date, NaiveDate::from_ymd_opt(1998, 4, 3));
        assert_eq!(anime.genres, vec!["Action", "Drama"]);
    }

    #[test]
    fn unparsable_aired_date_is_none() {
        let anime = normalize_record(&record(Some("Mystery"), Some("unknown"))).unwrap();
        assert_eq!(anime.release_date, None);
    }

    #[test]
    fn missing_nested_fields_stay_empty() {
        let raw = RawRecord {
            title: Some("Bare".to_string()),
            ..RawRecord::default()
        };
        let anime = normalize_record(&raw).unwrap();
        assert_eq!(anime.image_url, None);
        assert_eq!(anime.release_date, None);
        assert!(anime.genres.is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(matches!(
            normalize_record(&record(None, None)),
            Err(ImportError::Internal(_))
        ));
        assert!(matches!(
            normalize_record(&record(Some("   "), None)),
            Err(ImportError::Internal(_))
        ));
    }
}
