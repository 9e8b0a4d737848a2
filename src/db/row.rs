//! Row types for the `atlas2`, `atlas_alt_names`, and `atlas_searches2`
//! tables, and the conversion from a place row to an [`AtlasLocation`].

use crate::db::search::MatchStage;
use crate::location::{AtlasLocation, ZIP_RANK};
use chrono::NaiveDateTime;

// -----------------------------------------------------------------------------
//
/// One row of the `atlas2` place table.
#[derive(Clone, Debug, Default, sqlx::FromRow)]
pub struct AtlasRow {
    pub item_no: i64,
    pub key_name: String,
    pub variant: Option<String>,
    pub name: String,
    pub admin2: Option<String>,
    pub admin1: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub time_zone: Option<String>,
    pub postal_code: Option<String>,
    pub rank: i32,
    pub feature_type: Option<String>,
    pub source: i32,
    pub geonames_id: Option<i64>,
} // struct

impl AtlasRow {
    /// Converts the row into a location, applying the stage's rank
    /// adjustment. Postal matches are pinned to [`ZIP_RANK`]; everything
    /// else is clamped to `[0, ZIP_RANK - 1]` after the adjustment.
    ///
    /// `display_city` lets the alternate-name stage substitute the alternate
    /// spelling for the stored name.
    #[must_use]
    pub fn to_location(&self, stage: MatchStage, postal: bool, display_city: Option<&str>) -> AtlasLocation {
        let rank = if postal {
            ZIP_RANK
        } else {
            (self.rank + stage.rank_adjustment()).clamp(0, ZIP_RANK - 1)
        }; // if

        AtlasLocation {
            city: display_city.unwrap_or(&self.name).to_string(),
            variant: self.variant.clone().unwrap_or_default(),
            county: self.admin2.clone().unwrap_or_default(),
            state: self.admin1.clone().unwrap_or_default(),
            country: self.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            zone: self.time_zone.clone().unwrap_or_default(),
            zip: if postal {
                self.postal_code.clone().unwrap_or_default()
            } else {
                String::new()
            }, // if
            rank,
            place_type: self.feature_type.clone().unwrap_or_else(|| "P.PPL".to_string()),
            source: self.source,
            geoname_id: self.geonames_id.unwrap_or(0),
            matched_by_alternate_name: stage == MatchStage::ExactMatchAlt,
            matched_by_sound: stage == MatchStage::SoundsLike,
            ..AtlasLocation::default()
        } // struct
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// One row of `atlas_alt_names`: an alternate spelling pointing either at a
/// specific `atlas2` row or at a key name.
#[derive(Clone, Debug, Default, sqlx::FromRow)]
pub struct AltNameRow {
    pub alt_key_name: String,
    pub atlas_key_name: String,
    pub alt_name: String,
    /// `"Y"` when the alternate form is a misspelling, in which case the
    /// stored name remains the display name.
    pub misspelling: Option<String>,
    pub specific_item2: Option<i64>,
} // struct

impl AltNameRow {
    /// True when the alternate name is a legitimate form that should replace
    /// the stored name for display.
    #[must_use]
    pub fn replaces_display_name(&self) -> bool {
        self.misspelling.as_deref().unwrap_or("N") == "N"
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// One row of the `atlas_searches2` log table.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct SearchLogRow {
    pub search_string: String,
    pub extended: bool,
    pub hits: i64,
    pub matches: i32,
    pub time_stamp: NaiveDateTime,
} // struct

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AtlasRow {
        AtlasRow {
            item_no: 42,
            key_name: "NASHUA".to_string(),
            name: "Nashua".to_string(),
            admin2: Some("Hillsborough County".to_string()),
            admin1: Some("NH".to_string()),
            country: "USA".to_string(),
            latitude: 42.7654,
            longitude: -71.4676,
            time_zone: Some("America/New_York".to_string()),
            rank: 3,
            feature_type: Some("P.PPL".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn exact_match_gains_a_rank() {
        let loc = row().to_location(MatchStage::ExactMatch, false, None);
        assert_eq!(loc.rank, 4);
        assert!(!loc.matched_by_sound);
        assert!(!loc.matched_by_alternate_name);
    }

    #[test]
    fn sound_match_loses_a_rank() {
        let loc = row().to_location(MatchStage::SoundsLike, false, None);
        assert_eq!(loc.rank, 2);
        assert!(loc.matched_by_sound);
    }

    #[test]
    fn rank_is_clamped_below_zip_rank() {
        let mut high = row();
        high.rank = 8;
        assert_eq!(high.to_location(MatchStage::ExactMatch, false, None).rank, 8);

        let mut low = row();
        low.rank = 0;
        assert_eq!(low.to_location(MatchStage::SoundsLike, false, None).rank, 0);
    }

    #[test]
    fn postal_match_is_pinned() {
        let mut postal = row();
        postal.postal_code = Some("03060".to_string());
        let loc = postal.to_location(MatchStage::ExactMatch, true, None);
        assert_eq!(loc.rank, ZIP_RANK);
        assert_eq!(loc.zip, "03060");
    }

    #[test]
    fn alternate_name_substitution() {
        let loc = row().to_location(MatchStage::ExactMatchAlt, false, Some("Nashville-on-Merrimack"));
        assert_eq!(loc.city, "Nashville-on-Merrimack");
        assert!(loc.matched_by_alternate_name);
    }

    #[test]
    fn misspelling_flag() {
        let alt = AltNameRow {
            misspelling: Some("Y".to_string()),
            ..Default::default()
        };
        assert!(!alt.replaces_display_name());

        let legit = AltNameRow {
            misspelling: Some("N".to_string()),
            ..Default::default()
        };
        assert!(legit.replaces_display_name());
    }
} // mod
