//! The four-stage match ladder over the indexed `atlas2` and
//! `atlas_alt_names` tables: exact key, alternate name, starts-with, and
//! soundex, run in two passes (notable places first, then everything).

use crate::db::row::{AltNameRow, AtlasRow};
use crate::db::{AtlasDb, Error};
use crate::gazetteer::Gazetteer;
use crate::location::{source, LocationMap};
use crate::names::close_match_for_state;
use crate::normalize::simplify;
use crate::parse::ParsedSearch;
use std::collections::HashSet;

// -----------------------------------------------------------------------------

const ATLAS_COLUMNS: &str = "item_no, key_name, variant, name, admin2, admin1, country, \
     latitude, longitude, elevation, time_zone, postal_code, `rank`, feature_type, \
     source, geonames_id";

// -----------------------------------------------------------------------------
//
/// The ladder stages, strictest first. Each stage carries its own rank
/// adjustment: an exact hit is promoted, a soundex hit demoted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchStage {
    ExactMatch,
    ExactMatchAlt,
    StartsWith,
    SoundsLike,
} // enum

impl MatchStage {
    pub(crate) const ALL: [Self; 4] = [
        Self::ExactMatch,
        Self::ExactMatchAlt,
        Self::StartsWith,
        Self::SoundsLike,
    ]; // const

    /// Applied to the row's stored rank before clamping.
    #[must_use]
    pub const fn rank_adjustment(self) -> i32 {
        match self {
            Self::ExactMatch => 1,
            Self::ExactMatchAlt | Self::StartsWith => 0,
            Self::SoundsLike => -1,
        } // match
    } // fn
} // impl

// -----------------------------------------------------------------------------

impl AtlasDb {
    /// Runs the full ladder for a parsed query, retrying once on a database
    /// error before giving up.
    ///
    /// `extended` admits remote-sourced rows into the ranked pass;
    /// `max_matches` bounds accumulation at four times its value.
    ///
    /// # Errors
    ///
    /// Returns the second of two consecutive database errors. The caller
    /// treats this as recoverable: remote results still stand.
    #[cfg_attr(feature = "tracing-instrumentation", tracing::instrument(
        level = "debug",
        skip(self, gazetteer),
        fields(search = %parsed.normalized_search),
    ))]
    pub async fn search(
        &self,
        parsed: &ParsedSearch,
        gazetteer: &Gazetteer,
        extended: bool,
        max_matches: usize,
    ) -> Result<LocationMap, Error> {
        match self.search_once(parsed, gazetteer, extended, max_matches).await {
            Ok(map) => Ok(map),
            Err(error) => {
                tracing::warn!(error = %error, "local search failed, retrying once");
                self.search_once(parsed, gazetteer, extended, max_matches).await
            } // Err
        } // match
    } // fn

    async fn search_once(
        &self,
        parsed: &ParsedSearch,
        gazetteer: &Gazetteer,
        extended: bool,
        max_matches: usize,
    ) -> Result<LocationMap, Error> {
        let mut matches = LocationMap::new();
        let mut examined: HashSet<i64> = HashSet::new();

        let key = simplify(&parsed.target_city, false);
        let postal = parsed.is_postal();
        let city_has_digit = parsed.target_city.chars().any(|ch| ch.is_ascii_digit());
        let budget = max_matches.saturating_mul(4);

        'passes: for pass in 0..2 {
            let ranked_only = pass == 0;

            for stage in MatchStage::ALL {
                if stage == MatchStage::SoundsLike && (city_has_digit || key.is_empty()) {
                    continue;
                } // if

                // A postal ladder terminates at the exact stage; an empty
                // ranked pass still falls through to the unrestricted one.
                if postal && stage != MatchStage::ExactMatch {
                    break;
                } // if

                let rows = self.stage_rows(stage, parsed, &key, ranked_only).await?;

                for (row, display_city) in rows {
                    if !examined.insert(row.item_no) {
                        continue;
                    } // if

                    if ranked_only && !extended && source::is_external(row.source) {
                        // Still eligible for the unrestricted pass:
                        examined.remove(&row.item_no);
                        continue;
                    } // if

                    let state = row.admin1.as_deref().unwrap_or_default();

                    if !close_match_for_state(&parsed.target_state, state, &row.country, gazetteer)
                    {
                        continue;
                    } // if

                    row.to_location(stage, postal, display_city.as_deref())
                        .insert_into(&mut matches);

                    if matches.len() >= budget {
                        break 'passes;
                    } // if
                } // for

                // Ladder early-exit: a ranked pass that produced anything is
                // enough, as is a postal hit; a starts-with hit makes the
                // soundex stage unnecessary.
                let stop = !matches.is_empty()
                    && (ranked_only || postal || stage == MatchStage::StartsWith);

                if stop {
                    break 'passes;
                } // if
            } // for
        } // for

        Ok(matches)
    } // fn

    /// Fetches the candidate rows for one stage, paired with the display
    /// name override the alternate-name stage may impose.
    async fn stage_rows(
        &self,
        stage: MatchStage,
        parsed: &ParsedSearch,
        key: &str,
        ranked_only: bool,
    ) -> Result<Vec<(AtlasRow, Option<String>)>, Error> {
        let rank_condition = if ranked_only { " AND `rank` > 0" } else { "" };

        let rows = match stage {
            MatchStage::ExactMatch => {
                let sql = if parsed.is_postal() {
                    format!(
                        "SELECT {ATLAS_COLUMNS} FROM atlas2 WHERE postal_code = ?{rank_condition}"
                    )
                } else {
                    format!("SELECT {ATLAS_COLUMNS} FROM atlas2 WHERE key_name = ?{rank_condition}")
                }; // if

                let bound = if parsed.is_postal() {
                    parsed.postal_code.as_str()
                } else {
                    key
                }; // if

                sqlx::query_as::<_, AtlasRow>(&sql)
                    .bind(bound)
                    .fetch_all(self.pool())
                    .await?
                    .into_iter()
                    .map(|row| (row, None))
                    .collect()
            } // ExactMatch

            MatchStage::ExactMatchAlt => {
                let alt_rows = sqlx::query_as::<_, AltNameRow>(
                    "SELECT alt_key_name, atlas_key_name, alt_name, misspelling, specific_item2 \
                     FROM atlas_alt_names WHERE alt_key_name = ?",
                )
                .bind(key)
                .fetch_all(self.pool())
                .await?;

                let mut rows = Vec::new();

                for alt in alt_rows {
                    let display = alt
                        .replaces_display_name()
                        .then(|| alt.alt_name.clone());

                    // An alternate name points either at one specific row or
                    // at everything under a key name:
                    let found = match alt.specific_item2.filter(|item| *item > 0) {
                        Some(item_no) => {
                            let sql = format!(
                                "SELECT {ATLAS_COLUMNS} FROM atlas2 WHERE item_no = ?{rank_condition}"
                            );
                            sqlx::query_as::<_, AtlasRow>(&sql)
                                .bind(item_no)
                                .fetch_all(self.pool())
                                .await?
                        } // Some
                        None => {
                            let sql = format!(
                                "SELECT {ATLAS_COLUMNS} FROM atlas2 WHERE key_name = ?{rank_condition}"
                            );
                            sqlx::query_as::<_, AtlasRow>(&sql)
                                .bind(&alt.atlas_key_name)
                                .fetch_all(self.pool())
                                .await?
                        } // None
                    }; // match

                    rows.extend(found.into_iter().map(|row| (row, display.clone())));
                } // for

                rows
            } // ExactMatchAlt

            MatchStage::StartsWith => {
                let upper = format!("{key}~");
                let sql = format!(
                    "SELECT {ATLAS_COLUMNS} FROM atlas2 \
                     WHERE ((key_name >= ? AND key_name < ?) \
                         OR (variant >= ? AND variant < ?)){rank_condition}"
                ); // format

                sqlx::query_as::<_, AtlasRow>(&sql)
                    .bind(key)
                    .bind(&upper)
                    .bind(key)
                    .bind(&upper)
                    .fetch_all(self.pool())
                    .await?
                    .into_iter()
                    .map(|row| (row, None))
                    .collect()
            } // StartsWith

            MatchStage::SoundsLike => {
                let sql =
                    format!("SELECT {ATLAS_COLUMNS} FROM atlas2 WHERE sound = SOUNDEX(?){rank_condition}");

                // The sound column is indexed from the simplified key, so
                // the lookup soundexes the same form:
                sqlx::query_as::<_, AtlasRow>(&sql)
                    .bind(key)
                    .fetch_all(self.pool())
                    .await?
                    .into_iter()
                    .map(|row| (row, None))
                    .collect()
            } // SoundsLike
        }; // match

        Ok(rows)
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_rank_adjustments() {
        assert_eq!(MatchStage::ExactMatch.rank_adjustment(), 1);
        assert_eq!(MatchStage::ExactMatchAlt.rank_adjustment(), 0);
        assert_eq!(MatchStage::StartsWith.rank_adjustment(), 0);
        assert_eq!(MatchStage::SoundsLike.rank_adjustment(), -1);
    }

    #[test]
    fn ladder_order_is_strictest_first() {
        assert_eq!(
            MatchStage::ALL,
            [
                MatchStage::ExactMatch,
                MatchStage::ExactMatchAlt,
                MatchStage::StartsWith,
                MatchStage::SoundsLike,
            ]
        );
    }
} // mod
