//! The search log (`atlas_searches2`): cache-coherence decisions and hit
//! accounting, plus the free-form `atlas_log` message table.

use crate::db::row::SearchLogRow;
use crate::db::{AtlasDb, Error};
use chrono::{Duration, NaiveDateTime, Utc};

// -----------------------------------------------------------------------------

/// A logged search younger than this may satisfy a new request without
/// consulting the remote sources again.
const RECENT_MONTHS: i64 = 12;

// -----------------------------------------------------------------------------
//
/// The recency rule. A stored search covers a new one when it is younger
/// than twelve months and at least as thorough: an extended entry covers
/// both kinds of request, a non-extended entry only covers non-extended
/// requests.
#[must_use]
pub(crate) fn is_recent(
    stamp: NaiveDateTime,
    was_extended: bool,
    extended: bool,
    now: NaiveDateTime,
) -> bool {
    now - stamp < Duration::days(RECENT_MONTHS * 30) && (was_extended || !extended)
} // fn

// -----------------------------------------------------------------------------

impl AtlasDb {
    /// Looks up the normalized search string in the log and applies the
    /// recency rule.
    ///
    /// # Errors
    ///
    /// Fails on a database error; the caller may treat "unknown" as "not
    /// recent".
    pub async fn has_search_been_done_recently(
        &self,
        normalized_search: &str,
        extended: bool,
    ) -> Result<bool, Error> {
        let row = sqlx::query_as::<_, SearchLogRow>(
            "SELECT search_string, extended, hits, matches, time_stamp \
             FROM atlas_searches2 WHERE search_string = ?",
        )
        .bind(normalized_search)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.is_some_and(|row| {
            is_recent(row.time_stamp, row.extended, extended, Utc::now().naive_utc())
        })) // is_some_and
    } // fn

    /// Records the outcome of a search. An existing row has its hit count
    /// incremented and keeps its extended flag sticky (`extended` can only
    /// ever be turned on); a new row starts at one hit.
    ///
    /// # Errors
    ///
    /// Fails on a database error.
    pub async fn log_search_results(
        &self,
        normalized_search: &str,
        extended: bool,
        match_count: i32,
    ) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO atlas_searches2 (search_string, extended, hits, matches, time_stamp) \
             VALUES (?, ?, 1, ?, NOW()) \
             ON DUPLICATE KEY UPDATE \
                 hits = hits + 1, \
                 extended = extended OR ?, \
                 matches = ?, \
                 time_stamp = NOW()",
        )
        .bind(normalized_search)
        .bind(extended)
        .bind(match_count)
        .bind(extended)
        .bind(match_count)
        .execute(self.pool())
        .await?;

        Ok(())
    } // fn

    /// Appends a message to `atlas_log`.
    ///
    /// # Errors
    ///
    /// Fails on a database error.
    pub async fn log_message(&self, warning: bool, message: &str) -> Result<(), Error> {
        sqlx::query("INSERT INTO atlas_log (time_stamp, warning, message) VALUES (NOW(), ?, ?)")
            .bind(warning)
            .bind(message)
            .execute(self.pool())
            .await?;

        Ok(())
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp(year: i32, month: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn fresh_entry_is_recent() {
        let now = stamp(2024, 6);
        assert!(is_recent(stamp(2024, 1), false, false, now));
        assert!(is_recent(stamp(2024, 1), true, true, now));
    }

    #[test]
    fn old_entry_is_not_recent() {
        let now = stamp(2024, 6);
        assert!(!is_recent(stamp(2022, 1), true, false, now));
    }

    #[test]
    fn extended_flag_is_one_way() {
        let now = stamp(2024, 6);
        // Stored extended covers a plain request:
        assert!(is_recent(stamp(2024, 1), true, false, now));
        // Stored plain does not cover an extended request:
        assert!(!is_recent(stamp(2024, 1), false, true, now));
    }
} // mod
