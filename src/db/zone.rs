//! Time-zone assignment for locations that arrive without one, via the
//! `zone_lookup` table. Keys descend from the most to the least specific
//! form; an entry listing several zones yields the first with a trailing
//! `?`, marking the assignment as ambiguous.

use crate::db::{AtlasDb, Error};
use crate::normalize::simplify;

// -----------------------------------------------------------------------------

impl AtlasDb {
    /// Looks up the best zone for a country/state/county triple. Returns
    /// `None` when no key matches.
    ///
    /// # Errors
    ///
    /// Fails on a database error.
    pub async fn zone_for(
        &self,
        country: &str,
        state: &str,
        county: &str,
    ) -> Result<Option<String>, Error> {
        let base = simplify(country, false);

        let mut keys: Vec<String> = Vec::with_capacity(3);

        if !state.is_empty() && !county.is_empty() {
            keys.push(format!("{base}:{state}:{}", simplify(county, false)));
        } // if

        if !state.is_empty() {
            keys.push(format!("{base}:{state}"));
        } // if

        keys.push(base);

        for key in keys {
            let zones: Option<(String,)> =
                sqlx::query_as("SELECT zones FROM zone_lookup WHERE location = ?")
                    .bind(&key)
                    .fetch_optional(self.pool())
                    .await?;

            if let Some((zones,)) = zones {
                let zone = pick_zone(&zones);

                if !zone.is_empty() {
                    return Ok(Some(zone));
                } // if
            } // if
        } // for

        Ok(None)
    } // fn
} // impl

/// First recognizable zone of a comma-separated list, suffixed with `?`
/// when the list held alternatives. Entries that are not valid IANA ids are
/// skipped.
fn pick_zone(zones: &str) -> String {
    let mut parts = zones
        .split(',')
        .map(str::trim)
        .filter(|part| part.parse::<chrono_tz::Tz>().is_ok());

    let first = parts.next().unwrap_or_default().to_string();

    if parts.next().is_some() {
        format!("{first}?")
    } else {
        first
    } // if
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_zone_is_confident() {
        assert_eq!(pick_zone("America/New_York"), "America/New_York");
    }

    #[test]
    fn multiple_zones_are_ambiguous() {
        assert_eq!(
            pick_zone("America/Chicago, America/Denver"),
            "America/Chicago?"
        );
    }

    #[test]
    fn unrecognized_zones_are_skipped() {
        assert_eq!(pick_zone("Not/AZone, America/Denver"), "America/Denver");
        assert_eq!(pick_zone("Not/AZone"), "");
    }
} // mod
