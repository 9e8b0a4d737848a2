//! Write-through of remote-sourced locations into `atlas2`, so that the next
//! query for the same place is served locally.

use crate::db::row::AtlasRow;
use crate::db::{AtlasDb, Error};
use crate::location::{distance_km, source, AtlasLocation, CLOSE_DISTANCE_KM};
use crate::normalize::simplify;

// -----------------------------------------------------------------------------

impl AtlasDb {
    /// Writes every remote-sourced or update-flagged location back to the
    /// database. Failures are logged per location; the first error is
    /// returned after the loop so one bad row does not starve the rest.
    ///
    /// # Errors
    ///
    /// Returns the first per-location database error encountered.
    #[cfg_attr(feature = "tracing-instrumentation", tracing::instrument(
        level = "debug",
        skip_all,
        fields(candidates = locations.len()),
    ))]
    pub async fn write_back(&self, locations: &[AtlasLocation]) -> Result<(), Error> {
        let mut first_error = None;

        for location in locations {
            if !source::is_external(location.source) && !location.use_as_update {
                continue;
            } // if

            if let Err(error) = self.write_one(location).await {
                tracing::warn!(city = %location.city, error = %error, "writeback failed");
                first_error.get_or_insert(error);
            } // if
        } // for

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        } // match
    } // fn

    async fn write_one(&self, location: &AtlasLocation) -> Result<(), Error> {
        if location.use_as_update && location.geoname_id > 0 {
            let item_nos: Vec<(i64,)> =
                sqlx::query_as("SELECT item_no FROM atlas2 WHERE geonames_id = ? ORDER BY item_no")
                    .bind(location.geoname_id)
                    .fetch_all(self.pool())
                    .await?;

            return match item_nos.split_first() {
                None => self.insert_location(location).await,
                Some(((first, ), rest)) => {
                    self.update_location(*first, location).await?;

                    // The same remote id on several rows means earlier
                    // writebacks raced; keep the first row only.
                    for (item_no,) in rest {
                        sqlx::query("DELETE FROM atlas2 WHERE item_no = ?")
                            .bind(item_no)
                            .execute(self.pool())
                            .await?;
                    } // for

                    Ok(())
                } // Some
            }; // match
        } // if

        let rows = sqlx::query_as::<_, AtlasRow>(
            "SELECT item_no, key_name, variant, name, admin2, admin1, country, \
             latitude, longitude, elevation, time_zone, postal_code, `rank`, \
             feature_type, source, geonames_id \
             FROM atlas2 WHERE key_name = ?",
        )
        .bind(simplify(&location.city, false))
        .fetch_all(self.pool())
        .await?;

        let found = rows.iter().find(|row| matches_existing(row, location));

        match found {
            None => self.insert_location(location).await,
            Some(row) if location.use_as_update => self.update_location(row.item_no, location).await,
            Some(row) => self.fill_missing_admin(row, location).await,
        } // match
    } // fn

    async fn insert_location(&self, location: &AtlasLocation) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO atlas2 \
             (key_name, variant, name, admin2, admin1, country, latitude, longitude, \
              elevation, time_zone, postal_code, `rank`, feature_type, sound, source, geonames_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, SOUNDEX(?), ?, ?)",
        )
        .bind(simplify(&location.city, false))
        .bind(simplify(&location.variant, true))
        .bind(&location.city)
        .bind(&location.county)
        .bind(&location.state)
        .bind(&location.country)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(location.elevation)
        .bind(&location.zone)
        .bind(&location.zip)
        .bind(location.rank)
        .bind(&location.place_type)
        // The sound column mirrors key_name, so it soundexes the same
        // simplified form:
        .bind(simplify(&location.city, false))
        .bind(location.source)
        .bind(location.geoname_id)
        .execute(self.pool())
        .await?;

        Ok(())
    } // fn

    async fn update_location(&self, item_no: i64, location: &AtlasLocation) -> Result<(), Error> {
        sqlx::query(
            "UPDATE atlas2 SET \
                 key_name = ?, variant = ?, name = ?, admin2 = ?, admin1 = ?, country = ?, \
                 latitude = ?, longitude = ?, elevation = ?, time_zone = ?, postal_code = ?, \
                 `rank` = ?, feature_type = ?, sound = SOUNDEX(?), source = ?, geonames_id = ? \
             WHERE item_no = ?",
        )
        .bind(simplify(&location.city, false))
        .bind(simplify(&location.variant, true))
        .bind(&location.city)
        .bind(&location.county)
        .bind(&location.state)
        .bind(&location.country)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(location.elevation)
        .bind(&location.zone)
        .bind(&location.zip)
        .bind(location.rank)
        .bind(&location.place_type)
        .bind(simplify(&location.city, false))
        .bind(location.source)
        .bind(location.geoname_id)
        .bind(item_no)
        .execute(self.pool())
        .await?;

        Ok(())
    } // fn

    /// A stale-but-matching row only gets its empty admin columns filled in;
    /// the authoritative local fields stay untouched.
    async fn fill_missing_admin(
        &self,
        row: &AtlasRow,
        location: &AtlasLocation,
    ) -> Result<(), Error> {
        let needs_admin2 =
            row.admin2.as_deref().unwrap_or_default().is_empty() && !location.county.is_empty();
        let needs_admin1 =
            row.admin1.as_deref().unwrap_or_default().is_empty() && !location.state.is_empty();

        if !needs_admin2 && !needs_admin1 {
            return Ok(());
        } // if

        sqlx::query(
            "UPDATE atlas2 SET \
                 admin2 = IF(admin2 IS NULL OR admin2 = '', ?, admin2), \
                 admin1 = IF(admin1 IS NULL OR admin1 = '', ?, admin1) \
             WHERE item_no = ?",
        )
        .bind(&location.county)
        .bind(&location.state)
        .bind(row.item_no)
        .execute(self.pool())
        .await?;

        Ok(())
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// A key-name hit counts as the same place when the country matches, the
/// coordinates are within [`CLOSE_DISTANCE_KM`], and (inside the US and
/// Canada) the state matches too.
fn matches_existing(row: &AtlasRow, location: &AtlasLocation) -> bool {
    if row.country != location.country {
        return false;
    } // if

    let distance = distance_km(
        row.latitude,
        row.longitude,
        location.latitude,
        location.longitude,
    ); // distance_km

    if distance >= CLOSE_DISTANCE_KM {
        return false;
    } // if

    let domestic = location.country == "USA" || location.country == "CAN";

    !domestic || row.admin1.as_deref().unwrap_or_default() == location.state
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
