use crate::geonames::error::Error;
use crate::geonames::response::{Payload, PostalResponse, SearchResponse};
use crate::geonames::request::Request;

// -----------------------------------------------------------------------------

impl Request<'_> {
    /// Performs the HTTP get request and returns the parsed document.
    ///
    /// # Errors
    ///
    /// * The HTTP client cannot reach the server or the server answers with
    ///   a non-success status.
    /// * The body is not the JSON document the endpoint is documented to
    ///   return.
    /// * GeoNames reports an application-level error in its `status` block.
    pub async fn get(&self) -> Result<Payload, Error> {
        let url = self.query_url();

        tracing::debug!(url = %url, "GeoNames GET");

        let response = self.client.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "GeoNames HTTP failure");
            return Err(Error::HttpUnsuccessful(status.to_string()));
        } // if

        let bytes = response.bytes().await?;

        let payload = if self.is_postal() {
            Payload::Postal(serde_json::from_slice::<PostalResponse>(&bytes)?)
        } else {
            Payload::Search(serde_json::from_slice::<SearchResponse>(&bytes)?)
        }; // if

        // GeoNames reports quota and account problems inside an HTTP 200:
        if let Some(status) = payload.status() {
            return Err(Error::Service {
                code: status.value,
                message: status.message.clone(),
            }); // Err
        } // if

        Ok(payload)
    } // fn
} // impl
