//! VIES VAT number validation service. Results are never cached.

use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use url::Url;

use crate::domain::entities::VatCheck;
use crate::error::AppError;
use crate::infrastructure::http::{FetchClient, ResponseFormat};
use crate::infrastructure::providers::vies::{self, VatRequest, ViesError};

pub const UPSTREAM: &str = "VIES";

pub struct ViesService {
    client: FetchClient,
    url: Url,
}

impl ViesService {
    pub fn new(client: FetchClient, url: Url) -> Self {
        Self { client, url }
    }

    /// Checks a VAT number through the `checkVatApprox` SOAP operation.
    ///
    /// # Errors
    ///
    /// - [`AppError::Upstream`] when the call itself fails
    /// - [`AppError::ExternalApiDown`] on a SOAP fault, whatever the HTTP status (fault string in details)
    /// - [`AppError::UpstreamParsing`] when the answer has no validity flag
    pub async fn check(&self, request: &VatRequest) -> Result<VatCheck, AppError> {
        let options = self
            .client
            .options()
            .post(vies::build_envelope(request))
            .header(CONTENT_TYPE, vies::SOAP_CONTENT_TYPE)
            .format(ResponseFormat::Text);

        let fetched = match self.client.fetch_json(self.url.as_str(), options).await {
            Ok(fetched) => fetched,
            // Faults usually come back as HTTP 500 with the SOAP body.
            Err(e) => {
                return Err(match e.details().and_then(Value::as_str).and_then(vies::fault_string) {
                    Some(fault) => fault_error(fault),
                    None => AppError::upstream("VIES check failed", &e),
                });
            }
        };

        let xml = fetched.data.as_str().unwrap_or_default();

        vies::parse_response(xml, request).map_err(|e| match e {
            ViesError::Fault(fault) => fault_error(fault),
            ViesError::MissingValidity => AppError::parsing("Unable to parse VIES response"),
        })
    }
}

fn fault_error(fault: String) -> AppError {
    AppError::external_api_down("VIES service unavailable", Some(json!({ "fault": fault })))
}
