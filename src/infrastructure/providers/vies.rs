//! VIES `checkVatApprox` SOAP request and response handling.

use crate::domain::entities::VatCheck;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Content type expected by the VIES SOAP endpoint.
pub const SOAP_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

const TYPES_NAMESPACE: &str = "urn:ec.europa.eu:taxud:vies:services:checkVat:types";

// Element prefixes vary between VIES deployments (`ns2:`, `urn:`, none).
static VALID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:\w+:)?valid>\s*(true|false)\s*</(?:\w+:)?valid>").unwrap()
});
static FAULT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:\w+:)?faultstring>(.*?)</(?:\w+:)?faultstring>").unwrap()
});
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| element_regex("traderName"));
static ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| element_regex("traderAddress"));
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| element_regex("requestDate"));
static COMPANY_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| element_regex("traderCompanyType"));

/// Why a VIES answer could not be turned into a [`VatCheck`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViesError {
    #[error("VIES fault: {0}")]
    Fault(String),

    #[error("VIES response has no validity flag")]
    MissingValidity,
}

/// A VAT number split into its country prefix and national part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatRequest {
    pub vat: String,
    pub trader_name: Option<String>,
    pub trader_address: Option<String>,
}

impl VatRequest {
    pub fn country_code(&self) -> &str {
        self.vat.get(..2).unwrap_or_default()
    }

    pub fn number(&self) -> &str {
        self.vat.get(2..).unwrap_or_default()
    }
}

/// Builds the SOAP envelope for a `checkVatApprox` call.
pub fn build_envelope(request: &VatRequest) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:urn="{ns}">
  <soap:Header/>
  <soap:Body>
    <urn:checkVatApprox>
      <urn:countryCode>{country}</urn:countryCode>
      <urn:vatNumber>{number}</urn:vatNumber>
      <urn:traderName>{name}</urn:traderName>
      <urn:traderAddress>{address}</urn:traderAddress>
    </urn:checkVatApprox>
  </soap:Body>
</soap:Envelope>"#,
        ns = TYPES_NAMESPACE,
        country = xml_escape(request.country_code()),
        number = xml_escape(request.number()),
        name = xml_escape(request.trader_name.as_deref().unwrap_or_default()),
        address = xml_escape(request.trader_address.as_deref().unwrap_or_default()),
    )
}

/// Extracts the check result from a SOAP response body.
pub fn parse_response(xml: &str, request: &VatRequest) -> Result<VatCheck, ViesError> {
    if let Some(fault) = fault_string(xml) {
        return Err(ViesError::Fault(fault));
    }

    let valid = VALID_REGEX
        .captures(xml)
        .map(|c| c[1].eq_ignore_ascii_case("true"))
        .ok_or(ViesError::MissingValidity)?;

    Ok(VatCheck {
        vat: request.vat.clone(),
        country_code: request.country_code().to_string(),
        valid,
        name: element_text(xml, &NAME_REGEX),
        address: element_text(xml, &ADDRESS_REGEX),
        request_date: element_text(xml, &DATE_REGEX),
        company_type: element_text(xml, &COMPANY_TYPE_REGEX),
    })
}

/// The SOAP `faultstring`, if the body is a fault.
pub fn fault_string(xml: &str) -> Option<String> {
    FAULT_REGEX
        .captures(xml)
        .map(|fault| fault[1].trim().to_string())
}

fn element_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<(?:\w+:)?{tag}>([^<]*)</(?:\w+:)?{tag}>")).unwrap()
}

/// Trimmed text of the first element matched by `re`, `None` when absent or blank.
fn element_text(xml: &str, re: &Regex) -> Option<String> {
    let text = xml_unescape(re.captures(xml)?[1].trim());
    (!text.is_empty()).then_some(text)
}

fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn xml_unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
