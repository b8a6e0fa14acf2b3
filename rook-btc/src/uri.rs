//! Bitcoin payment URIs (BIP21 style).

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::address::PaymentAddress;
use crate::amount::Btc;
use crate::error::{Error, Result};
use crate::stealth::StealthAddress;

const SCHEME: &str = "bitcoin:";

/// A composed payment URI: an address part plus optional parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitcoinUri {
    address: Option<String>,
    amount: Option<Btc>,
    label: Option<String>,
    message: Option<String>,
    request: Option<String>,
}

impl BitcoinUri {
    /// An empty URI; set parts with the builder methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the address part from a payment address.
    #[must_use]
    pub fn with_address(mut self, address: &PaymentAddress) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Set the address part from a stealth address.
    #[must_use]
    pub fn with_stealth(mut self, address: &StealthAddress) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Set the amount parameter.
    #[must_use]
    pub const fn with_amount(mut self, amount: Btc) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the label parameter.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the message parameter.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the payment-request (`r=`) parameter.
    #[must_use]
    pub fn with_request(mut self, request: impl Into<String>) -> Self {
        self.request = Some(request.into());
        self
    }

    /// The address part, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The amount parameter, if any.
    #[must_use]
    pub const fn amount(&self) -> Option<Btc> {
        self.amount
    }

    /// The label parameter, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The message parameter, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The payment-request parameter, if any.
    #[must_use]
    pub fn request(&self) -> Option<&str> {
        self.request.as_deref()
    }
}

impl fmt::Display for BitcoinUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SCHEME)?;
        if let Some(address) = &self.address {
            f.write_str(address)?;
        }

        let mut separator = '?';
        let mut parameter = |f: &mut fmt::Formatter<'_>, key: &str, value: &str| {
            let result = write!(f, "{separator}{key}={value}");
            separator = '&';
            result
        };

        if let Some(amount) = self.amount {
            parameter(f, "amount", &amount.to_string())?;
        }
        if let Some(label) = &self.label {
            parameter(f, "label", &percent_encode(label))?;
        }
        if let Some(message) = &self.message {
            parameter(f, "message", &percent_encode(message))?;
        }
        if let Some(request) = &self.request {
            parameter(f, "r", &percent_encode(request))?;
        }
        Ok(())
    }
}

impl FromStr for BitcoinUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .get(..SCHEME.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
            .map(|_| &s[SCHEME.len()..])
            .ok_or_else(|| Error::msg("expected bitcoin: scheme"))?;

        let (address_part, query) = match rest.split_once('?') {
            Some((address, query)) => (address, Some(query)),
            None => (rest, None),
        };

        let mut uri = Self::new();
        if !address_part.is_empty() {
            if address_part.parse::<PaymentAddress>().is_err()
                && address_part.parse::<StealthAddress>().is_err()
            {
                return Err(Error::msg("invalid address in URI"));
            }
            uri.address = Some(address_part.to_owned());
        }

        if let Some(query) = query {
            for pair in query.split('&').filter(|pair| !pair.is_empty()) {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| Error::msg(format!("malformed URI parameter \"{pair}\"")))?;
                let value = percent_decode(value)?;
                match key {
                    "amount" => uri.amount = Some(value.parse()?),
                    "label" => uri.label = Some(value),
                    "message" => uri.message = Some(value),
                    "r" => uri.request = Some(value),
                    _ if key.starts_with("req-") => {
                        return Err(Error::msg(format!("unsupported required parameter {key}")));
                    }
                    // Unknown optional parameters are ignored.
                    _ => {}
                }
            }
        }

        Ok(uri)
    }
}

fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

fn percent_decode(text: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut rest = text.as_bytes();
    while let Some((&first, tail)) = rest.split_first() {
        if first == b'%' {
            let (escape, tail) = tail
                .split_at_checked(2)
                .ok_or_else(|| Error::msg("truncated percent escape"))?;
            let escape = std::str::from_utf8(escape).map_err(|_| Error::Encoding)?;
            let byte = u8::from_str_radix(escape, 16).map_err(|_| Error::Encoding)?;
            bytes.push(byte);
            rest = tail;
        } else {
            bytes.push(first);
            rest = tail;
        }
    }
    String::from_utf8(bytes).map_err(|_| Error::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "113Pfw4sFqN1T5kXUnKbqZHMJHN9oyjtgD";

    fn payment() -> PaymentAddress {
        ADDRESS.parse().unwrap()
    }

    #[test]
    fn test_address_only() {
        let uri = BitcoinUri::new().with_address(&payment());
        assert_eq!(uri.to_string(), format!("bitcoin:{ADDRESS}"));
    }

    #[test]
    fn test_all_parameters_in_order() {
        let uri = BitcoinUri::new()
            .with_address(&payment())
            .with_amount("0.0001".parse().unwrap())
            .with_label("rent")
            .with_message("paid in full");
        assert_eq!(
            uri.to_string(),
            format!("bitcoin:{ADDRESS}?amount=0.0001&label=rent&message=paid%20in%20full")
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let text = format!("bitcoin:{ADDRESS}?amount=1.5&label=caf%C3%A9");
        let uri: BitcoinUri = text.parse().unwrap();
        assert_eq!(uri.address(), Some(ADDRESS));
        assert_eq!(uri.amount().unwrap().as_sat(), 150_000_000);
        assert_eq!(uri.label(), Some("café"));
        assert_eq!(uri.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        assert!("bitcoin:notanaddress".parse::<BitcoinUri>().is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_scheme() {
        assert!(format!("litecoin:{ADDRESS}").parse::<BitcoinUri>().is_err());
    }

    #[test]
    fn test_parse_rejects_required_extension() {
        assert!(format!("bitcoin:{ADDRESS}?req-zeta=1")
            .parse::<BitcoinUri>()
            .is_err());
    }

    #[test]
    fn test_parse_ignores_unknown_optional() {
        let uri: BitcoinUri = format!("bitcoin:{ADDRESS}?zeta=1").parse().unwrap();
        assert_eq!(uri.address(), Some(ADDRESS));
    }

    #[test]
    fn test_percent_decode_rejects_truncated() {
        assert!(format!("bitcoin:{ADDRESS}?label=%2").parse::<BitcoinUri>().is_err());
    }
}
