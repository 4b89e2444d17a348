//! Supported regions
//!
//! Spaces are only offered in a fixed set of datacenters; anything else is
//! rejected before a client is ever built.

use std::str::FromStr;

use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};

/// A datacenter hosting spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Ams3,
    Fra1,
    Nyc3,
    Sgp1,
    Sfo2,
    Sfo3,
}

impl Region {
    /// Every supported region, in display order
    pub const ALL: [Region; 6] = [
        Region::Ams3,
        Region::Fra1,
        Region::Nyc3,
        Region::Sgp1,
        Region::Sfo2,
        Region::Sfo3,
    ];

    /// Region code as used in endpoints
    pub const fn as_str(self) -> &'static str {
        match self {
            Region::Ams3 => "ams3",
            Region::Fra1 => "fra1",
            Region::Nyc3 => "nyc3",
            Region::Sgp1 => "sgp1",
            Region::Sfo2 => "sfo2",
            Region::Sfo3 => "sfo3",
        }
    }

    /// Codes of all supported regions
    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|r| r.as_str()).collect()
    }

    /// Default service endpoint for this region
    pub fn endpoint(self) -> Result<Url> {
        let url = Url::parse(&format!("https://{}.digitaloceanspaces.com", self.as_str()))?;
        Ok(url)
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == lowered)
            .ok_or_else(|| Error::InvalidRegion {
                given: s.to_string(),
                valid: Self::codes(),
            })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_regions_any_case() {
        for region in Region::ALL {
            let code = region.as_str();
            assert_eq!(code.parse::<Region>().unwrap(), region);
            assert_eq!(code.to_uppercase().parse::<Region>().unwrap(), region);
        }
        assert_eq!("NyC3".parse::<Region>().unwrap(), Region::Nyc3);
    }

    #[test]
    fn test_parse_invalid_region() {
        for bad in ["", "us-east-1", "nyc1", "sfo"] {
            let err = bad.parse::<Region>().unwrap_err();
            match err {
                Error::InvalidRegion { given, valid } => {
                    assert_eq!(given, bad);
                    assert_eq!(valid, vec!["ams3", "fra1", "nyc3", "sgp1", "sfo2", "sfo3"]);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            Region::Sfo3.endpoint().unwrap().as_str(),
            "https://sfo3.digitaloceanspaces.com/"
        );
    }

    #[test]
    fn test_invalid_region_message_lists_options() {
        let msg = "mars1".parse::<Region>().unwrap_err().to_string();
        assert!(msg.contains("mars1"));
        assert!(msg.contains("ams3, fra1, nyc3, sgp1, sfo2, sfo3"));
    }
}
