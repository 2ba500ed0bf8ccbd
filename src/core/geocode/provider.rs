//! Reverse-geocoding collaborator contract.
//!
//! Only the client contract is modeled here; the network service, its
//! transport, and API-key provisioning are external concerns. Callers
//! plug in a provider at construction time.

use crate::core::metadata::Coordinates;
use crate::error::GeocodeError;
use serde::{Deserialize, Serialize};

/// Structured address returned by a reverse-geocode lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    /// Point-of-interest or landmark name, when the coordinates hit one
    pub poi: Option<String>,
    /// City or town
    pub city: Option<String>,
    /// State, province, or region
    pub region: Option<String>,
    /// Country
    pub country: Option<String>,
}

impl Address {
    /// Human-readable location label, in preference order:
    /// POI name; otherwise city+region+country; otherwise country alone.
    /// Returns `None` when no part is present.
    pub fn label(&self) -> Option<String> {
        if let Some(ref poi) = self.poi {
            return Some(poi.clone());
        }

        let parts: Vec<&str> = [&self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Client contract for the external reverse-geocoding service
pub trait ReverseGeocoder: Send + Sync {
    /// Look up the address at a decimal-degree coordinate pair
    fn reverse(&self, coordinates: Coordinates) -> Result<Address, GeocodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poi_wins_over_city() {
        let address = Address {
            poi: Some("Sunken Gardens".to_string()),
            city: Some("Lincoln".to_string()),
            country: Some("USA".to_string()),
            ..Default::default()
        };
        assert_eq!(address.label().unwrap(), "Sunken Gardens");
    }

    #[test]
    fn city_and_country_are_comma_joined() {
        let address = Address {
            city: Some("Lincoln".to_string()),
            country: Some("USA".to_string()),
            ..Default::default()
        };
        assert_eq!(address.label().unwrap(), "Lincoln, USA");
    }

    #[test]
    fn country_alone_is_used_last() {
        let address = Address {
            country: Some("USA".to_string()),
            ..Default::default()
        };
        assert_eq!(address.label().unwrap(), "USA");
    }

    #[test]
    fn empty_address_has_no_label() {
        assert!(Address::default().label().is_none());
    }
}
