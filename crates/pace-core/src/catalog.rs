//! Product, resolution and period catalog.
//!
//! The tables here are shared by the request validator, the URL builder and
//! the listing endpoints, so a code accepted by one is always understood by
//! the others.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A Level-3 product published by the PACE OCI archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Product code as accepted on the wire, e.g. `"5,6"`.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Archive group directory, e.g. `CHL`.
    pub group_path: &'static str,
    /// Product family token in the filename, e.g. `AER_DBOCEAN`.
    pub family: &'static str,
    /// Variable short name in the filename, e.g. `chlor_a`.
    pub short_name: &'static str,
}

const PRODUCTS: &[Product] = &[
    Product {
        id: "59,188",
        name: "Aerosol optical thickness at 1610 nm, Deep Blue algorithm",
        group_path: "AER_DB",
        family: "AER_DBOCEAN",
        short_name: "aot_1610_db",
    },
    Product {
        id: "64,255",
        name: "Phytoplankton Carbon",
        group_path: "CARBON",
        family: "CARBON",
        short_name: "carbon_phyto",
    },
    Product {
        id: "5,6",
        name: "Chlorophyll concentration",
        group_path: "CHL",
        family: "CHL",
        short_name: "chlor_a",
    },
    Product {
        id: "10,36",
        name: "Particulate Organic Carbon",
        group_path: "POC",
        family: "POC",
        short_name: "poc",
    },
];

/// Return all published products, in listing order.
pub fn all_products() -> &'static [Product] {
    PRODUCTS
}

/// Look up a product by its code.
pub fn get_product(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Spatial resolution of a browse image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "0.1-deg")]
    TenthDegree,
    #[default]
    #[serde(rename = "4km")]
    FourKm,
    #[serde(rename = "9km")]
    NineKm,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [
        Resolution::TenthDegree,
        Resolution::FourKm,
        Resolution::NineKm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::TenthDegree => "0.1-deg",
            Resolution::FourKm => "4km",
            Resolution::NineKm => "9km",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::InvalidResolution(s.to_string()))
    }
}

/// Temporal aggregation of a composite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Daily,
    Monthly,
    Annual,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Daily, Period::Monthly, Period::Annual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Monthly => "monthly",
            Period::Annual => "annual",
        }
    }

    /// Filename token the archive uses for this aggregation.
    pub fn archive_token(&self) -> &'static str {
        match self {
            Period::Daily => "DAY",
            Period::Monthly => "MO",
            Period::Annual => "YR",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::InvalidPeriod(s.to_string()))
    }
}
