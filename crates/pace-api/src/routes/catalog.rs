use axum::Json;
use serde::Serialize;

use pace_core::catalog::{Period, Resolution, all_products};

#[derive(Serialize)]
pub struct ProductSummary {
    id: &'static str,
    name: &'static str,
}

#[derive(Serialize)]
pub struct NamedChoice {
    name: &'static str,
}

pub async fn list_products() -> Json<Vec<ProductSummary>> {
    let products = all_products()
        .iter()
        .map(|p| ProductSummary {
            id: p.id,
            name: p.name,
        })
        .collect();
    Json(products)
}

pub async fn list_resolutions() -> Json<Vec<NamedChoice>> {
    Json(
        Resolution::ALL
            .iter()
            .map(|r| NamedChoice { name: r.as_str() })
            .collect(),
    )
}

pub async fn list_periods() -> Json<Vec<NamedChoice>> {
    Json(
        Period::ALL
            .iter()
            .map(|p| NamedChoice { name: p.as_str() })
            .collect(),
    )
}
