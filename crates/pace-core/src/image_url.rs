//! Archive URL construction for PACE OCI Level-3 browse images.
//!
//! The archive lays images out as
//! `{base}{group}/L3/{year}/{MMDD}/{filename}` where the filename encodes the
//! mission, the covered date span, the aggregation period and the product.
//! Annual composites use a shorter filename without the version and NRT
//! tokens; that difference is how the archive names them.

use jiff::civil::Date;

use crate::catalog::{Period, get_product};
use crate::error::CoreError;
use crate::models::image_request::ImageRequest;

pub const DEFAULT_ARCHIVE_BASE_URL: &str =
    "https://oceancolor.gsfc.nasa.gov/showimages/PACE_OCI/IMAGES/";

const MISSION: &str = "PACE_OCI";
const LEVEL: &str = "L3m";
const VERSION: &str = "V2_0";
const NRT: &str = "NRT";
const SUFFIX: &str = "nc.png";

/// Build the archive URL for `request` against the public OceanColor host.
pub fn build_image_url(request: &ImageRequest) -> Result<String, CoreError> {
    build_image_url_with_base(DEFAULT_ARCHIVE_BASE_URL, request)
}

/// Build the archive URL for `request` against `base_url`.
///
/// `base_url` is used as-is and is expected to end with `/`.
pub fn build_image_url_with_base(
    base_url: &str,
    request: &ImageRequest,
) -> Result<String, CoreError> {
    let product = get_product(&request.product)
        .ok_or_else(|| CoreError::InvalidProduct(request.product.clone()))?;

    let year = request.year;
    let month = request.month.as_str();
    let res = request.resolution.as_str();
    let token = request.period.archive_token();
    let (group, family, short) = (product.group_path, product.family, product.short_name);

    let url = match request.period {
        Period::Daily => {
            let day = request
                .day
                .as_deref()
                .ok_or_else(|| CoreError::MissingField("day".to_string()))?;
            format!(
                "{base_url}{group}/L3/{year}/{month}{day}/\
                 {MISSION}.{year}{month}{day}.{LEVEL}.{token}.{family}.{VERSION}.{short}.{res}.{NRT}.{SUFFIX}"
            )
        }
        Period::Monthly => {
            let last = last_day_of_month(year, month)?;
            format!(
                "{base_url}{group}/L3/{year}/{month}01/\
                 {MISSION}.{year}{month}01_{year}{month}{last:02}.{LEVEL}.{token}.{family}.{VERSION}.{short}.{res}.{NRT}.{SUFFIX}"
            )
        }
        Period::Annual => format!(
            "{base_url}{group}/L3/{year}/0101/\
             {MISSION}.{year}0101_{year}1231.{LEVEL}.{token}.{family}.{short}.{res}.{SUFFIX}"
        ),
    };

    Ok(url)
}

/// Number of days in `month` of `year`, honouring Gregorian leap years.
pub fn last_day_of_month(year: i16, month: &str) -> Result<i8, CoreError> {
    let invalid = || CoreError::InvalidDate {
        year,
        month: month.to_string(),
        day: "01".to_string(),
    };
    let m: i8 = month.parse().map_err(|_| invalid())?;
    let first = Date::new(year, m, 1).map_err(|_| invalid())?;
    Ok(first.days_in_month())
}
