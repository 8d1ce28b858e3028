//! Field-level validation of raw request parameters.
//!
//! Raw inputs arrive as optional strings so that every problem can be
//! reported against the field it concerns instead of failing on the first
//! malformed value. Cross-field rules only run once every field is
//! individually valid, and stop at the first failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Period, Resolution, get_product};
use crate::models::image_request::ImageRequest;

/// First year with PACE OCI science data.
pub const MIN_YEAR: i32 = 2024;

/// Longest chat message accepted, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Key used for errors that span several fields.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";

/// Validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error against one field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Raw query parameters of an image request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageQuery {
    pub product: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub res: Option<String>,
    pub period: Option<String>,
}

impl ImageQuery {
    /// Validate against the current calendar year.
    pub fn validate(&self) -> Result<ImageRequest, ValidationErrors> {
        self.validate_for_year(i32::from(jiff::Zoned::now().year()))
    }

    /// Validate with `current_year` as the upper bound for `year`.
    pub fn validate_for_year(&self, current_year: i32) -> Result<ImageRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let product = match self.product.as_deref() {
            None => {
                errors.add("product", REQUIRED);
                None
            }
            Some(code) if get_product(code).is_none() => {
                errors.add("product", not_a_choice(code));
                None
            }
            Some(code) => Some(code.to_string()),
        };

        let year = match self.year.as_deref() {
            None => {
                errors.add("year", REQUIRED);
                None
            }
            Some(raw) => match raw.trim().parse::<i32>() {
                Err(_) => {
                    errors.add("year", "A valid integer is required.");
                    None
                }
                Ok(y) if y < MIN_YEAR => {
                    errors.add(
                        "year",
                        format!("Ensure this value is greater than or equal to {MIN_YEAR}."),
                    );
                    None
                }
                Ok(y) if y > current_year => {
                    errors.add(
                        "year",
                        format!("Ensure this value is less than or equal to {current_year}."),
                    );
                    None
                }
                Ok(y) => i16::try_from(y).ok(),
            },
        };

        let month = match self.month.as_deref() {
            None => {
                errors.add("month", REQUIRED);
                None
            }
            Some(m) => check_short_text(&mut errors, "month", m),
        };

        let day = self
            .day
            .as_deref()
            .and_then(|d| check_short_text(&mut errors, "day", d));

        let resolution = match self.res.as_deref() {
            None => Some(Resolution::default()),
            Some(raw) => match raw.parse::<Resolution>() {
                Ok(r) => Some(r),
                Err(_) => {
                    errors.add("res", not_a_choice(raw));
                    None
                }
            },
        };

        let period = match self.period.as_deref() {
            None => {
                errors.add("period", REQUIRED);
                None
            }
            Some(raw) => match raw.parse::<Period>() {
                Ok(p) => Some(p),
                Err(_) => {
                    errors.add("period", not_a_choice(raw));
                    None
                }
            },
        };

        let (Some(product), Some(year), Some(month), Some(resolution), Some(period)) =
            (product, year, month, resolution, period)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let request = ImageRequest {
            product,
            year,
            month,
            day,
            resolution,
            period,
        };

        validate_dates(&request).map(|()| request)
    }
}

fn validate_dates(request: &ImageRequest) -> Result<(), ValidationErrors> {
    let non_field = |msg: &str| Err(ValidationErrors::single(NON_FIELD_ERRORS, msg));

    if request.period == Period::Daily && request.day.is_none() {
        return non_field("Day is required for the daily period.");
    }

    let Some(month) = two_digit_in_range(&request.month, 12) else {
        return non_field("Month must be a valid number between 01 and 12.");
    };

    if let Some(day) = request.day.as_deref() {
        let Some(day) = two_digit_in_range(day, 31) else {
            return non_field("Day must be a valid number between 01 and 31.");
        };
        if jiff::civil::Date::new(request.year, month, day).is_err() {
            return non_field("Invalid date combination provided.");
        }
    }

    Ok(())
}

/// Parse exactly two ASCII digits into `1..=max`.
fn two_digit_in_range(value: &str, max: i8) -> Option<i8> {
    if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: i8 = value.parse().ok()?;
    (1..=max).contains(&n).then_some(n)
}

/// Trim `value`, then reject it if blank or longer than two characters.
fn check_short_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, BLANK);
        None
    } else if value.chars().count() > 2 {
        errors.add(field, "Ensure this field has no more than 2 characters.");
        None
    } else {
        Some(value.to_string())
    }
}

fn not_a_choice(value: &str) -> String {
    format!("\"{value}\" is not a valid choice.")
}

/// Raw body of a chat request. `chat_uuid` is accepted as a legacy name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatInput {
    #[serde(alias = "chat_uuid")]
    pub chat_id: Option<String>,
    pub message: Option<String>,
}

impl ChatInput {
    /// Check presence and length of the trimmed message. Content rules
    /// (UUID shape, blank messages) belong to the conversation proxy.
    pub fn validate(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.chat_id.is_none() {
            errors.add("chat_id", REQUIRED);
        }
        let message = self.message.as_deref().map(str::trim);
        match message {
            None => errors.add("message", REQUIRED),
            Some(m) if m.chars().count() > MAX_MESSAGE_CHARS => errors.add(
                "message",
                format!("Ensure this field has no more than {MAX_MESSAGE_CHARS} characters."),
            ),
            Some(_) => {}
        }

        match (self.chat_id, message) {
            (Some(id), Some(message)) if errors.is_empty() => Ok((id, message.to_string())),
            _ => Err(errors),
        }
    }
}
