//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a customer or personnel display name.
const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a free-text form field (notes, procedures).
const MAX_TEXT_LENGTH: usize = 10_000;

/// Validates that a facility code is a positive integer.
///
/// Facility codes prefix every job number, so a zero or negative code would
/// produce identifiers that fail to round-trip through the codec.
pub fn validate_facility_code(code: i32) -> Result<(), ValidationError> {
    if code > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("facility_code_range");
        err.message = Some("Facility code must be a positive integer".into());
        Err(err)
    }
}

/// Validates a human display name (customer, location, personnel).
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("name_empty");
        err.message = Some("Name must not be empty".into());
        return Err(err);
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("name_too_long");
        err.message = Some("Name must be at most 200 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a free-text field such as notes or emergency procedures.
pub fn validate_free_text(text: &str) -> Result<(), ValidationError> {
    if text.len() > MAX_TEXT_LENGTH {
        let mut err = ValidationError::new("text_too_long");
        err.message = Some("Text must be at most 10000 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a form tab identifier.
///
/// Tabs are lowercase kebab-case slugs (e.g. `customer`, `part-details`).
pub fn validate_tab_id(tab: &str) -> Result<(), ValidationError> {
    let valid = !tab.is_empty()
        && tab.len() <= 64
        && tab
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("tab_id_format");
        err.message = Some("Tab id must be a lowercase kebab-case slug".into());
        Err(err)
    }
}

/// Validates a part quantity.
pub fn validate_part_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("quantity_range");
        err.message = Some("Part quantity must be non-negative".into());
        Err(err)
    }
}
