//! Common validation utilities.

use validator::ValidationError;

lazy_static::lazy_static! {
    /// Lowercase alphanumeric with hyphens, no leading/trailing hyphens.
    pub static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").unwrap();

    /// E.164 phone number: +, then 8-15 digits, first digit non-zero.
    pub static ref PHONE_E164_REGEX: regex::Regex =
        regex::Regex::new(r"^\+[1-9][0-9]{7,14}$").unwrap();

    /// Hex color: #RGB or #RRGGBB.
    pub static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();

    /// Hostname: dot-separated labels, each 1-63 chars, no leading/trailing hyphens.
    pub static ref DOMAIN_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)+$").unwrap();
}

/// Validates a URL slug (lowercase alphanumeric with hyphens).
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message = Some(
            "Slug must be lowercase alphanumeric with hyphens, no leading/trailing hyphens".into(),
        );
        Err(err)
    }
}

/// Validates a phone number in E.164 format (e.g. +5215512345678).
pub fn validate_phone_e164(phone: &str) -> Result<(), ValidationError> {
    if PHONE_E164_REGEX.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone must be in E.164 format, e.g. +5215512345678".into());
        Err(err)
    }
}

/// Validates a CSS hex color (#RGB or #RRGGBB).
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("color_format");
        err.message = Some("Color must be a hex value like #1a2b3c".into());
        Err(err)
    }
}

/// Validates a custom domain name (lowercase hostname with at least one dot).
pub fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    if domain.len() <= 253 && DOMAIN_REGEX.is_match(domain) {
        Ok(())
    } else {
        let mut err = ValidationError::new("domain_format");
        err.message = Some("Domain must be a valid lowercase hostname".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("acme-salon").is_ok());
        assert!(validate_slug("salon123").is_ok());
        assert!(validate_slug("a1").is_ok());
        assert!(validate_slug("Acme-Salon").is_err()); // uppercase
        assert!(validate_slug("-acme").is_err()); // leading hyphen
        assert!(validate_slug("acme-").is_err()); // trailing hyphen
        assert!(validate_slug("a").is_err()); // too short
    }

    #[test]
    fn test_validate_phone_e164() {
        assert!(validate_phone_e164("+5215512345678").is_ok());
        assert!(validate_phone_e164("+14155552671").is_ok());
        assert!(validate_phone_e164("5512345678").is_err()); // missing +
        assert!(validate_phone_e164("+0123456789").is_err()); // leading zero
        assert!(validate_phone_e164("+123").is_err()); // too short
        assert!(validate_phone_e164("+52 55 1234 5678").is_err()); // spaces
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#fff").is_ok());
        assert!(validate_hex_color("#1a2b3c").is_ok());
        assert!(validate_hex_color("#A1B2C3").is_ok());
        assert!(validate_hex_color("1a2b3c").is_err()); // missing #
        assert!(validate_hex_color("#12345").is_err()); // wrong length
        assert!(validate_hex_color("#gggggg").is_err()); // not hex
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("salon.example.com").is_ok());
        assert!(validate_domain("my-salon.mx").is_ok());
        assert!(validate_domain("localhost").is_err()); // no dot
        assert!(validate_domain("Salon.Example.com").is_err()); // uppercase
        assert!(validate_domain("-bad.example.com").is_err()); // leading hyphen
    }
}
