use crate::error::{Error, Result};

/// The upstream area names mapped to ISO 3166-1 alpha-2 codes. Area names
/// outside this table cannot be resolved to a flag.
pub const AREA_ISO_CODES: &[(&str, &str)] = &[
    ("american", "US"),
    ("british", "GB"),
    ("canadian", "CA"),
    ("chinese", "CN"),
    ("croatian", "HR"),
    ("dutch", "NL"),
    ("egyptian", "EG"),
    ("filipino", "PH"),
    ("french", "FR"),
    ("greek", "GR"),
    ("indian", "IN"),
    ("irish", "IE"),
    ("italian", "IT"),
    ("jamaican", "JM"),
    ("japanese", "JP"),
    ("kenyan", "KE"),
    ("malaysian", "MY"),
    ("mexican", "MX"),
    ("moroccan", "MA"),
    ("norwegian", "NO"),
    ("polish", "PL"),
    ("portuguese", "PT"),
    ("russian", "RU"),
    ("spanish", "ES"),
    ("thai", "TH"),
    ("tunisian", "TN"),
    ("turkish", "TR"),
    ("vietnamese", "VN"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStyle {
    Flat,
    Shiny,
}

impl FlagStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FlagStyle::Flat => "flat",
            FlagStyle::Shiny => "shiny",
        }
    }
}

/// Resolve a human-readable area name ("French") to its ISO country code.
pub fn iso_code_for_area(area: &str) -> Result<&'static str> {
    let needle = area.trim().to_lowercase();
    AREA_ISO_CODES
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, code)| *code)
        .ok_or_else(|| Error::UnresolvedCountry(area.to_string()))
}

/// Flag-image endpoint URL, parameterized by code, visual style, and pixel
/// size (the endpoint serves 16, 24, 32, 48, and 64).
#[must_use]
pub fn flag_url(code: &str, style: FlagStyle, size: u32) -> String {
    let code = code.to_uppercase();
    let style = style.as_str();
    format!("https://flagsapi.com/{code}/{style}/{size}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_code_known_areas() {
        assert_eq!(iso_code_for_area("French").unwrap(), "FR");
        assert_eq!(iso_code_for_area("british").unwrap(), "GB");
        assert_eq!(iso_code_for_area("  Japanese  ").unwrap(), "JP");
    }

    #[test]
    fn test_iso_code_unknown_area() {
        assert!(matches!(
            iso_code_for_area("Martian"),
            Err(Error::UnresolvedCountry(_))
        ));
        assert!(matches!(
            iso_code_for_area("Unknown"),
            Err(Error::UnresolvedCountry(_))
        ));
    }

    #[test]
    fn test_flag_url_format() {
        assert_eq!(
            flag_url("fr", FlagStyle::Flat, 64),
            "https://flagsapi.com/FR/flat/64.png"
        );
        assert_eq!(
            flag_url("GB", FlagStyle::Shiny, 32),
            "https://flagsapi.com/GB/shiny/32.png"
        );
    }
}
