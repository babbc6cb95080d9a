#![forbid(unsafe_code)]

//! Page customization data: contact lines, social link rows and the logo.
//!
//! These are plain values. The DOM mutation lives in `tastedeck-web`; this
//! module decides what text, icons and attributes end up in the page.

/// Number of `.contact-item` rows the contact block must have.
pub const CONTACT_ROWS: usize = 3;

/// Alt text used when a logo is added without one.
pub const DEFAULT_LOGO_ALT: &str = "Benally Logo";

const GENERIC_LINK_ICON: &str = "\u{1F517}";

/// Contact block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub location: String,
}

impl ContactInfo {
    pub fn new(
        email: impl Into<String>,
        phone: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            location: location.into(),
        }
    }

    /// Text for the three contact rows, in page order.
    #[must_use]
    pub fn lines(&self) -> [String; CONTACT_ROWS] {
        [
            format!("Email: {}", self.email),
            format!("Phone: {}", self.phone),
            format!("Location: {}", self.location),
        ]
    }
}

/// Icon glyph for a social platform name (case-insensitive).
#[must_use]
pub fn social_icon(platform: &str) -> &'static str {
    match platform.to_ascii_lowercase().as_str() {
        "instagram" => "\u{1F4F7}",
        "facebook" => "\u{1F4D8}",
        "twitter" => "\u{1F426}",
        "linkedin" => "\u{1F4BC}",
        "youtube" => "\u{1F4FA}",
        _ => GENERIC_LINK_ICON,
    }
}

/// One icon link in the social row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: &'static str,
}

/// Build the social row from `(platform, url)` pairs, preserving order.
pub fn social_links<I, K, V>(entries: I) -> Vec<SocialLink>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    entries
        .into_iter()
        .map(|(platform, url)| {
            let platform = platform.into();
            SocialLink {
                icon: social_icon(&platform),
                platform,
                url: url.into(),
            }
        })
        .collect()
}

/// Inline styles shared by the injected elements.
pub mod style {
    pub const SOCIAL_ROW: &[(&str, &str)] = &[
        ("margin-top", "20px"),
        ("display", "flex"),
        ("justify-content", "center"),
        ("gap", "15px"),
    ];

    pub const SOCIAL_LINK: &[(&str, &str)] = &[
        ("color", "#d4af37"),
        ("font-size", "1.5rem"),
        ("text-decoration", "none"),
        ("transition", "transform 0.3s ease"),
    ];

    pub const SOCIAL_LINK_HOVER_SCALE: &str = "scale(1.2)";
    pub const SOCIAL_LINK_REST_SCALE: &str = "scale(1)";

    pub const LOGO: &[(&str, &str)] = &[
        ("max-height", "60px"),
        ("margin-bottom", "10px"),
        ("filter", "drop-shadow(2px 2px 4px rgba(0, 0, 0, 0.5))"),
    ];
}

/// Logo to insert before the brand name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoSpec {
    pub url: String,
    pub alt: String,
}

impl LogoSpec {
    /// `None` when `url` is empty; a missing alt falls back to [`DEFAULT_LOGO_ALT`].
    #[must_use]
    pub fn new(url: &str, alt: Option<&str>) -> Option<Self> {
        if url.is_empty() {
            return None;
        }
        Some(Self {
            url: url.to_owned(),
            alt: alt.unwrap_or(DEFAULT_LOGO_ALT).to_owned(),
        })
    }
}
