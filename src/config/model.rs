use std::path::PathBuf;

/// Horizontal alignment of a text field relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    /// Center the text on the anchor: draw origin `x = anchor.x - width / 2`.
    #[default]
    Center,
    /// Draw with the anchor as the top-left corner.
    Left,
}

/// Font descriptor for one text field: file path, pixel size, and the anchor
/// the rendered string is placed against. One instance per field, shared by
/// every row in a batch.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    /// Path to a TrueType font file.
    pub font: PathBuf,
    /// Font size in pixels.
    pub size: u32,
    /// Anchor pixel coordinate `(x, y)` on the template.
    pub anchor: (i32, i32),
    /// How the string is aligned against the anchor.
    #[serde(default)]
    pub align: HAlign,
}

/// Immutable per-batch render configuration.
///
/// Built once (typically deserialized from JSON) and passed by reference into
/// the renderer; never mutated mid-batch. Anchor coordinates are absolute
/// template pixels, so values are template-dependent.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Path to the base template image (any raster format `image` decodes).
    pub template: PathBuf,
    /// Placement of the recipient name.
    pub name: FontSpec,
    /// Placement of the institution name.
    pub institution: FontSpec,
    /// Embed a QR payload of the identity fields (bottom-right corner).
    #[serde(default)]
    pub qr: bool,
}

/// Subject and body used for every delivery in a batch.
///
/// The body may contain a `{name}` placeholder, replaced per recipient.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageTemplate {
    /// Message subject line.
    pub subject: String,
    /// Plain-text message body; `{name}` interpolates the recipient name.
    pub body: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            subject: "Your Certificate of Achievement".to_owned(),
            body: "Dear {name},\n\n\
                   Congratulations! Please find attached your certificate of achievement.\n\
                   If any changes are needed, contact us.\n\n\
                   Best Regards"
                .to_owned(),
        }
    }
}

impl MessageTemplate {
    /// Render the body for one recipient.
    pub fn body_for(&self, name: &str) -> String {
        self.body.replace("{name}", name)
    }
}

/// Connection and credential settings for the mail relay.
///
/// Credentials are supplied by the operator per batch and never persisted;
/// the sender address doubles as the authentication username.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    /// Relay hostname.
    pub host: String,
    /// Relay port; the session uses implicit TLS on connect (not STARTTLS).
    pub port: u16,
    /// Sender email address, also the authentication username.
    pub sender: String,
    /// Application-specific password.
    pub password: String,
    /// Connection timeout in seconds.
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Settings for a given sender against the default relay
    /// (`smtp.gmail.com:465`, 30 s timeout).
    pub fn gmail(sender: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: "smtp.gmail.com".to_owned(),
            port: 465,
            sender: sender.into(),
            password: password.into(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
