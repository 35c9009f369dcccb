/// A generated report, passed on to the caller unmodified.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub bytes: Vec<u8>,
    /// Name suggested by the server's `content-disposition` header.
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl PdfDocument {
    pub fn filename_or(&self, fallback: impl FnOnce() -> String) -> String {
        self.filename.clone().unwrap_or_else(fallback)
    }
}

/// Filename parameter of a `content-disposition` value. A plain `filename=`
/// wins over `filename*=`; surrounding quotes are dropped.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');

        if key == "filename" && !value.is_empty() {
            return Some(value.to_string());
        }
        if key == "filename*" {
            // RFC 5987: charset'language'value
            let value = value.rsplit('\'').next().unwrap_or(value);
            if !value.is_empty() {
                extended = Some(value.to_string());
            }
        }
    }

    extended
}

/// Download name used when the server suggests none.
pub fn default_filename(prefix: &str, section: &str, period: &str) -> String {
    format!("{prefix}_{section}_{period}.pdf")
}
