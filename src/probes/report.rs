//! Console report for probe results

use crate::core::constants::report::{CREDENTIAL_PREFIX_LEN, FAILURE, SUCCESS};
use crate::core::provider::ProviderError;
use crate::core::providers::{GeneratedImage, GeneratedText};

/// One line of probe output, tagged with the stream it belongs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Out(String),
    Err(String),
}

impl ReportLine {
    pub fn text(&self) -> &str {
        match self {
            ReportLine::Out(line) | ReportLine::Err(line) => line,
        }
    }

    /// Write the line to stdout or stderr
    pub fn emit(&self) {
        match self {
            ReportLine::Out(_) => println!("{}", self.text()),
            ReportLine::Err(_) => eprintln!("{}", self.text()),
        }
    }
}

/// Show only the leading characters of a secret
pub fn mask_credential(secret: &str) -> String {
    let prefix: String = secret.chars().take(CREDENTIAL_PREFIX_LEN).collect();
    format!("{}...", prefix)
}

fn header(banner: &str, label: &str, masked: Option<&str>) -> Vec<ReportLine> {
    vec![
        ReportLine::Out(banner.to_string()),
        ReportLine::Out(format!("{}: {}", label, masked.unwrap_or("(not set)"))),
    ]
}

fn status_line(status: u16) -> ReportLine {
    ReportLine::Out(format!("Response Status: {}", status))
}

/// Lines for a failed probe: HTTP failures go to stdout, anything that
/// stopped the probe itself goes to stderr
fn failure_lines(err: &ProviderError) -> Vec<ReportLine> {
    let mut lines = Vec::new();
    if let Some(status) = err.status() {
        lines.push(status_line(status));
    }
    lines.push(match err {
        ProviderError::ApiError { message, .. } => {
            ReportLine::Out(format!("{} API Error: {}", FAILURE, message))
        }
        other => ReportLine::Err(format!("{} Test Failed: {}", FAILURE, other)),
    });
    lines
}

/// Render the text probe outcome
pub fn render_text(
    masked: Option<&str>,
    result: &Result<GeneratedText, ProviderError>,
) -> Vec<ReportLine> {
    let mut lines = header("Testing Google Gemini API...", "API Key", masked);
    match result {
        Ok(generated) => {
            lines.push(status_line(generated.status));
            lines.push(ReportLine::Out(format!("{} API Connection: SUCCESS", SUCCESS)));
            lines.push(ReportLine::Out(format!("Generated Content: {}", generated.text)));
        }
        Err(err) => lines.extend(failure_lines(err)),
    }
    lines
}

/// Render the image probe outcome
pub fn render_image(
    masked: Option<&str>,
    result: &Result<GeneratedImage, ProviderError>,
) -> Vec<ReportLine> {
    let mut lines = header(
        "Testing Hugging Face API with Stable Diffusion XL...",
        "Token",
        masked,
    );
    match result {
        Ok(image) => {
            lines.push(status_line(image.status));
            lines.push(ReportLine::Out(format!("{} Image Generated Successfully!", SUCCESS)));
            lines.push(ReportLine::Out(format!("Image Size: {} bytes", image.size)));
        }
        Err(err) => lines.extend(failure_lines(err)),
    }
    lines
}
