//! One-shot API probes
//!
//! Each probe performs a single request against one provider and returns a
//! `Result`; [`run_probe`] turns that result into console lines. Nothing in
//! here panics or propagates a failure past the report.

pub mod image;
pub mod report;
pub mod text;

use crate::core::config::Config;
use crate::core::provider::{HttpTransport, ProviderType};
use report::{ReportLine, mask_credential};
use std::sync::Arc;
use tracing::debug;

/// Run the probe for one provider and render its report
pub async fn run_probe(
    provider: ProviderType,
    config: &Config,
    transport: Arc<dyn HttpTransport>,
) -> Vec<ReportLine> {
    debug!("Running {} probe", provider.display_name());

    match provider {
        ProviderType::Gemini => {
            let masked = config.gemini_api_key.as_deref().map(mask_credential);
            let result =
                text::run_text_probe(transport, &config.gemini, config.gemini_api_key.as_deref())
                    .await;
            report::render_text(masked.as_deref(), &result)
        }
        ProviderType::HuggingFace => {
            let masked = config.huggingface_token.as_deref().map(mask_credential);
            let result = image::run_image_probe(
                transport,
                &config.huggingface,
                config.huggingface_token.as_deref(),
            )
            .await;
            report::render_image(masked.as_deref(), &result)
        }
    }
}
