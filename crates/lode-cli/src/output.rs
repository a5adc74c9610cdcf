use std::fmt::Write as _;

use lode_core::enums::ResponseStatus;
use lode_core::responses::AnswerResponse;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable value. `Text` falls back to pretty JSON for
/// values without a dedicated text layout.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::Text => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

pub fn print<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Answer followed by numbered sources and a one-line footer.
pub fn answer_text(response: &AnswerResponse) -> String {
    let mut out = response.answer.clone();

    if !response.citations.is_empty() {
        out.push_str("\n\nSources:");
        for citation in &response.citations {
            let _ = write!(out, "\n  [{}] {} - {}", citation.number, citation.source, citation.url);
        }
    }

    let _ = write!(
        out,
        "\n\n({}, confidence {:.2}{})",
        response.status,
        response.confidence,
        if response.cache_hit { ", cached" } else { "" }
    );
    if let (ResponseStatus::Error, Some(error)) = (response.status, &response.error) {
        let _ = write!(out, "\nerror: {error}");
    }
    out
}
