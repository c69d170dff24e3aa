//! Renderer module
//!
//! Renders `Totals` to the console text report or JSON.

use crate::core::model::Totals;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for scan totals
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render totals to a string
    pub fn render(&self, totals: &Totals) -> serde_json::Result<String> {
        match self.config.format {
            OutputFormat::Text => Ok(self.render_text(totals)),
            OutputFormat::Json => self.render_json(totals),
        }
    }

    /// Render to a writer, followed by a trailing newline
    pub fn render_to<W: Write>(&self, totals: &Totals, mut writer: W) -> anyhow::Result<()> {
        let output = self.render(totals)?;
        writer.write_all(output.as_bytes())?;
        if !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    fn render_json(&self, totals: &Totals) -> serde_json::Result<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(totals)
        } else {
            serde_json::to_string(totals)
        }
    }

    /// Console report: counts, then the numbered preview, then errors
    fn render_text(&self, totals: &Totals) -> String {
        let mut output = String::new();

        output.push_str(&format!("Files: {}\n", totals.files_scanned));
        output.push_str(&format!("Lines: {}\n", totals.total_lines));
        output.push_str(&format!("Bytes: {}\n", totals.total_bytes));

        if !totals.preview_lines.is_empty() {
            output.push_str(&format!(
                "\nPreview ({} lines):\n",
                totals.preview_lines.len()
            ));
            for (i, line) in totals.preview_lines.iter().enumerate() {
                output.push_str(&format!("{}: {}\n", i + 1, line));
            }
        }

        if totals.has_errors() {
            output.push_str(&format!("\nErrors: {}\n", totals.error_count));
            for message in &totals.error_messages {
                output.push_str(&format!("  - {}\n", message));
            }
        }

        output
    }
}
