use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::sentiment_series::SentimentSeries;
use crate::domain::error::DomainError;
use crate::domain::ports::sentiment_plotter::SentimentPlotter;
use crate::domain::values::commodity::Commodity;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN: f64 = 40.0;

/// Writes one SVG line chart of market force per commodity.
pub struct SvgSentimentPlotter {
    dir: PathBuf,
}

impl SvgSentimentPlotter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn plot_path(&self, commodity: &Commodity) -> PathBuf {
        let safe: String = commodity
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("market_force_{safe}.svg"))
    }

    fn render(series: &SentimentSeries) -> String {
        let values: Vec<f64> = series.rows.iter().map(|r| r.market_force).collect();
        // Keep zero inside the range so the baseline is always drawn.
        let lo = values.iter().copied().fold(0.0_f64, f64::min);
        let hi = values.iter().copied().fold(0.0_f64, f64::max);
        let span = if hi > lo { hi - lo } else { 1.0 };
        let x_step = if values.len() > 1 {
            (WIDTH - 2.0 * MARGIN) / (values.len() - 1) as f64
        } else {
            0.0
        };
        let y_of = |v: f64| HEIGHT - MARGIN - (v - lo) / span * (HEIGHT - 2.0 * MARGIN);

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{MARGIN}" y="24" font-family="sans-serif" font-size="16">Market force: {}</text>"#,
            escape(series.commodity.as_str())
        ));
        svg.push('\n');
        let zero = y_of(0.0);
        svg.push_str(&format!(
            r##"<line x1="{MARGIN}" y1="{zero:.2}" x2="{:.2}" y2="{zero:.2}" stroke="#999" stroke-dasharray="4 4"/>"##,
            WIDTH - MARGIN
        ));
        svg.push('\n');
        if !values.is_empty() {
            let points: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{:.2},{:.2}", MARGIN + i as f64 * x_step, y_of(*v)))
                .collect();
            svg.push_str(&format!(
                r##"<polyline fill="none" stroke="#1f77b4" stroke-width="1.5" points="{}"/>"##,
                points.join(" ")
            ));
            svg.push('\n');
        }
        if let (Some(first), Some(last)) = (series.rows.first(), series.rows.last()) {
            svg.push_str(&format!(
                r#"<text x="{MARGIN}" y="{:.0}" font-family="sans-serif" font-size="12">{}</text>"#,
                HEIGHT - 12.0,
                first.date
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.0}" y="{:.0}" font-family="sans-serif" font-size="12" text-anchor="end">{}</text>"#,
                WIDTH - MARGIN,
                HEIGHT - 12.0,
                last.date
            ));
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn ensure_dir(dir: &Path) -> Result<(), DomainError> {
    fs::create_dir_all(dir)
        .map_err(|e| DomainError::Plot(format!("Cannot create {}: {e}", dir.display())))
}

impl SentimentPlotter for SvgSentimentPlotter {
    fn create_sentiment_plot(
        &self,
        series: &SentimentSeries,
        commodity: &Commodity,
    ) -> Result<(), DomainError> {
        ensure_dir(&self.dir)?;
        let path = self.plot_path(commodity);
        fs::write(&path, Self::render(series))
            .map_err(|e| DomainError::Plot(format!("Cannot write {}: {e}", path.display())))?;
        debug!(%commodity, path = %path.display(), "Sentiment plot written");
        Ok(())
    }
}
