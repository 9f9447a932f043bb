//! Similarity chart rendering to PNG.

use crate::{Error, Result, config::ChartConfig};
use image::{ImageFormat, RgbImage};
use plotters::{prelude::*, style::register_font};
use serde::{Deserialize, Serialize};
use std::{fmt, io::Cursor, str::FromStr, sync::OnceLock};
use tracing::debug;

/// DejaVu Sans, registered as the `sans-serif` family for chart text.
static CHART_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static FONT_REGISTRATION: OnceLock<std::result::Result<(), String>> = OnceLock::new();

pub const CHART_TITLE: &str = "Similarity between Original and Summarized Text";
const X_AXIS_LABEL: &str = "Text";
const Y_AXIS_LABEL: &str = "Similarity Score";
const Y_MAX: f64 = 1.2;

const ORANGE: RGBColor = RGBColor(255, 127, 14);
const BAR_COLORS: [RGBColor; 2] = [BLUE, ORANGE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    Bar,
    Scatter,
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "scatter" => Ok(Self::Scatter),
            other => Err(Error::invalid_input(format!(
                "Unsupported plot type: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => write!(f, "bar"),
            Self::Scatter => write!(f, "scatter"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}

impl ChartRenderer {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// Renders one category per label and returns the chart as PNG bytes.
    pub fn render(&self, labels: &[&str], scores: &[f64], kind: PlotKind) -> Result<Vec<u8>> {
        if labels.len() != scores.len() {
            return Err(Error::chart(format!(
                "{} labels for {} scores",
                labels.len(),
                scores.len()
            )));
        }
        if labels.is_empty() {
            return Err(Error::chart("nothing to plot"));
        }
        register_chart_font()?;

        let mut pixels = vec![0u8; self.width as usize * self.height as usize * 3];
        self.draw(&mut pixels, labels, scores, kind)
            .map_err(|e| Error::chart(e.to_string()))?;

        let image = RgbImage::from_raw(self.width, self.height, pixels)
            .ok_or_else(|| Error::chart("pixel buffer does not match chart size"))?;
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;

        debug!(
            "Rendered {} chart ({}x{}, {} bytes)",
            kind,
            self.width,
            self.height,
            png.get_ref().len()
        );
        Ok(png.into_inner())
    }

    fn draw(
        &self,
        pixels: &mut [u8],
        labels: &[&str],
        scores: &[f64],
        kind: PlotKind,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::with_buffer(pixels, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, (FontFamily::SansSerif, 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..labels.len()).into_segmented(), 0f64..Y_MAX)?;

        let label_of = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(i) => labels.get(*i).map(|l| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .x_label_formatter(&label_of)
            .draw()?;

        match kind {
            PlotKind::Bar => {
                chart.draw_series(scores.iter().enumerate().map(|(i, &score)| {
                    let color = BAR_COLORS[i % BAR_COLORS.len()];
                    let mut bar = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), score)],
                        color.filled(),
                    );
                    bar.set_margin(0, 0, 20, 20);
                    bar
                }))?;
            }
            PlotKind::Scatter => {
                chart.draw_series(scores.iter().enumerate().map(|(i, &score)| {
                    Circle::new((SegmentValue::CenterOf(i), score), 6, RED.filled())
                }))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

/// Makes the bundled font available to plotters. Runs once per process.
pub fn register_chart_font() -> Result<()> {
    FONT_REGISTRATION
        .get_or_init(|| {
            register_font(FontFamily::SansSerif.as_str(), FontStyle::Normal, CHART_FONT)
                .map_err(|_| "bundled chart font could not be parsed".to_string())
        })
        .clone()
        .map_err(Error::chart)
}
