//! SVG bar chart of term frequencies.

use crate::types::FrequencyEntry;

/// Total chart height in pixels.
const HEIGHT: usize = 600;

/// Minimum chart width in pixels.
const MIN_WIDTH: usize = 700;

/// Horizontal space reserved per bar.
const SLOT_WIDTH: usize = 36;

/// Fraction of a slot the bar fills.
const BAR_FILL: f64 = 0.7;

const MARGIN_LEFT: usize = 80;
const MARGIN_RIGHT: usize = 30;
const MARGIN_TOP: usize = 70;
const MARGIN_BOTTOM: usize = 150;

/// Target number of y-axis gridlines.
const Y_TICKS: usize = 5;

/// Bar chart of term frequencies for one collection.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    title: String,
    color: &'a str,
    entries: &'a [FrequencyEntry],
}

impl<'a> BarChart<'a> {
    /// Create a chart titled `title` drawing `entries` in `color`.
    #[must_use]
    pub fn new(title: impl Into<String>, color: &'a str, entries: &'a [FrequencyEntry]) -> Self {
        Self {
            title: title.into(),
            color,
            entries,
        }
    }

    /// Chart width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        (MARGIN_LEFT + MARGIN_RIGHT + SLOT_WIDTH * self.entries.len()).max(MIN_WIDTH)
    }

    /// Render the chart as a standalone SVG document.
    ///
    /// Terms run along the x-axis, total frequency up the y-axis and every
    /// bar carries its value just above it.
    #[must_use]
    pub fn render(&self) -> String {
        let width = self.width();
        let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_height;

        let max_value = self
            .entries
            .iter()
            .map(|e| e.total_frequency)
            .max()
            .unwrap_or(0);
        let step = tick_step(max_value);
        let axis_max = (max_value.div_ceil(step) * step).max(step);
        let scale = plot_height as f64 / axis_max as f64;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{HEIGHT}\" \
             viewBox=\"0 0 {width} {HEIGHT}\" font-family=\"sans-serif\">\n"
        ));
        svg.push_str(&format!(
            "  <rect width=\"{width}\" height=\"{HEIGHT}\" fill=\"white\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"18\">{}</text>\n",
            MARGIN_LEFT,
            MARGIN_TOP / 2,
            escape_xml(&self.title)
        ));

        // Gridlines and y-axis labels
        let mut value = 0;
        while value <= axis_max {
            let y = baseline as f64 - value as f64 * scale;
            svg.push_str(&format!(
                "  <line x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{}\" y2=\"{y:.1}\" stroke=\"#e5ecf6\"/>\n",
                MARGIN_LEFT + plot_width
            ));
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"end\">{value}</text>\n",
                MARGIN_LEFT - 8,
                y + 4.0
            ));
            value += step;
        }

        // Axes
        svg.push_str(&format!(
            "  <line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{baseline}\" stroke=\"#444\"/>\n"
        ));
        svg.push_str(&format!(
            "  <line x1=\"{MARGIN_LEFT}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" stroke=\"#444\"/>\n",
            MARGIN_LEFT + plot_width
        ));

        if self.entries.is_empty() {
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" font-size=\"14\" text-anchor=\"middle\" fill=\"#888\">No terms found</text>\n",
                MARGIN_LEFT + plot_width / 2,
                MARGIN_TOP + plot_height / 2
            ));
        }

        let slot = plot_width as f64 / self.entries.len().max(1) as f64;
        let bar_width = slot * BAR_FILL;
        for (i, entry) in self.entries.iter().enumerate() {
            let center = MARGIN_LEFT as f64 + slot * (i as f64 + 0.5);
            let bar_height = entry.total_frequency as f64 * scale;
            let top = baseline as f64 - bar_height;
            let term = escape_xml(&entry.term);

            svg.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{top:.1}\" width=\"{bar_width:.1}\" height=\"{bar_height:.1}\" fill=\"{}\"><title>{term}: {}</title></rect>\n",
                center - bar_width / 2.0,
                self.color,
                entry.total_frequency
            ));
            svg.push_str(&format!(
                "  <text x=\"{center:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
                top - 4.0,
                entry.total_frequency
            ));
            svg.push_str(&format!(
                "  <text transform=\"translate({center:.1},{}) rotate(-45)\" font-size=\"12\" text-anchor=\"end\">{term}</text>\n",
                baseline + 14
            ));
        }

        // Axis titles
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" text-anchor=\"middle\">Term</text>\n",
            MARGIN_LEFT + plot_width / 2,
            HEIGHT - 12
        ));
        svg.push_str(&format!(
            "  <text transform=\"translate(20,{}) rotate(-90)\" font-size=\"14\" text-anchor=\"middle\">Total_Frequency</text>\n",
            MARGIN_TOP + plot_height / 2
        ));

        svg.push_str("</svg>\n");
        svg
    }
}

/// Gridline spacing: 1, 2 or 5 times a power of ten, never below 1.
///
/// # Examples
/// ```
/// use findingaid_scanner::report::tick_step;
///
/// assert_eq!(tick_step(3), 1);
/// assert_eq!(tick_step(42), 10);
/// assert_eq!(tick_step(180), 50);
/// ```
#[must_use]
pub fn tick_step(max_value: usize) -> usize {
    if max_value <= Y_TICKS {
        return 1;
    }
    let raw = max_value as f64 / Y_TICKS as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    ((nice * magnitude).round() as usize).max(1)
}

/// Escape text for use in SVG element content and attributes.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
