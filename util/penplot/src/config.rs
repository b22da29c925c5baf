use serde::{Deserialize, Serialize};

/// Describes the plotter dialect being post-processed.
///
/// Pen transitions are recognized by exact comparison against the marker lines;
/// every other line is classified by its command code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfiguration {
    pub pen_down: String,
    pub pen_up: String,
    /// Feed rate injected on the first drawn move of each stroke. Stored as a
    /// number and written with `precision` decimals (`60.0` becomes `F60.000`),
    /// so the exact text of the token follows from both fields.
    pub feedrate: f64,
    /// Lifts travelling at most this far (mm) are removed.
    pub min_penup_travel: f64,
    /// Code of moves made with the pen lifted.
    pub travel_code: String,
    /// Code of moves made with the pen down.
    pub draw_code: String,
    /// Number of decimals used when rendering injected values.
    pub precision: u8,
}
impl PlotterConfiguration {
    pub fn standard() -> Self {
        Self {
            pen_down: "G0 F500.000 Z160.000".into(),
            pen_up: "G0 F500.000 Z90.000".into(),
            feedrate: 60.0,
            min_penup_travel: 1.0,
            travel_code: "G1".into(),
            draw_code: "G0".into(),
            precision: 3,
        }
    }
    pub fn is_move_code(&self, code: &str) -> bool {
        code == self.travel_code || code == self.draw_code
    }
    /// The feed rate value as it is written after the `F` letter.
    pub fn feedrate_value(&self) -> String {
        format!("{:.*}", self.precision as usize, self.feedrate)
    }
}
impl Default for PlotterConfiguration {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_feedrate_value() {
        assert_eq!(PlotterConfiguration::standard().feedrate_value(), "60.000");
        let config = PlotterConfiguration { precision: 0, ..PlotterConfiguration::standard() };
        assert_eq!(config.feedrate_value(), "60");
    }
    #[test]
    fn test_partial_json() {
        let config: PlotterConfiguration = serde_json::from_str(r#"{"min_penup_travel": 2.5, "draw_code": "G01"}"#).unwrap();
        assert_eq!(config.min_penup_travel, 2.5);
        assert_eq!(config.draw_code, "G01");
        assert_eq!(config.pen_up, "G0 F500.000 Z90.000");
        assert!(config.is_move_code("G1"));
        assert!(!config.is_move_code("G0"));
    }
}
