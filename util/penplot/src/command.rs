use crate::{config::PlotterConfiguration, coordinates::Point, error::{PlotterError, Result}, parse::{parse_line, GcodeLine}};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind { PenDown, PenUp, Move, Other }

/// One line of the program together with what it means to the plotter.
///
/// The text is authoritative: a command that is never rewritten is written
/// back exactly as it was read. A rewritten command is regenerated from its
/// words, so its spacing is normalized to single spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    text: String,
    line: Option<GcodeLine>,
    code: String,
    kind: CommandKind,
    coordinate: Option<Point>,
}

fn first_token(text: &str) -> String {
    text.split_whitespace().next().unwrap_or("").to_string()
}
fn coordinate_of(line: Option<&GcodeLine>) -> Option<Point> {
    let line = line?;
    Some(Point::new(line.get_f64('X')?, line.get_f64('Y')?))
}

impl Command {
    pub fn classify(config: &PlotterConfiguration, input: &str) -> Command {
        let text = input.trim_end().to_string();
        let line = parse_line(&text);
        let code = first_token(&text);
        let kind = if text == config.pen_down {
            CommandKind::PenDown
        } else if text == config.pen_up {
            CommandKind::PenUp
        } else if config.is_move_code(&code) {
            CommandKind::Move
        } else {
            CommandKind::Other
        };
        let coordinate = coordinate_of(line.as_ref());
        Command { text, line, code, kind, coordinate }
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn kind(&self) -> CommandKind {
        self.kind
    }
    pub fn coordinate(&self) -> Option<Point> {
        self.coordinate
    }
    pub fn require_coordinate(&self) -> Result<Point> {
        self.coordinate.ok_or_else(|| PlotterError::CoordinateMissing { line: self.text.clone() })
    }
    pub fn has_field(&self, head: char) -> bool {
        self.line.as_ref().map_or(false, |line| line.has(head))
    }
    pub fn field(&self, head: char) -> Option<&str> {
        self.line.as_ref().and_then(|line| line.get(head))
    }
    /// Applies an edit to the structured line and regenerates the text, code and
    /// coordinate from it. The kind is kept: edits never turn a move into a pen
    /// transition or the other way round. Lines that are not made of words are
    /// left alone.
    pub fn rewrite(&mut self, edit: impl FnOnce(&mut GcodeLine)) {
        if let Some(line) = self.line.as_mut() {
            edit(line);
            self.text = line.to_string();
            self.code = first_token(&self.text);
            self.coordinate = coordinate_of(Some(line));
        }
    }
}
