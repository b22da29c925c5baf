use std::{cell::OnceCell, iter::once};

use itertools::{Either, Itertools};

use crate::{command::Command, coordinates::Point, error::{PlotterError, Result}};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation { Forward, Reversed }

/// One continuous drawn path.
///
/// Typical commands look like this:
///
/// ```text
/// G1 F100.000 X250.066 Y-439.295  <- start (travel move, pen up)
/// G0 F500.000 Z160.000            <- pen down
/// G0 F60.000 X250.409 Y-439.954   <- drawn moves ...
/// G0 X248.001 Y-441.921
/// G0 X245.314 Y-443.391           <- end
/// G0 F500.000 Z90.000             <- pen up
/// ```
#[derive(Debug, Clone)]
pub struct Stroke {
    commands: Vec<Command>,
    start: Point,
    end: Point,
    // Rewritten (start, end) boundary commands of the reversed traversal.
    reversed_boundary: OnceCell<(Command, Command)>,
}

fn malformed(commands: &[Command]) -> PlotterError {
    PlotterError::MalformedStroke {
        lines: commands.iter().map(|command| command.text().to_string()).collect(),
    }
}
fn coordinate_fields(command: &Command, point: Point) -> (String, String) {
    (
        command.field('X').map_or_else(|| point.x.to_string(), str::to_string),
        command.field('Y').map_or_else(|| point.y.to_string(), str::to_string),
    )
}
fn with_coordinate(command: &Command, (x, y): &(String, String)) -> Command {
    let mut command = command.clone();
    command.rewrite(|line| {
        line.set('X', x);
        line.set('Y', y);
    });
    command
}

impl Stroke {
    pub fn new(commands: Vec<Command>) -> Result<Stroke> {
        if commands.len() < 2 {
            return Err(malformed(&commands));
        }
        let start = commands[0].coordinate();
        let end = commands[commands.len() - 2].coordinate();
        match (start, end) {
            (Some(start), Some(end)) => Ok(Stroke {
                commands,
                start,
                end,
                reversed_boundary: OnceCell::new(),
            }),
            _ => Err(malformed(&commands)),
        }
    }
    pub fn len(&self) -> usize {
        self.commands.len()
    }
    pub fn start(&self, orientation: Orientation) -> Point {
        match orientation {
            Orientation::Forward => self.start,
            Orientation::Reversed => self.end,
        }
    }
    pub fn end(&self, orientation: Orientation) -> Point {
        match orientation {
            Orientation::Forward => self.end,
            Orientation::Reversed => self.start,
        }
    }
    /// The text every deduplication decision is based on; forward orientation only.
    pub fn fingerprint(&self) -> String {
        self.commands.iter().map(Command::text).join("\n")
    }
    fn reversed_boundary(&self) -> &(Command, Command) {
        self.reversed_boundary.get_or_init(|| {
            let first = &self.commands[0];
            let last_move = &self.commands[self.commands.len() - 2];
            let start_fields = coordinate_fields(first, self.start);
            let end_fields = coordinate_fields(last_move, self.end);
            (
                with_coordinate(first, &end_fields),
                with_coordinate(last_move, &start_fields),
            )
        })
    }
    /// Commands in traversal order for the given orientation.
    ///
    /// Reversed, the start line keeps its own fields but moves to the old end
    /// point, the drawn moves run backwards, and the last drawn move returns to
    /// the old start point. The forward commands are never modified.
    pub fn commands(&self, orientation: Orientation) -> impl Iterator<Item = &Command> + '_ {
        let count = self.commands.len();
        if orientation == Orientation::Forward || count == 2 {
            return Either::Left(self.commands.iter());
        }
        let (new_start, new_end) = self.reversed_boundary();
        let middle = &self.commands[1..count - 2];
        Either::Right(
            once(new_start)
                .chain(middle.first())
                .chain(middle.iter().skip(1).rev())
                .chain(once(new_end))
                .chain(once(&self.commands[count - 1]))
        )
    }
}

#[cfg(test)]
pub mod test {
    use crate::config::PlotterConfiguration;

    use super::*;

    pub fn stroke_from(lines: &str) -> Stroke {
        let config = PlotterConfiguration::standard();
        Stroke::new(
            lines.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| Command::classify(&config, line)).collect()
        ).unwrap()
    }
    /// A straight stroke from `from` to `to` with one intermediate point.
    pub fn segment(from: (f64, f64), to: (f64, f64)) -> Stroke {
        let middle = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        stroke_from(&format!(
            "G1 F100.000 X{:.3} Y{:.3}\nG0 F500.000 Z160.000\nG0 F60.000 X{:.3} Y{:.3}\nG0 X{:.3} Y{:.3}\nG0 F500.000 Z90.000",
            from.0, from.1, middle.0, middle.1, to.0, to.1
        ))
    }
    fn texts<'a>(commands: impl Iterator<Item = &'a Command>) -> Vec<String> {
        commands.map(|command| command.text().to_string()).collect()
    }

    const EXAMPLE: &str = r"
        G1 F100.000 X0.000 Y0.000
        G0 F500.000 Z160.000
        G0 F60.000 X1.000 Y0.000
        G0 X2.000 Y0.000
        G0 F500.000 Z90.000
    ";

    #[test]
    fn test_endpoints() {
        let stroke = stroke_from(EXAMPLE);
        assert_eq!(stroke.start(Orientation::Forward), Point::new(0.0, 0.0));
        assert_eq!(stroke.end(Orientation::Forward), Point::new(2.0, 0.0));
        assert_eq!(stroke.start(Orientation::Reversed), Point::new(2.0, 0.0));
        assert_eq!(stroke.end(Orientation::Reversed), Point::new(0.0, 0.0));
    }
    #[test]
    fn test_reversed_commands() {
        let stroke = stroke_from(EXAMPLE);
        assert_eq!(texts(stroke.commands(Orientation::Reversed)), vec![
            "G1 F100.000 X2.000 Y0.000",
            "G0 F500.000 Z160.000",
            "G0 F60.000 X1.000 Y0.000",
            "G0 X0.000 Y0.000",
            "G0 F500.000 Z90.000",
        ]);
    }
    #[test]
    fn test_reversal_leaves_forward_untouched() {
        let stroke = stroke_from(EXAMPLE);
        let forward_before = texts(stroke.commands(Orientation::Forward));
        let reversed = texts(stroke.commands(Orientation::Reversed));
        assert_eq!(texts(stroke.commands(Orientation::Forward)), forward_before);
        // Interleaved use keeps returning the same views.
        assert_eq!(texts(stroke.commands(Orientation::Reversed)), reversed);
        assert_eq!(forward_before[0], "G1 F100.000 X0.000 Y0.000");
    }
    #[test]
    fn test_longer_stroke_reverses_moves() {
        let stroke = stroke_from(r"
            G1 F100.000 X250.066 Y-439.295
            G0 F500.000 Z160.000
            G0 F60.000 X250.409 Y-439.954
            G0 X248.001 Y-441.921
            G0 X245.314 Y-443.391
            G0 F500.000 Z90.000
        ");
        assert_eq!(texts(stroke.commands(Orientation::Reversed)), vec![
            "G1 F100.000 X245.314 Y-443.391",
            "G0 F500.000 Z160.000",
            "G0 X248.001 Y-441.921",
            "G0 F60.000 X250.409 Y-439.954",
            "G0 X250.066 Y-439.295",
            "G0 F500.000 Z90.000",
        ]);
    }
    #[test]
    fn test_two_command_stroke() {
        let stroke = stroke_from("G1 X1.000 Y1.000\nG0 F500.000 Z90.000");
        assert_eq!(stroke.start(Orientation::Forward), stroke.end(Orientation::Forward));
        assert_eq!(
            texts(stroke.commands(Orientation::Reversed)),
            texts(stroke.commands(Orientation::Forward))
        );
    }
    #[test]
    fn test_malformed() {
        let config = PlotterConfiguration::standard();
        let commands = vec![Command::classify(&config, "G0 F500.000 Z90.000")];
        assert_eq!(
            Stroke::new(commands).unwrap_err(),
            PlotterError::MalformedStroke { lines: vec!["G0 F500.000 Z90.000".into()] }
        );
        let commands = ["G1 X1.000 Y1.000", "G0 F500.000 Z160.000", "G0 F500.000 Z90.000"]
            .iter()
            .map(|line| Command::classify(&config, line))
            .collect();
        assert!(matches!(Stroke::new(commands), Err(PlotterError::MalformedStroke { .. })));
    }
    #[test]
    fn test_fingerprint() {
        let stroke = stroke_from("G1 X1.000 Y1.000\nG0 F500.000 Z90.000");
        assert_eq!(stroke.fingerprint(), "G1 X1.000 Y1.000\nG0 F500.000 Z90.000");
    }
}
