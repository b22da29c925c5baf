use std::mem::take;

use tracing::warn;

use crate::{command::{Command, CommandKind}, error::{PlotterError, Result}, stroke::Stroke};

/// A program split into the strokes that can be reordered and the commands
/// around them that stay in place.
#[derive(Debug, Clone)]
pub struct Document {
    pub preamble: Vec<Command>,
    pub strokes: Vec<Stroke>,
    pub postamble: Vec<Command>,
}

fn is_travel(command: &Command) -> bool {
    matches!(command.kind(), CommandKind::Move | CommandKind::PenUp)
}

/// Groups a classified program into strokes.
///
/// A stroke opens at the last positioned move before a pen-down and closes at
/// the next pen-up. Travel between strokes is dropped since the strokes get
/// reordered anyway; other commands found there are moved to the preamble.
pub fn group_strokes(commands: impl IntoIterator<Item = Command>) -> Result<Document> {
    let mut preamble = Vec::new();
    let mut strokes = Vec::new();
    let mut pending: Vec<Command> = Vec::new();
    let mut open: Option<Vec<Command>> = None;

    for command in commands {
        if let Some(stroke) = open.as_mut() {
            let closes = command.kind() == CommandKind::PenUp;
            stroke.push(command);
            if closes {
                strokes.push(Stroke::new(take(stroke))?);
                open = None;
            }
            continue;
        }
        if command.kind() != CommandKind::PenDown {
            pending.push(command);
            continue;
        }
        let start_index = pending.iter().rposition(|candidate|
            candidate.kind() == CommandKind::Move && candidate.coordinate().is_some()
        );
        let Some(start_index) = start_index else {
            pending.push(command);
            return Err(PlotterError::MalformedStroke {
                lines: pending.iter().map(|command| command.text().to_string()).collect(),
            });
        };
        let mut leftover = take(&mut pending);
        let start = leftover.remove(start_index);
        if strokes.is_empty() {
            preamble.extend(leftover);
        } else {
            for command in leftover.into_iter().filter(|command| !is_travel(command)) {
                warn!("moving {:?} found between strokes to the preamble", command.text());
                preamble.push(command);
            }
        }
        open = Some(vec![start, command]);
    }
    if let Some(stroke) = open {
        return Err(PlotterError::MalformedStroke {
            lines: stroke.iter().map(|command| command.text().to_string()).collect(),
        });
    }
    if strokes.is_empty() {
        preamble.append(&mut pending);
    }
    Ok(Document { preamble, strokes, postamble: pending })
}

#[cfg(test)]
mod test {
    use crate::{config::PlotterConfiguration, stroke::Orientation, coordinates::Point};

    use super::*;

    fn classify_all(input: &str) -> Vec<Command> {
        let config = PlotterConfiguration::standard();
        input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| Command::classify(&config, line)).collect()
    }

    #[test]
    fn test_group() {
        let document = group_strokes(classify_all(r"
            G21
            G0 F500.000 Z90.000
            G1 F100.000 X0.000 Y0.000
            G0 F500.000 Z160.000
            G0 F60.000 X1.000 Y0.000
            G0 F500.000 Z90.000
            G1 F100.000 X5.000 Y5.000
            M7
            G1 F100.000 X10.000 Y0.000
            G0 F500.000 Z160.000
            G0 F60.000 X12.000 Y0.000
            G0 X14.000 Y0.000
            G0 F500.000 Z90.000
            M2
        ")).unwrap();
        let preamble: Vec<_> = document.preamble.iter().map(Command::text).collect();
        assert_eq!(preamble, vec!["G21", "G0 F500.000 Z90.000", "M7"]);
        assert_eq!(document.strokes.len(), 2);
        assert_eq!(document.strokes[0].len(), 4);
        assert_eq!(document.strokes[1].start(Orientation::Forward), Point::new(10.0, 0.0));
        assert_eq!(document.strokes[1].end(Orientation::Forward), Point::new(14.0, 0.0));
        let postamble: Vec<_> = document.postamble.iter().map(Command::text).collect();
        assert_eq!(postamble, vec!["M2"]);
    }
    #[test]
    fn test_commented_stroke_end() {
        let document = group_strokes(classify_all(r"
            G1 F100.000 X0.000 Y0.000
            G0 F500.000 Z160.000
            G0 F60.000 X1.000 Y0.000 ; end
            G0 F500.000 Z90.000
        ")).unwrap();
        assert_eq!(document.strokes.len(), 1);
        assert_eq!(document.strokes[0].end(Orientation::Forward), Point::new(1.0, 0.0));
    }
    #[test]
    fn test_no_strokes() {
        let document = group_strokes(classify_all("G21\nG90")).unwrap();
        assert_eq!(document.preamble.len(), 2);
        assert!(document.strokes.is_empty());
        assert!(document.postamble.is_empty());
    }
    #[test]
    fn test_pen_down_without_start() {
        let result = group_strokes(classify_all("G21\nG0 F500.000 Z160.000"));
        assert_eq!(result.unwrap_err(), PlotterError::MalformedStroke {
            lines: vec!["G21".into(), "G0 F500.000 Z160.000".into()],
        });
    }
    #[test]
    fn test_unterminated_stroke() {
        let result = group_strokes(classify_all(r"
            G1 F100.000 X0.000 Y0.000
            G0 F500.000 Z160.000
            G0 F60.000 X1.000 Y0.000
        "));
        assert!(matches!(result, Err(PlotterError::MalformedStroke { lines }) if lines.len() == 3));
    }
}
