//! Line-oriented command scripts for driving a [`CanvasEngine`] headlessly.
//!
//! One command per line; blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! tool rectangle
//! color #e94560
//! down 10 10
//! move 120 80
//! up
//! key Ctrl+Z
//! ```
//!
//! Page numbers in `goto` and palette slots in `palette` are 1-based.
//! `mode` and `curtain` without an argument toggle.

use crate::config::KeyBinding;
use crate::draw::{BackgroundPattern, Color, Point};
use crate::input::{CanvasEngine, CurtainMode, EngineError, InteractionMode, PageDirection, Tool};
use crate::util;
use thiserror::Error;

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// A single engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    Color(Color),
    /// 0-based palette index
    Palette(usize),
    Thickness(f64),
    Scroll(f64),
    Down(Point),
    Move(Point),
    Up,
    Cancel,
    Undo,
    Redo,
    Clear,
    NewPage,
    PreviousPage,
    NextPage,
    /// 0-based page index
    GoTo(usize),
    RemovePage,
    Background(BackgroundPattern),
    Image {
        source: String,
        position: Point,
        width: f64,
        height: f64,
    },
    /// `None` toggles
    Mode(Option<InteractionMode>),
    /// `None` cycles
    Curtain(Option<CurtainMode>),
    /// Surface width and height in pixels
    Surface(u32, u32),
    Key(KeyBinding),
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

/// Outcome counts for a replayed script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub executed: usize,
    /// Commands that hit an expected boundary (empty history, page bounds, ...)
    pub noops: usize,
    /// Commands rejected with a real error, formatted with their line
    pub rejected: Vec<String>,
}

/// Parses a whole script, stopping at the first malformed line.
pub fn parse(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let command = parse_command(text).map_err(|message| ScriptError { line, message })?;
        commands.push(ScriptLine { line, command });
    }
    Ok(commands)
}

fn parse_command(text: &str) -> Result<Command, String> {
    let mut words = text.split_whitespace();
    let name = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let expect_args = |count: usize| {
        if args.len() == count {
            Ok(())
        } else {
            Err(format!(
                "'{name}' takes {count} argument(s), got {}",
                args.len()
            ))
        }
    };

    let command = match name.as_str() {
        "tool" => {
            expect_args(1)?;
            Command::Tool(args[0].parse()?)
        }
        "color" | "colour" => {
            expect_args(1)?;
            let color =
                util::parse_color(args[0]).ok_or_else(|| format!("unknown color '{}'", args[0]))?;
            Command::Color(color)
        }
        "palette" => {
            expect_args(1)?;
            Command::Palette(one_based(args[0])?)
        }
        "thickness" | "width" => {
            expect_args(1)?;
            Command::Thickness(number(args[0])?)
        }
        "scroll" => {
            expect_args(1)?;
            Command::Scroll(number(args[0])?)
        }
        "down" => {
            expect_args(2)?;
            Command::Down(point(args[0], args[1])?)
        }
        "move" => {
            expect_args(2)?;
            Command::Move(point(args[0], args[1])?)
        }
        "up" => {
            expect_args(0)?;
            Command::Up
        }
        "cancel" => {
            expect_args(0)?;
            Command::Cancel
        }
        "undo" => {
            expect_args(0)?;
            Command::Undo
        }
        "redo" => {
            expect_args(0)?;
            Command::Redo
        }
        "clear" => {
            expect_args(0)?;
            Command::Clear
        }
        "new-page" => {
            expect_args(0)?;
            Command::NewPage
        }
        "prev" | "previous" => {
            expect_args(0)?;
            Command::PreviousPage
        }
        "next" => {
            expect_args(0)?;
            Command::NextPage
        }
        "goto" => {
            expect_args(1)?;
            Command::GoTo(one_based(args[0])?)
        }
        "remove-page" => {
            expect_args(0)?;
            Command::RemovePage
        }
        "background" => {
            expect_args(1)?;
            Command::Background(args[0].parse()?)
        }
        "image" => {
            expect_args(5)?;
            Command::Image {
                source: args[0].to_string(),
                position: point(args[1], args[2])?,
                width: number(args[3])?,
                height: number(args[4])?,
            }
        }
        "mode" => match args.as_slice() {
            [] => Command::Mode(None),
            ["draw"] => Command::Mode(Some(InteractionMode::Draw)),
            ["pass-through" | "passthrough" | "desktop"] => {
                Command::Mode(Some(InteractionMode::PassThrough))
            }
            _ => return Err(format!("unknown mode '{}'", args.join(" "))),
        },
        "curtain" => match args.as_slice() {
            [] => Command::Curtain(None),
            [mode] => Command::Curtain(Some(mode.parse()?)),
            _ => return Err(format!("'{name}' takes at most 1 argument")),
        },
        "surface" => {
            expect_args(2)?;
            Command::Surface(dimension(args[0])?, dimension(args[1])?)
        }
        "key" => {
            expect_args(1)?;
            Command::Key(KeyBinding::parse(args[0])?)
        }
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

fn number(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("'{text}' is not a number"))
}

fn point(x: &str, y: &str) -> Result<Point, String> {
    Ok(Point::new(number(x)?, number(y)?))
}

fn dimension(text: &str) -> Result<u32, String> {
    text.parse::<u32>()
        .map_err(|_| format!("'{text}' is not a pixel size"))
}

fn one_based(text: &str) -> Result<usize, String> {
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{text}' is not a positive integer")),
    }
}

/// Runs one command against the engine.
pub fn execute(engine: &mut CanvasEngine, command: &Command) -> Result<(), EngineError> {
    match command {
        Command::Tool(tool) => engine.select_tool(*tool),
        Command::Color(color) => engine.set_color(*color),
        Command::Palette(index) => return engine.select_palette(*index).map(drop),
        Command::Thickness(thickness) => return engine.set_thickness(*thickness).map(drop),
        Command::Scroll(delta) => engine.on_scroll(*delta),
        Command::Down(point) => return engine.pointer_down(*point),
        Command::Move(point) => return engine.pointer_move(*point),
        Command::Up => return engine.pointer_up().map(drop),
        Command::Cancel => return engine.cancel(),
        Command::Undo => return engine.undo(),
        Command::Redo => return engine.redo(),
        Command::Clear => return engine.clear_active_page(),
        Command::NewPage => {
            engine.new_page();
        }
        Command::PreviousPage => return engine.switch_page(PageDirection::Previous),
        Command::NextPage => return engine.switch_page(PageDirection::Next),
        Command::GoTo(index) => return engine.go_to_page(*index),
        Command::RemovePage => return engine.remove_active_page(),
        Command::Background(pattern) => return engine.set_background(*pattern),
        Command::Image {
            source,
            position,
            width,
            height,
        } => {
            return engine
                .insert_image(source.as_str(), *position, *width, *height)
                .map(drop);
        }
        Command::Mode(None) => {
            engine.toggle_mode();
        }
        Command::Mode(Some(mode)) => return engine.set_mode(*mode),
        Command::Curtain(None) => {
            engine.toggle_curtain();
        }
        Command::Curtain(Some(mode)) => return engine.set_curtain_mode(*mode),
        Command::Surface(width, height) => engine.set_surface_size(*width, *height),
        Command::Key(binding) => engine.press_chord(binding),
    }
    Ok(())
}

/// Replays parsed commands in order, tallying outcomes.
pub fn replay(engine: &mut CanvasEngine, script: &[ScriptLine]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for ScriptLine { line, command } in script {
        match execute(engine, command) {
            Ok(()) => report.executed += 1,
            Err(err) if err.is_noop() => {
                log::debug!("line {line}: {err}");
                report.noops += 1;
            }
            Err(err) => {
                log::warn!("line {line}: {err}");
                report.rejected.push(format!("line {line}: {err}"));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_skips_comments() {
        let script = parse(
            "# warm-up\n\
             tool rect\n\
             color #ff0000\n\
             \n\
             down 1 2\n\
             key Ctrl+Shift+Z\n\
             goto 2\n",
        )
        .unwrap();

        let commands: Vec<_> = script.iter().map(|line| &line.command).collect();
        assert_eq!(commands[0], &Command::Tool(Tool::Rectangle));
        assert_eq!(commands[1], &Command::Color(crate::draw::RED));
        assert_eq!(commands[2], &Command::Down(Point::new(1.0, 2.0)));
        assert!(matches!(commands[3], Command::Key(binding) if binding.ctrl && binding.shift));
        assert_eq!(commands[4], &Command::GoTo(1));
        assert_eq!(script[2].line, 5);
    }

    #[test]
    fn reports_line_of_first_error() {
        let err = parse("undo\nmove 1\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("takes 2 argument"));

        let err = parse("goto 0").unwrap_err();
        assert!(err.message.contains("positive integer"));

        assert!(parse("paint").unwrap_err().message.contains("unknown command"));
        assert!(parse("background plaid").is_err());
    }

    #[test]
    fn replay_tallies_noops_and_rejections() {
        let script = parse(
            "undo\n\
             down 0 0\n\
             move 10 10\n\
             move nan 3\n\
             up\n\
             next\n\
             image a.png 0 0 -5 5\n",
        )
        .unwrap();

        let mut engine = CanvasEngine::default();
        let report = replay(&mut engine, &script);

        assert_eq!(report.executed, 3);
        assert_eq!(report.noops, 2);
        assert_eq!(report.rejected.len(), 2);
        assert!(report.rejected[0].starts_with("line 4"));
        assert_eq!(engine.active_page().len(), 1);
    }

    #[test]
    fn mode_without_argument_toggles() {
        let mut engine = CanvasEngine::default();
        execute(&mut engine, &Command::Mode(None)).unwrap();
        assert_eq!(engine.mode(), InteractionMode::PassThrough);
        assert!(execute(&mut engine, &Command::Down(Point::new(0.0, 0.0))).unwrap_err().is_noop());
    }

    #[test]
    fn curtain_commands_drive_the_curtain() {
        let script = parse(
            "surface 600 300\n\
             curtain\n\
             down 300 100\n\
             move 300 250\n\
             up\n\
             curtain spotlight\n\
             scroll 120\n\
             curtain spotlight\n",
        )
        .unwrap();
        assert_eq!(script[1].command, Command::Curtain(None));
        assert!(parse("curtain half").is_err());
        assert!(parse("surface 10 -4").is_err());

        let mut engine = CanvasEngine::default();
        let report = replay(&mut engine, &script);

        assert_eq!(report.executed, 6);
        assert_eq!(report.noops, 2);
        assert_eq!(engine.curtain().mode(), CurtainMode::Spotlight);
        assert_eq!(engine.curtain().reveal().bottom, 250.0);
        assert_eq!(engine.curtain().spotlight_radius(), 144.0);
        assert!(engine.active_page().is_empty());
    }
}
