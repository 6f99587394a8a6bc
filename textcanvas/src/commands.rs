use anyhow::bail;
use textcanvas_rs::Field;

pub const HELP: &str = "\
Commands:
  text <value>        set the text to draw (at most 50 characters)
  font <value>        set the font family (see `fonts`)
  color <value>       set the hex color, without '#' (e.g. ff0000 or f00)
  x <value>           set the horizontal position in pixels
  y <value>           set the vertical position of the baseline in pixels
  size <value>        set the font size in pixels (alias: fontSize)
  submit              draw the text onto the canvas
  download            save the canvas as image.png
  show                print the current values and errors
  fonts               list the available fonts
  help                print this message
  quit                leave (alias: exit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Submit,
    Download,
    Show,
    Fonts,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// Field values are taken verbatim after the first whitespace, so
/// `font Times New Roman` sets a three-word family.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return Ok(None);
    }

    let (keyword, value) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, value)) => (keyword, Some(value)),
        None => (trimmed, None),
    };

    let field = match keyword {
        "size" => Ok(Field::FontSize),
        other => other.parse::<Field>(),
    };
    if let Ok(field) = field {
        return Ok(Some(Command::Set(field, value.unwrap_or("").to_string())));
    }

    let command = match keyword {
        "submit" => Command::Submit,
        "download" => Command::Download,
        "show" => Command::Show,
        "fonts" => Command::Fonts,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command: {}. Type `help` for a list of commands.", other),
    };
    if value.is_some_and(|v| !v.trim().is_empty()) {
        bail!("`{}` takes no arguments", keyword);
    }
    Ok(Some(command))
}
