use std::fmt;
use std::str::FromStr;

/// Native key representation for the editing session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
    Null,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "C-{}", c),
            Key::Esc => write!(f, "ESC"),
            Key::Enter => write!(f, "RET"),
            Key::Backspace => write!(f, "BS"),
            Key::Tab => write!(f, "TAB"),
            Key::Delete => write!(f, "DEL"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Null => write!(f, "NUL"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Ctrl notation: ^X or C-x
        let ctrl = s
            .strip_prefix('^')
            .or_else(|| s.strip_prefix("C-"))
            .filter(|rest| rest.chars().count() == 1);
        if let Some(rest) = ctrl {
            if let Some(c) = rest.chars().next() {
                return Ok(Key::Ctrl(c.to_ascii_lowercase()));
            }
        }

        match s {
            "ESC" | "Esc" | "Escape" => Ok(Key::Esc),
            "RET" | "Enter" | "Return" => Ok(Key::Enter),
            "BS" | "Backspace" => Ok(Key::Backspace),
            "TAB" | "Tab" => Ok(Key::Tab),
            "DEL" | "Delete" => Ok(Key::Delete),
            "Home" => Ok(Key::Home),
            "End" => Ok(Key::End),
            "Up" => Ok(Key::Up),
            "Down" => Ok(Key::Down),
            "Left" => Ok(Key::Left),
            "Right" => Ok(Key::Right),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Key::Char(c)),
                    _ => Err(format!("Unknown key: {}", s)),
                }
            }
        }
    }
}
