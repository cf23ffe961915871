//! Text banner for full-screen style messages
//!
//! Message arguments may carry the literal two characters `\n`, which are
//! turned into real line breaks before layout.

/// Title line shown above the message
pub const DEFAULT_TITLE: &str = "Space Montage Pro";

/// Default banner width in columns
pub const DEFAULT_WIDTH: usize = 80;

/// Replace every literal `\n` (backslash, n) with a line break
pub fn expand_line_breaks(arg: &str) -> String {
    arg.replace("\\n", "\n")
}

pub struct Banner {
    pub title: String,
    pub lines: Vec<String>,
}

impl Banner {
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            title: DEFAULT_TITLE.to_string(),
            lines: args
                .into_iter()
                .map(|arg| expand_line_breaks(arg.as_ref()))
                .collect(),
        }
    }

    /// Lay out the banner centered within `width` columns.
    ///
    /// Blank spacer rows surround the title and the message block.
    pub fn render(&self, width: usize) -> String {
        let mut rows = vec![String::new(), center(&self.title, width), String::new()];
        for line in &self.lines {
            rows.extend(line.split('\n').map(|row| center(row, width)));
        }
        rows.push(String::new());
        rows.join("\n")
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}
