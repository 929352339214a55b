use crate::constants::{is_key_char, is_padding, is_space};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    End,
    EndSkip,
    Ignore,
    Skip,
}

impl Command {
    /// Tested in this order, so `endskip` wins over `end`.
    const KEYWORDS: [(&'static str, Command); 4] = [
        ("endskip", Command::EndSkip),
        ("ignore", Command::Ignore),
        ("skip", Command::Skip),
        ("end", Command::End),
    ];

    fn from_prefix(text: &str) -> Option<Self> {
        Self::KEYWORDS.iter().find_map(|(keyword, command)| {
            text.get(..keyword.len())
                .filter(|head| head.eq_ignore_ascii_case(keyword))
                .map(|_| *command)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `[name]`
    List,
    /// `{name}`
    Mapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// `.`: resolve under the current list element instead of the root.
    pub nested: bool,
    /// `+`: freeform list.
    pub freeform: bool,
}

/// One classified input line. Slices borrow from the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Command(Command),
    Key {
        key: &'a str,
        rest: &'a str,
    },
    Bullet {
        rest: &'a str,
    },
    Scope {
        bracket: Bracket,
        modifiers: Modifiers,
        name: &'a str,
    },
    Text(&'a str),
}

/// Which structural rules the current parser state allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub skipping: bool,
    pub keys: bool,
    pub bullets: bool,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            skipping: false,
            keys: true,
            bullets: false,
        }
    }
}

pub fn classify(line: &str, gate: Gate) -> Line<'_> {
    let content = line.trim_start_matches(is_space);

    if let Some(command) = parse_command(content) {
        return Line::Command(command);
    }
    if gate.skipping {
        return Line::Text(line);
    }
    if gate.keys {
        if let Some((key, rest)) = parse_key(content) {
            return Line::Key { key, rest };
        }
    }
    if gate.bullets {
        if let Some(rest) = content.strip_prefix('*') {
            return Line::Bullet {
                rest: rest.trim_start_matches(is_padding),
            };
        }
    }
    if let Some(line) = parse_scope(content) {
        return line;
    }
    Line::Text(line)
}

fn parse_command(content: &str) -> Option<Command> {
    let rest = content.strip_prefix(':')?;
    Command::from_prefix(rest.trim_start_matches(is_padding))
}

fn split_name(content: &str) -> (&str, &str) {
    let end = content
        .char_indices()
        .find(|(_, ch)| !is_key_char(*ch))
        .map_or(content.len(), |(idx, _)| idx);
    content.split_at(end)
}

fn parse_key(content: &str) -> Option<(&str, &str)> {
    let (key, rest) = split_name(content);
    if key.is_empty() {
        return None;
    }
    let rest = rest.trim_start_matches(is_padding).strip_prefix(':')?;
    Some((key, rest.trim_start_matches(is_padding)))
}

fn parse_scope(content: &str) -> Option<Line<'_>> {
    let bracket = match content.chars().next()? {
        '[' => Bracket::List,
        '{' => Bracket::Mapping,
        _ => return None,
    };
    let rest = content[1..].trim_start_matches(is_padding);

    let flags_end = rest
        .find(|ch: char| ch != '.' && ch != '+')
        .unwrap_or(rest.len());
    let (flags, rest) = rest.split_at(flags_end);
    let modifiers = Modifiers {
        nested: flags.contains('.'),
        freeform: flags.contains('+'),
    };

    let (name, rest) = split_name(rest.trim_start_matches(is_padding));
    match rest.trim_start_matches(is_padding).chars().next() {
        Some(']' | '}') => Some(Line::Scope {
            bracket,
            modifiers,
            name,
        }),
        _ => None,
    }
}
