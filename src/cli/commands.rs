// Slash command parsing

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    /// 1-based position as shown by /list
    Remove(String),
    List,
    Task(String),
    Instruct(String),
    Clear,
    Show,
    Copy,
    Watch,
    Help,
    Quit,
    Unknown(String),
}

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Free text, appended to the instruction
    Text(String),
    Empty,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Input::Empty
        } else if trimmed.starts_with('/') {
            Input::Command(Command::parse(trimmed))
        } else {
            Input::Text(line.trim_end().to_string())
        }
    }
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };

        match name {
            "/add" => Command::Add(split_paths(rest).into_iter().map(PathBuf::from).collect()),
            "/remove" | "/rm" => Command::Remove(rest.to_string()),
            "/list" | "/ls" => Command::List,
            "/task" => Command::Task(rest.to_string()),
            "/instruct" => Command::Instruct(rest.to_string()),
            "/clear" => Command::Clear,
            "/show" => Command::Show,
            "/copy" => Command::Copy,
            "/watch" => Command::Watch,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Split on whitespace, keeping single- or double-quoted runs together.
/// An unterminated quote runs to the end of the line.
fn split_paths(rest: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in rest.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    paths.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        paths.push(current);
    }
    paths
}

pub fn format_help() -> String {
    r#"Available commands:
  /add <path>...     - Add files or directories (directories are expanded;
                       quote paths containing spaces)
  /remove <n>        - Remove file n as numbered by /list
  /list              - List tracked files
  /task <type>       - Feature, Fix, Refactor, Question, Blog or Others
  /instruct <text>   - Replace the instruction text
  /clear             - Clear the instruction text
  /show              - Print the full prompt
  /copy              - Copy the prompt to the clipboard
  /watch             - List watched directories
  /help              - Show this help message
  /quit              - Exit

Any other text is appended to the instruction."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_multiple_paths() {
        assert_eq!(
            Command::parse("/add src  tests/a.rs"),
            Command::Add(vec![PathBuf::from("src"), PathBuf::from("tests/a.rs")])
        );
    }

    #[test]
    fn test_parse_add_quoted_paths_with_spaces() {
        assert_eq!(
            Command::parse(r#"/add "My Docs/notes.md" 'old src' plain"#),
            Command::Add(vec![
                PathBuf::from("My Docs/notes.md"),
                PathBuf::from("old src"),
                PathBuf::from("plain"),
            ])
        );
        assert_eq!(
            Command::parse(r#"/add dir/"a b".txt"#),
            Command::Add(vec![PathBuf::from("dir/a b.txt")])
        );
        assert_eq!(Command::parse("/add"), Command::Add(vec![]));
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(Command::parse("/task Fix"), Command::Task("Fix".to_string()));
        assert_eq!(
            Command::parse("/instruct make it   faster"),
            Command::Instruct("make it   faster".to_string())
        );
        assert_eq!(Command::parse("/remove 2"), Command::Remove("2".to_string()));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/ls"), Command::List);
        assert_eq!(Command::parse("/rm 1"), Command::Remove("1".to_string()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("/frobnicate"), Command::Unknown("/frobnicate".to_string()));
    }

    #[test]
    fn test_input_text_and_empty() {
        assert_eq!(Input::parse("   "), Input::Empty);
        assert_eq!(Input::parse("  indent kept"), Input::Text("  indent kept".to_string()));
        assert_eq!(Input::parse("/show"), Input::Command(Command::Show));
    }
}
