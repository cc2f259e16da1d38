// Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::watch::WatchMatch;

#[derive(Debug, Parser)]
#[command(name = "quill", version, about = "Assemble LLM prompts from live file context")]
pub struct Args {
    /// Files or directories to add to the context
    pub paths: Vec<PathBuf>,

    /// Task type: Feature, Fix, Refactor, Question, Blog, Others
    #[arg(short, long)]
    pub task: Option<String>,

    /// Instruction text
    #[arg(short, long)]
    pub instruction: Option<String>,

    /// Config file (default: ~/.quill/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Render once to stdout and exit
    #[arg(long)]
    pub once: bool,

    /// With --once, also copy the prompt to the clipboard
    #[arg(long, requires = "once")]
    pub copy: bool,

    /// Do not watch tracked files for changes
    #[arg(long)]
    pub no_watch: bool,

    /// How changed files are matched to tracked entries
    #[arg(long, value_enum)]
    pub match_by: Option<WatchMatch>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            task: self.task.clone(),
            no_watch: self.no_watch || self.once,
            match_by: self.match_by,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_once_with_paths() {
        let args = Args::try_parse_from(["quill", "--once", "-t", "fix", "src", "README.md"]).unwrap();
        assert!(args.once);
        assert_eq!(args.task.as_deref(), Some("fix"));
        assert_eq!(args.paths, vec![PathBuf::from("src"), PathBuf::from("README.md")]);
        assert!(args.overrides().no_watch);
    }

    #[test]
    fn test_copy_requires_once() {
        assert!(Args::try_parse_from(["quill", "--copy"]).is_err());
    }

    #[test]
    fn test_match_by_value() {
        let args = Args::try_parse_from(["quill", "--match-by", "name"]).unwrap();
        assert_eq!(args.match_by, Some(WatchMatch::Name));
        assert!(Args::try_parse_from(["quill", "--match-by", "inode"]).is_err());
    }
}
