// Task categories and their fixed preambles

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of work the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskType {
    #[default]
    Feature,
    Fix,
    Refactor,
    Question,
    Blog,
    Others,
}

impl TaskType {
    pub const ALL: [TaskType; 6] = [
        TaskType::Feature,
        TaskType::Fix,
        TaskType::Refactor,
        TaskType::Question,
        TaskType::Blog,
        TaskType::Others,
    ];

    /// Parse a task name. Total: anything unrecognized is `Feature`.
    pub fn parse(name: &str) -> Self {
        Self::try_parse(name).unwrap_or_default()
    }

    /// Parse a task name, case-insensitively. `None` when unrecognized.
    pub fn try_parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "feature" => Some(TaskType::Feature),
            "fix" => Some(TaskType::Fix),
            "refactor" => Some(TaskType::Refactor),
            "question" => Some(TaskType::Question),
            "blog" => Some(TaskType::Blog),
            "others" => Some(TaskType::Others),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Feature => "Feature",
            TaskType::Fix => "Fix",
            TaskType::Refactor => "Refactor",
            TaskType::Question => "Question",
            TaskType::Blog => "Blog",
            TaskType::Others => "Others",
        }
    }

    /// Opening text of the prompt, including the trailing blank line.
    pub fn preamble(&self) -> &'static str {
        match self {
            TaskType::Feature => {
                "You are tasked to implement a feature. Instructions are as follows:\n\n"
            }
            TaskType::Fix => "You are tasked to fix a bug. Instructions are as follows:\n\n",
            TaskType::Refactor => {
                "You are tasked to do a code refactoring. Instructions are as follows:\n\n"
            }
            TaskType::Question => "You are tasked to answer a question:\n\n",
            TaskType::Blog => "You are tasked to write a blog post. Instructions are as follows:\n\n",
            TaskType::Others => "\n\n",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TaskType {
    fn from(name: &str) -> Self {
        TaskType::parse(name)
    }
}
