// Prompt rendering
//
// Pure string assembly: no state, no I/O. Same inputs always produce
// byte-identical output.

use super::task_type::TaskType;

/// Fixed output-format directives, identical on every render.
pub const FORMAT_DIRECTIVES: &str = "Instructions for the output format:\n\
- Output code without descriptions, unless it is important.\n\
- Minimize prose, comments and empty lines.\n\
- Only show the relevant code that needs to be modified. Use comments to represent the parts that are not modified.\n\
- Make it easy to copy and paste.\n\
- Consider other possibilities to achieve the result, do not be limited by the prompt.\n\n";

pub const CODE_CONTEXT_HEADER: &str = "Code Context:\n";

/// Render the full prompt.
///
/// `files` is the ordered list of `(file_name, content)` pairs; duplicates
/// are rendered as-is. File content goes into the fence verbatim, so a file
/// without a trailing newline closes the fence on its last line.
pub fn render<N, C>(task: TaskType, instruction: &str, files: &[(N, C)]) -> String
where
    N: AsRef<str>,
    C: AsRef<str>,
{
    let body_len: usize = files
        .iter()
        .map(|(name, content)| name.as_ref().len() + content.as_ref().len() + 20)
        .sum();
    let mut prompt = String::with_capacity(
        task.preamble().len()
            + instruction.len()
            + FORMAT_DIRECTIVES.len()
            + CODE_CONTEXT_HEADER.len()
            + body_len
            + 2,
    );

    prompt.push_str(task.preamble());
    prompt.push_str(instruction);
    prompt.push_str("\n\n");
    prompt.push_str(FORMAT_DIRECTIVES);
    prompt.push_str(CODE_CONTEXT_HEADER);

    for (name, content) in files {
        prompt.push_str("File: ");
        prompt.push_str(name.as_ref());
        prompt.push('\n');
        prompt.push_str("```\n");
        prompt.push_str(content.as_ref());
        prompt.push_str("```\n\n");
    }

    prompt
}

/// Render with a task name as typed by the user; unknown names mean `Feature`.
pub fn render_str<N, C>(task: &str, instruction: &str, files: &[(N, C)]) -> String
where
    N: AsRef<str>,
    C: AsRef<str>,
{
    render(TaskType::parse(task), instruction, files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_FILES: &[(&str, &str)] = &[];

    #[test]
    fn test_render_without_files() {
        let out = render(TaskType::Question, "why?", NO_FILES);
        assert_eq!(
            out,
            format!(
                "You are tasked to answer a question:\n\nwhy?\n\n{}Code Context:\n",
                FORMAT_DIRECTIVES
            )
        );
    }

    #[test]
    fn test_render_file_block() {
        let out = render(TaskType::Fix, "", &[("main.rs", "fn main() {}\n")]);
        assert!(out.ends_with("Code Context:\nFile: main.rs\n```\nfn main() {}\n```\n\n"));
    }

    #[test]
    fn test_render_keeps_duplicate_names() {
        let files = [("mod.rs", "a"), ("mod.rs", "b")];
        let out = render(TaskType::Feature, "x", &files);
        assert_eq!(out.matches("File: mod.rs\n").count(), 2);
        assert!(out.find("```\na```").unwrap() < out.find("```\nb```").unwrap());
    }

    #[test]
    fn test_render_str_unknown_task_uses_feature() {
        let out = render_str("Chore", "tidy up", NO_FILES);
        assert!(out.starts_with(TaskType::Feature.preamble()));
    }

    #[test]
    fn test_directive_block_has_five_items() {
        let items = FORMAT_DIRECTIVES.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(items, 5);
    }
}
