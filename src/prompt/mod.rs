// Prompt assembly
// Task types and the pure renderer

mod renderer;
mod task_type;

pub use renderer::{render, render_str, CODE_CONTEXT_HEADER, FORMAT_DIRECTIVES};
pub use task_type::TaskType;
