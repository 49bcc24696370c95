mod cmd_completion;
mod cmd_fmt;
mod cmd_hash;
mod cmd_inspect;
mod cmd_new;
mod cmd_validate;

pub use cmd_completion::shell_completion_generation;
pub use cmd_fmt::format_document;
pub use cmd_hash::hash_password;
pub use cmd_inspect::inspect_document;
pub use cmd_new::new_document;
pub use cmd_validate::validate_document;
