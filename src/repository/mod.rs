mod command;
mod git;
mod storage;

pub use command::{CommandRunner, ShellRunner};
pub use git::{Ancestry, GitRepo, Vcs};
pub use storage::{default_store_path, load_store, save_store};
