mod changeset_io;
mod command_runner;
mod reporter;
mod workspace_provider;

pub use changeset_io::ChangesetReader;
pub use command_runner::CommandRunner;
pub use reporter::Reporter;
pub use workspace_provider::WorkspaceProvider;
