use crate::cli::{Commands, GlobalFlags};

pub mod check;
pub mod reference;
pub mod schema;

/// Route a parsed command to its handler.
pub fn dispatch(command: &Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Check(args) => check::handle(args, flags),
        Commands::Reference(args) => reference::handle(args, flags),
        Commands::Schema(args) => schema::handle(args, flags),
    }
}
