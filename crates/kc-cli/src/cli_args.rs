use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kcode-cli")]
#[command(about = "Creation (.kcode) file parser and validator")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List block types found in the target
    Blocks(TargetArgs),
    /// List spell gesture names found in the target
    Spells(TargetArgs),
    /// List attached part identifiers
    Parts(TargetArgs),
    /// Print the scene identifier
    Scene(TargetArgs),
    /// Cross-check extraction against lexical ground-truth counts
    Validate(TargetArgs),
}

impl Command {
    pub(crate) fn target(&self) -> &TargetArgs {
        match self {
            Command::Blocks(args)
            | Command::Spells(args)
            | Command::Parts(args)
            | Command::Scene(args)
            | Command::Validate(args) => args,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct TargetArgs {
    /// A .kcode file, or a directory scanned for .kcode files
    pub(crate) path: String,
    #[arg(long)]
    pub(crate) verbose: bool,
}
