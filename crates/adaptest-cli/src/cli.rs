use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "adaptest",
    about = "Adaptest: resolve adaptive-test rule-sets from declarative session configs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a rule-set from a session config and print its components
    Resolve {
        /// Path to the session config (TOML)
        config: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Log each resolution step to stderr
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the ingredients a session config expands to
    Ingredients {
        /// Path to the session config (TOML)
        config: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
