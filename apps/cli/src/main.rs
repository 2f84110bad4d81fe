//! gqldoc CLI, the GraphQL schema documentation renderer.
//!
//! Reads `.graphql`/`.gql` schema files and writes either the merged schema
//! or a Markdown reference document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
