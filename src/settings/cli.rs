use super::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in, store the bearer tokens, and record the session.
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Run the session bootstrap and print who is signed in.
    Whoami,
    /// Sign out (best-effort on the backend, unconditional locally).
    Logout,
}
