use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect and drive the admin console's local session.
#[derive(Parser, Debug)]
#[command(name = "storeadmin", version, about)]
pub struct Cli {
    /// Session store file (defaults to the user data directory).
    #[arg(long, global = true, env = "STOREADMIN_STORE")]
    pub store: Option<PathBuf>,

    /// YAML config file with storage keys and guard destinations.
    #[arg(long, global = true, env = "STOREADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the CLI version.
    Version,

    /// Decode a token and print its claims (the signature is not checked).
    Decode {
        /// The token, optionally prefixed with `Bearer `.
        token: String,
    },

    /// Store a session for `token`.
    Login {
        token: String,

        /// Opaque user profile stored next to the token.
        #[arg(long)]
        user_info: Option<String>,
    },

    /// Remove the stored session.
    Logout,

    /// Report whether the stored session is valid.
    Session {
        /// Clear the session first if its token has expired.
        #[arg(long)]
        clear_expired: bool,
    },

    /// Resolve role requirements against the stored token.
    Authorize {
        /// Required role (repeatable); any one is sufficient.
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Evaluate a route guard and print the resulting navigation.
    Guard {
        #[arg(value_enum)]
        kind: GuardKind,

        /// Required role for `role-gated` (repeatable).
        #[arg(long = "role")]
        roles: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Redirect to login unless a session is present.
    Protected,
    /// Redirect to the landing page when a session is present.
    PublicOnly,
    /// Redirect to access-denied unless a required role is held.
    RoleGated,
}
