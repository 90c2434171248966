// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mint a bearer token for a registered user id.
//!
//! Reads `JWT_SECRET` and `TOKEN_LIFETIME_HOURS` exactly like the server, so
//! the printed token is accepted by a server running with the same
//! environment. Registration itself is out of scope; pair this with
//! `SEED_USER_ID` during development.
//!
//! ```text
//! JWT_SECRET=... issue-token --user-id 5f0c...  # prints the token
//! JWT_SECRET=... issue-token --user-id 5f0c... --json
//! ```

use std::io;
use std::process::ExitCode;

use cashbook_server::auth::{TokenCodec, UserId};
use cashbook_server::config::token_config_from_env;
use clap::Parser;

/// `issue-token` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "issue-token",
    about = "Issue a signed bearer token for a user id",
    version
)]
struct CliArgs {
    /// Identity to place in the token subject.
    #[arg(long = "user-id", value_name = "uuid")]
    user_id: UserId,
    /// Print the token together with its subject and validity window as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("issue-token: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> io::Result<()> {
    let args = CliArgs::parse();

    let config = token_config_from_env().map_err(io::Error::other)?;
    let issued = TokenCodec::new(&config)
        .issue(args.user_id)
        .map_err(io::Error::other)?;

    if args.json {
        let json = serde_json::to_string_pretty(&issued).map_err(io::Error::other)?;
        println!("{json}");
    } else {
        println!("{}", issued.token);
    }
    Ok(())
}
