//! Interactive login.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tp_api::Backend;

use crate::cli::LoginArgs;
use crate::token::TokenStore;

/// Logs in and stores the new token.
///
/// `existing` is a backend authenticated with the stored token, if any. When
/// that token still works the user is asked before it is replaced.
pub async fn run<W, R, B, A>(
    writer: &mut W,
    input: &mut R,
    existing: Option<&B>,
    anonymous: &A,
    tokens: &TokenStore,
    args: &LoginArgs,
) -> Result<()>
where
    W: Write,
    R: BufRead,
    B: Backend,
    A: Backend,
{
    if let Some(backend) = existing {
        match backend.me().await {
            Ok(user) => {
                tracing::info!(email = %user.email, "stored token is valid");
                write!(writer, "Logged in as {}. Login as another user? (y/N) ", user.email)?;
                writer.flush()?;
                let answer = read_line(input)?;
                if !answer.eq_ignore_ascii_case("y") {
                    return Ok(());
                }
            }
            Err(err) => {
                tracing::info!(error = %err, "stored token no longer works, logging in again");
            }
        }
    }

    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompt(writer, input, "Enter Email: ")?,
    };
    let password = prompt(writer, input, "Enter Password: ")?;
    if email.is_empty() || password.is_empty() {
        bail!("email and password are required");
    }

    let auth = anonymous
        .login(&email, &password)
        .await
        .context("login failed")?;
    tokens.save(&auth.token)?;
    writeln!(writer, "Logged in as {} successfully!", auth.user.email)?;
    Ok(())
}

fn prompt<W: Write, R: BufRead>(writer: &mut W, input: &mut R, label: &str) -> Result<String> {
    write!(writer, "{label}")?;
    writer.flush()?;
    read_line(input)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read input")?;
    Ok(line.trim().to_string())
}
