use std::io::Write;

use anyhow::{Context, Result};
use tp_api::Backend;

use crate::token::TokenStore;

pub async fn run<W: Write, B: Backend>(
    writer: &mut W,
    backend: &B,
    tokens: &TokenStore,
) -> Result<()> {
    backend.logout().await.context("logout failed")?;
    tokens.clear()?;
    writeln!(writer, "Logged out successfully!")?;
    Ok(())
}
