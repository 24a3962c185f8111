//! Account commands
//!
//! One-shot commands: each runs against a freshly initialized state, so a
//! session only lives for the duration of the command.

use anyhow::Result;
use clap::Args;

use super::Context;
use crate::output::{print_info, print_output, print_single, print_success, SessionRow, UserRow};

#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Login name (case-sensitive, must be unused)
    #[arg(long)]
    pub username: String,

    /// Password
    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct CredentialArgs {
    /// Login name
    #[arg(long)]
    pub username: String,

    /// Password
    #[arg(long)]
    pub password: String,
}

pub async fn init(ctx: &Context) -> Result<()> {
    let count = ctx.state.user_count();
    print_success(&format!("{} account(s) available", count), ctx.quiet);
    Ok(())
}

pub async fn list_users(ctx: &Context) -> Result<()> {
    let rows: Vec<UserRow> = ctx.state.users().into_iter().map(UserRow::from).collect();
    print_output(&rows, ctx.format)
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let user = ctx
        .state
        .register(&args.name, &args.username, &args.password)
        .await?;

    print_success(&format!("Registered {}", user.username), ctx.quiet);
    print_single(&UserRow::from(user), ctx.format)
}

pub async fn login(ctx: &Context, args: CredentialArgs) -> Result<()> {
    ctx.state.login(&args.username, &args.password).await?;

    print_single(&SessionRow::from(ctx.state.session()), ctx.format)
}

pub async fn delete_account(ctx: &Context, args: CredentialArgs) -> Result<()> {
    ctx.state.login(&args.username, &args.password).await?;

    match ctx.state.delete_account().await? {
        Some(user) => print_success(&format!("Deleted account {}", user.username), ctx.quiet),
        None => print_info("No account deleted", ctx.quiet),
    }
    Ok(())
}
