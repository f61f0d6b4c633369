//! Account commands
//!
//! Usage: learnlog user register --email <EMAIL> --password <PW> [--confirm <PW>]
//!        learnlog user login --email <EMAIL> --password <PW>

use clap::{Args, Subcommand};
use learnlog_core::ops::credential_ops;
use learnlog_core_types::Sensitive;

use super::{CommandContext, CommandResult};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account
    Register(RegisterArgs),
    /// Check a set of credentials
    Login(LoginArgs),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Repeat the password; must match when given
    #[arg(long)]
    pub confirm: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

pub fn execute(ctx: &CommandContext, args: UserArgs) -> CommandResult {
    match args.command {
        UserCommand::Register(args) => execute_register(ctx, args),
        UserCommand::Login(args) => execute_login(ctx, args),
    }
}

fn execute_register(ctx: &CommandContext, args: RegisterArgs) -> CommandResult {
    let password = Sensitive::new(args.password.as_str());
    let user = ctx
        .db
        .with_session(|s| match &args.confirm {
            Some(confirm) => credential_ops::register_with_confirmation(
                s,
                &args.email,
                password,
                Sensitive::new(confirm.as_str()),
            ),
            None => credential_ops::register(s, &args.email, password),
        })
        .map_err(ctx.fail("user register"))?;

    println!("Registered {} (user {})", user.email, user.id);
    Ok(())
}

fn execute_login(ctx: &CommandContext, args: LoginArgs) -> CommandResult {
    let user = ctx
        .db
        .with_session(|s| {
            credential_ops::authenticate(&*s, &args.email, Sensitive::new(args.password.as_str()))
        })
        .map_err(ctx.fail("user login"))?;

    println!("Authenticated as {} (user {})", user.email, user.id);
    Ok(())
}
