//! Tag commands
//!
//! Browsing by tag is global; attaching and detaching need the entry's owner.

use clap::{Args, Subcommand};
use learnlog_core::model::EntryId;
use learnlog_core::ops::tag_ops;

use super::{entry_line, CommandContext, CommandResult, Credentials};

#[derive(Debug, Args)]
pub struct TagArgs {
    #[command(subcommand)]
    pub command: TagCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagCommand {
    /// Create a tag
    Create(CreateArgs),
    /// Attach tags to one of your entries, creating them as needed
    Attach(AttachArgs),
    /// Remove a tag from one of your entries
    Detach(DetachArgs),
    /// List all tags
    List,
    /// List every entry carrying a tag
    Entries(EntriesArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct AttachArgs {
    pub entry_id: i64,

    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub credentials: Credentials,
}

#[derive(Debug, Args)]
pub struct DetachArgs {
    pub entry_id: i64,

    pub name: String,

    #[command(flatten)]
    pub credentials: Credentials,
}

#[derive(Debug, Args)]
pub struct EntriesArgs {
    pub name: String,
}

pub fn execute(ctx: &CommandContext, args: TagArgs) -> CommandResult {
    match args.command {
        TagCommand::Create(args) => execute_create(ctx, args),
        TagCommand::Attach(args) => execute_attach(ctx, args),
        TagCommand::Detach(args) => execute_detach(ctx, args),
        TagCommand::List => execute_list(ctx),
        TagCommand::Entries(args) => execute_entries(ctx, args),
    }
}

fn execute_create(ctx: &CommandContext, args: CreateArgs) -> CommandResult {
    let tag = ctx
        .db
        .with_session(|s| tag_ops::create_tag(s, &args.name))
        .map_err(ctx.fail("tag create"))?;

    println!("Created tag {} ({})", tag.name, tag.id);
    Ok(())
}

fn execute_attach(ctx: &CommandContext, args: AttachArgs) -> CommandResult {
    let entry = EntryId(args.entry_id);
    let tags = ctx
        .db
        .with_session(|s| {
            let caller = args.credentials.caller(s)?;
            tag_ops::attach_tags_as(s, caller.identity()?, entry, &args.names)
        })
        .map_err(ctx.fail("tag attach"))?;

    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    println!("Entry {} tagged: {}", entry, names.join(", "));
    Ok(())
}

fn execute_detach(ctx: &CommandContext, args: DetachArgs) -> CommandResult {
    let entry = EntryId(args.entry_id);
    let removed = ctx
        .db
        .with_session(|s| {
            let caller = args.credentials.caller(s)?;
            tag_ops::detach_tag(s, caller.identity()?, entry, &args.name)
        })
        .map_err(ctx.fail("tag detach"))?;

    if removed {
        println!("Removed tag {} from entry {}", args.name, entry);
    } else {
        println!("Entry {} was not tagged {}", entry, args.name);
    }
    Ok(())
}

fn execute_list(ctx: &CommandContext) -> CommandResult {
    let tags = ctx
        .db
        .with_session(|s| tag_ops::list_tags(&*s))
        .map_err(ctx.fail("tag list"))?;

    for tag in &tags {
        println!("{}", tag.name);
    }
    Ok(())
}

fn execute_entries(ctx: &CommandContext, args: EntriesArgs) -> CommandResult {
    let entries = ctx
        .db
        .with_session(|s| tag_ops::list_entries_for_tag(&*s, &args.name))
        .map_err(ctx.fail("tag entries"))?;

    for entry in &entries {
        println!("{}", entry_line(entry));
    }
    Ok(())
}
