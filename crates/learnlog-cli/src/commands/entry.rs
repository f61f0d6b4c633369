//! Journal entry commands
//!
//! Owner-scoped commands authenticate with `--email/--password` on every call.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use learnlog_core::model::{EntryDetail, EntryFields, EntryId};
use learnlog_core::ops::{entry_ops, tag_ops};
use learnlog_core::rules::validation;

use super::{entry_line, CommandContext, CommandResult, Credentials};

#[derive(Debug, Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    pub command: EntryCommand,
}

#[derive(Debug, Subcommand)]
pub enum EntryCommand {
    /// Record a new entry
    Add(AddArgs),
    /// List your entries, newest first
    List(ListArgs),
    /// Show one entry with its tags
    Show(ShowArgs),
    /// Change fields of one of your entries
    Edit(EditArgs),
    /// Delete one of your entries
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    #[arg(long)]
    pub title: String,

    /// Day of study (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Time spent, in minutes
    #[arg(long)]
    pub minutes: u32,

    /// What you learned
    #[arg(long)]
    pub learned: String,

    /// Resources to remember
    #[arg(long)]
    pub resources: Option<String>,

    /// Tags to attach, comma separated
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Maximum number of entries (defaults to the configured list limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Entry id
    #[arg(required_unless_present = "slug")]
    pub id: Option<i64>,

    /// Look up one of your own entries by slug instead
    #[arg(long, conflicts_with = "id")]
    pub slug: Option<String>,

    #[command(flatten)]
    pub credentials: Credentials,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Entry id
    pub id: i64,

    #[command(flatten)]
    pub credentials: Credentials,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub minutes: Option<u32>,

    #[arg(long)]
    pub learned: Option<String>,

    #[arg(long)]
    pub resources: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Entry id
    pub id: i64,

    #[command(flatten)]
    pub credentials: Credentials,
}

pub fn execute(ctx: &CommandContext, args: EntryArgs) -> CommandResult {
    match args.command {
        EntryCommand::Add(args) => execute_add(ctx, args),
        EntryCommand::List(args) => execute_list(ctx, args),
        EntryCommand::Show(args) => execute_show(ctx, args),
        EntryCommand::Edit(args) => execute_edit(ctx, args),
        EntryCommand::Delete(args) => execute_delete(ctx, args),
    }
}

fn execute_add(ctx: &CommandContext, args: AddArgs) -> CommandResult {
    let fields = EntryFields {
        title: Some(args.title),
        date: Some(args.date),
        time_spent: Some(args.minutes),
        learned: Some(args.learned),
        resources: args.resources,
    };

    let (entry, tags) = ctx
        .db
        .with_session(|s| {
            let caller = args.credentials.caller(s)?;
            let me = caller.identity()?;
            // Validate tag names before anything is written
            let names = args
                .tags
                .iter()
                .map(|name| validation::normalize_tag_name(name))
                .collect::<learnlog_core::Result<Vec<_>>>()?;
            let entry = entry_ops::create_entry(s, me, &fields)?;
            let tags = if names.is_empty() {
                Vec::new()
            } else {
                tag_ops::attach_tags_as(s, me, entry.id, &names)?
            };
            Ok((entry, tags))
        })
        .map_err(ctx.fail("entry add"))?;

    println!("Created entry {} ({})", entry.id, entry.slug);
    if !tags.is_empty() {
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        println!("Tags: {}", names.join(", "));
    }
    Ok(())
}

fn execute_list(ctx: &CommandContext, args: ListArgs) -> CommandResult {
    let limit = args.limit.unwrap_or(ctx.settings.list_limit);
    let entries = ctx
        .db
        .with_session(|s| {
            let caller = args.credentials.caller(s)?;
            entry_ops::list_entries(&*s, caller.identity()?, Some(limit))
        })
        .map_err(ctx.fail("entry list"))?;

    if entries.is_empty() {
        println!("No entries yet");
    }
    for entry in &entries {
        println!("{}", entry_line(entry));
    }
    Ok(())
}

fn execute_show(ctx: &CommandContext, args: ShowArgs) -> CommandResult {
    let detail = ctx
        .db
        .with_session(|s| match (&args.slug, args.id) {
            (Some(slug), _) => {
                let caller = args.credentials.caller(s)?;
                let entry = entry_ops::get_entry_by_slug(&*s, caller.identity()?, slug)?;
                entry_ops::get_entry_detail(&*s, entry.id)
            }
            (None, Some(id)) => entry_ops::get_entry_detail(&*s, EntryId(id)),
            (None, None) => Err(learnlog_core::JournalError::validation(
                "id",
                "an entry id or --slug is required",
            )),
        })
        .map_err(ctx.fail("entry show"))?;

    print_detail(&detail);
    Ok(())
}

fn execute_edit(ctx: &CommandContext, args: EditArgs) -> CommandResult {
    let id = EntryId(args.id);
    let entry = ctx
        .db
        .with_session(|s| {
            let caller = args.credentials.caller(s)?;
            let me = caller.identity()?;
            let current = entry_ops::get_entry(&*s, id)?;
            // Unspecified fields keep their current values
            let fields = EntryFields {
                title: Some(args.title.unwrap_or(current.title)),
                date: Some(args.date.unwrap_or(current.date)),
                time_spent: Some(args.minutes.unwrap_or(current.time_spent)),
                learned: Some(args.learned.unwrap_or(current.learned)),
                resources: Some(args.resources.unwrap_or(current.resources)),
            };
            entry_ops::edit_entry(s, id, me, &fields)
        })
        .map_err(ctx.fail("entry edit"))?;

    println!("Updated {}", entry_line(&entry));
    Ok(())
}

fn execute_delete(ctx: &CommandContext, args: DeleteArgs) -> CommandResult {
    let id = EntryId(args.id);
    ctx.db
        .with_session(|s| {
            let caller = args.credentials.caller(s)?;
            entry_ops::delete_entry(s, id, caller.identity()?)
        })
        .map_err(ctx.fail("entry delete"))?;

    println!("Deleted entry {}", id);
    Ok(())
}

fn print_detail(detail: &EntryDetail) {
    let entry = &detail.entry;
    println!("{} [{}]", entry.title, entry.slug);
    println!("Date: {}", entry.date);
    println!("Time spent: {} min", entry.time_spent);
    println!();
    println!("{}", entry.learned);
    if !entry.resources.is_empty() {
        println!();
        println!("Resources: {}", entry.resources);
    }
    if !detail.tags.is_empty() {
        let names: Vec<&str> = detail.tags.iter().map(|t| t.name.as_str()).collect();
        println!("Tags: {}", names.join(", "));
    }
}
