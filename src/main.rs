//! Command-line access to the revision set store.

mod error;
mod logging;

use crate::error::{ErrorKind, Result};
use clap::{Parser, Subcommand};
use exn::ResultExt;
use folio_config::Config;
use folio_store::{
    Alias, Database, Identifier, Relationship, RelationshipAttribute, Repository, RevisionId, SetId, SetKind,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

/// Inspect and maintain the revision set store
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database if needed and apply pending migrations
    Migrate,
    /// Stored sets
    #[command(subcommand)]
    Set(SetCommand),
    /// Show the sets referenced by a revision, and its parent
    Revision { id: i64 },
    /// Follow an entity's redirects to the entity it now resolves to
    Redirect { bbid: Uuid },
}

#[derive(Subcommand, Debug)]
enum SetCommand {
    /// Print the items of a set as JSON
    Show {
        /// aliases, identifiers, relationships or relationship_attributes
        kind: String,
        id: i64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    logging::init(&config.log)?;

    let db = Database::connect_with(&config.database).await.or_raise(|| ErrorKind::Store)?;
    let repo = Repository::from(&db);
    let result = match cli.command {
        Command::Migrate => {
            tracing::info!(path = %config.database.path.display(), "database is up to date");
            Ok(())
        },
        Command::Set(SetCommand::Show { kind, id }) => show_set(&repo, &kind, SetId::from(id)).await,
        Command::Revision { id } => show_revision(&repo, RevisionId::from(id)).await,
        Command::Redirect { bbid } => {
            let resolved = repo.resolve_redirect(bbid).await.or_raise(|| ErrorKind::Store)?;
            print_json(&resolved)
        },
    };
    db.close().await;
    result
}

async fn show_set(repo: &Repository, kind: &str, id: SetId) -> Result<()> {
    let kind = kind.parse::<SetKind>().or_raise(|| ErrorKind::Store)?;
    match kind {
        SetKind::Alias => print_items(repo.get_set_items::<Alias>(id).await),
        SetKind::Identifier => print_items(repo.get_set_items::<Identifier>(id).await),
        SetKind::Relationship => print_items(repo.get_set_items::<Relationship>(id).await),
        SetKind::RelationshipAttribute => print_items(repo.get_set_items::<RelationshipAttribute>(id).await),
    }
}

async fn show_revision(repo: &Repository, id: RevisionId) -> Result<()> {
    let sets = repo.get_revision_sets(id).await.or_raise(|| ErrorKind::Store)?;
    let parent = repo.get_parent_revision(id).await.or_raise(|| ErrorKind::Store)?;
    print_json(&serde_json::json!({ "revision": id, "parent": parent, "sets": sets }))
}

fn print_items<T: Serialize>(items: folio_store::error::Result<Vec<T>>) -> Result<()> {
    print_json(&items.or_raise(|| ErrorKind::Store)?)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).or_raise(|| ErrorKind::Output)?;
    writeln!(stdout).or_raise(|| ErrorKind::Output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_show() {
        let cli = Cli::try_parse_from(["folio", "set", "show", "identifiers", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Set(SetCommand::Show { ref kind, id: 3 }) if kind == "identifiers"));
    }

    #[tokio::test]
    async fn test_show_set_rejects_unknown_kind() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let err = show_set(&repo, "magazines", SetId::from(1_i64)).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Store));
        db.close().await;
    }

    #[tokio::test]
    async fn test_show_set_of_every_kind() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        for kind in SetKind::ALL {
            // A set id with no rows lists as empty.
            show_set(&repo, &kind.to_string(), SetId::from(1_i64)).await.unwrap();
        }
        db.close().await;
    }
}
