use std::{io::Write, path::PathBuf};

use anyhow::{anyhow, Context};
use forkful_client::{
    api::{Comment, Draft, DraftId},
    count_all, DraftStore, FileStorage, RevealState, Row,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Directory holding the local draft store
    #[structopt(short, long, env = "FORKFUL_DRAFTS_DIR", default_value = ".forkful")]
    store_dir: PathBuf,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List drafts, most recently saved first
    List,

    /// Print a draft as JSON
    Show { id: DraftId },

    /// Create a draft and print its id
    New {
        #[structopt(long)]
        title: String,

        #[structopt(long, default_value = "")]
        category: String,

        /// HTML body
        #[structopt(long, default_value = "")]
        content: String,

        #[structopt(long)]
        cover_image: Option<String>,
    },

    /// Delete a draft
    Delete { id: DraftId },

    /// Summarize a comment tree, as returned by the API, from a JSON file
    Comments {
        file: PathBuf,

        /// Number of "load more" clicks to simulate on the top-level list
        #[structopt(long, default_value = "0")]
        reveal: usize,
    },
}

fn run(opt: Opt, out: &mut impl Write) -> anyhow::Result<()> {
    let mut store = DraftStore::new(FileStorage::new(opt.store_dir));
    match opt.cmd {
        Command::List => {
            for d in store.list_drafts_by_recency() {
                writeln!(out, "{}\t{}\t{}\t{}", d.id, d.updated_at, d.category, d.title)?;
            }
        }
        Command::Show { id } => {
            let draft = store
                .get_draft(&id)
                .ok_or_else(|| anyhow!("no draft with id {id}"))?;
            serde_json::to_writer_pretty(&mut *out, &draft).context("serializing draft")?;
            writeln!(out)?;
        }
        Command::New {
            title,
            category,
            content,
            cover_image,
        } => {
            let mut draft = Draft::new(store.generate_id());
            draft.title = title;
            draft.category = category;
            draft.content = content;
            draft.cover_image = cover_image;
            draft.validate().context("validating draft")?;
            let id = draft.id;
            store.save_draft(draft);
            if store.get_draft(&id).is_none() {
                return Err(anyhow!(
                    "draft store at {:?} did not keep the draft, see logs",
                    store.storage().dir()
                ));
            }
            writeln!(out, "{id}")?;
        }
        Command::Delete { id } => {
            if store.get_draft(&id).is_none() {
                tracing::warn!(%id, "no such draft, nothing to delete");
            }
            store.delete_draft(&id);
        }
        Command::Comments { file, reveal } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading comment dump {file:?}"))?;
            let comments = parse_comment_dump(&raw)
                .with_context(|| format!("parsing comment dump {file:?}"))?;
            let mut state = RevealState::new();
            for _ in 0..reveal {
                state.reveal_more_top_level();
            }
            writeln!(out, "{} comments", count_all(&comments))?;
            for row in state.rows(&comments) {
                match row {
                    Row::Comment { comment, depth } => writeln!(
                        out,
                        "{}{}: {}",
                        "  ".repeat(depth),
                        comment.author_name(),
                        comment.comment
                    )?,
                    Row::MoreReplies { depth, hidden, .. } => {
                        writeln!(out, "{}[{hidden} more replies]", "  ".repeat(depth))?
                    }
                    Row::MoreComments { hidden } => writeln!(out, "[{hidden} more comments]")?,
                }
            }
        }
    }
    Ok(())
}

// Reply chains can nest deeper than serde_json's default recursion limit
fn parse_comment_dump(raw: &str) -> anyhow::Result<Vec<Comment>> {
    let mut de = serde_json::Deserializer::from_str(raw);
    de.disable_recursion_limit();
    let entries = <Vec<serde_json::Value> as serde::Deserialize>::deserialize(&mut de)?;
    de.end()?;
    Ok(Comment::forest(entries))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    run(opt, &mut std::io::stdout().lock())
}
