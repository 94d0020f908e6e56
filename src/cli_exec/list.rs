use anyhow::{Context, Result};

use gif_portal::config::PortalConfig;
use gif_portal::model::{Entry, ListSnapshot};

use super::{connect, require_list};

pub(super) async fn list(config: PortalConfig, json: bool) -> Result<()> {
    let account = config.account.to_string();
    let (_controller, snapshot) = connect(config, false).await?;
    require_list(&account, &snapshot)?;
    let entries = snapshot.entries().unwrap_or_default();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(entries).context("serialize list json")?
        );
    } else if entries.is_empty() {
        println!("No GIFs yet");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            println!("{}", entry_line(i, entry));
        }
    }
    Ok(())
}

pub(super) async fn init(config: PortalConfig, yes: bool) -> Result<()> {
    if config.account_keypair.is_none() {
        anyhow::bail!("init needs the list account keypair (--account-keypair PATH)");
    }
    let (controller, snapshot) = connect(config, yes).await?;
    let account = controller.store().account().to_string();
    if snapshot.is_resolved() {
        println!("List account {} is already initialized", account);
        return Ok(());
    }

    let outcome = controller.initialize().await?;
    match outcome.created {
        Ok(receipt) => {
            println!("Initialized list account {}", account);
            println!("signature: {}", receipt.signature);
        }
        Err(err) if outcome.snapshot.is_resolved() => {
            println!("List account {} is already initialized ({})", account, err);
        }
        Err(err) => return Err(err).context("initialize list account"),
    }
    Ok(())
}

pub(super) async fn submit(config: PortalConfig, link: String, yes: bool) -> Result<()> {
    let account = config.account.to_string();
    let (controller, snapshot) = connect(config, yes).await?;
    require_list(&account, &snapshot)?;

    controller.set_input(link.as_str());
    let snapshot = controller.submit().await.context("submit link")?;
    println!("Added {}", link);
    print_settled(&snapshot);
    Ok(())
}

pub(super) async fn upvote(config: PortalConfig, position: usize, yes: bool) -> Result<()> {
    let Some(index) = position.checked_sub(1) else {
        anyhow::bail!("positions start at 1");
    };
    let account = config.account.to_string();
    let (controller, snapshot) = connect(config, yes).await?;
    require_list(&account, &snapshot)?;
    let len = snapshot.entries().map_or(0, |entries| entries.len());
    if index >= len {
        anyhow::bail!("no entry at position {} (list has {})", position, len);
    }

    let snapshot = controller.upvote(index).await.context("upvote")?;
    match snapshot.entries().and_then(|entries| entries.get(index)) {
        Some(entry) => println!("{}", entry_line(index, entry)),
        None => print_settled(&snapshot),
    }
    Ok(())
}

fn entry_line(index: usize, entry: &Entry) -> String {
    format!(
        "{:>3}. {:>4} ^  {}  by {}",
        index + 1,
        entry.upvotes,
        entry.link,
        entry.submitter
    )
}

/// A write can succeed while the follow-up read fails; say so instead of
/// pretending the list is empty.
fn print_settled(snapshot: &ListSnapshot) {
    match snapshot {
        ListSnapshot::Resolved(entries) => println!("{} link(s) in the list", entries.len()),
        ListSnapshot::Unavailable { reason } => {
            println!("(could not reload the list: {})", reason)
        }
        ListSnapshot::NotFound | ListSnapshot::Unknown => {}
    }
}
