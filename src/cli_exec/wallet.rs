use anyhow::{Context, Result};

use gif_portal::config::PortalConfig;
use gif_portal::wallet::{KEYPAIR_FILE, Keypair, create_wallet};

pub(super) fn wallet_new(config: &PortalConfig, force: bool) -> Result<()> {
    let keypair = create_wallet(&config.wallet_dir, force)
        .with_context(|| format!("create wallet in {}", config.wallet_dir.display()))?;
    println!("Created wallet {}", keypair.identity());
    println!("keypair: {}", config.wallet_dir.join(KEYPAIR_FILE).display());
    Ok(())
}

pub(super) fn wallet_show(config: &PortalConfig, json: bool) -> Result<()> {
    let path = config.wallet_dir.join(KEYPAIR_FILE);
    if !path.is_file() {
        anyhow::bail!(
            "no wallet at {} (run `gif-portal wallet new`)",
            path.display()
        );
    }
    let keypair = Keypair::read_file(&path).context("read wallet keypair")?;
    if json {
        let out = serde_json::json!({
            "identity": keypair.identity(),
            "keypair": path.display().to_string(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("serialize wallet json")?
        );
    } else {
        println!("{}", keypair.identity());
    }
    Ok(())
}
