use std::io::{self, BufReader};

use crate::{
    Res,
    config::Config,
    management::{ConfigManager, ConfigWriter},
    terminal::{StdinPasswordReader, Terminal},
};

/// Prompts for an auth key and stores it.
///
/// Returns the path the key was written to, or `None` when nothing was
/// entered.
pub async fn store_auth_key(
    term: &mut Terminal<'_>,
    writer: &dyn ConfigWriter,
) -> Res<Option<std::path::PathBuf>> {
    term.prompt("Auth Key: ")?;
    let key = term.read_line()?.unwrap_or_default();

    if key.is_empty() {
        term.eprintln("No key provided.")?;
        term.println("Configuration is not saved.")?;
        return Ok(None);
    }

    let path = writer.persist_secret(&key).await?;
    term.println(&format!("Configuration saved to: {}.", path.display()))?;
    Ok(Some(path))
}

pub async fn configure(config: &Config) -> Res<()> {
    let manager = ConfigManager::new(config.path.clone());

    let mut input = BufReader::new(io::stdin());
    let mut out = io::stdout();
    let mut err = io::stderr();
    let password = StdinPasswordReader;
    let mut term = Terminal::new(&mut input, &mut out, &mut err, &password);

    store_auth_key(&mut term, &manager).await?;
    Ok(())
}
