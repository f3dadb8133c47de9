use clap::Subcommand;
use tabled::Table;

use crate::{
    Res,
    api::AuthService,
    config::Config,
    info,
    types::{AuthKey, AuthKeyTableRow},
    utils,
};

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Get all auth keys
    List,
}

pub fn auth_keys_table(keys: &[AuthKey]) -> String {
    let rows = keys.iter().enumerate().map(|(i, key)| AuthKeyTableRow {
        row: i + 1,
        name: key.name.clone(),
        authorized_networks: utils::join(&key.authorized_networks),
    });
    Table::new(rows).to_string()
}

pub async fn list_auth_keys(config: &Config) -> Res<()> {
    let client = super::client(config)?;
    let keys = utils::with_spinner("Fetching auth keys...", client.list_auth_keys()).await?;

    if keys.is_empty() {
        info!("No auth keys found.");
        return Ok(());
    }

    println!("{}", auth_keys_table(&keys));
    Ok(())
}
