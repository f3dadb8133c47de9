use clap::{Args, Subcommand};
use tabled::Table;

use crate::{
    Res, api::ProvidersService, config::Config, info, types::ProviderTableRow, utils,
};

#[derive(Subcommand, Debug, Clone)]
pub enum ProviderCommand {
    /// Get available project providers
    List(ProviderListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProviderListArgs {
    /// Get only providers of tracked projects
    #[arg(long)]
    pub added: bool,
}

pub fn providers_table(providers: &[String]) -> String {
    let rows = providers
        .iter()
        .enumerate()
        .map(|(i, name)| ProviderTableRow {
            row: i + 1,
            name: name.clone(),
        });
    Table::new(rows).to_string()
}

pub async fn list_providers(config: &Config, args: ProviderListArgs) -> Res<()> {
    let client = super::client(config)?;

    let providers = if args.added {
        utils::with_spinner("Fetching providers...", client.list_added_providers()).await?
    } else {
        utils::with_spinner("Fetching providers...", client.list_providers()).await?
    };

    if providers.is_empty() {
        info!("No providers found.");
        return Ok(());
    }

    println!("{}", providers_table(&providers));
    Ok(())
}
