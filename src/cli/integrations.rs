use clap::Subcommand;
use tabled::Table;

use crate::{
    Res,
    api::{IntegrationsService, WebhookKind},
    config::Config,
    info,
    types::{MatrixRoomTableRow, NamedTableRow, SlackChannelTableRow, TelegramChatTableRow},
    utils,
};

/// The only operation every integration command supports.
#[derive(Subcommand, Debug, Clone)]
pub enum IntegrationCommand {
    /// List all entries
    List,
}

pub async fn list_slack_channels(config: &Config) -> Res<()> {
    let client = super::client(config)?;
    let channels =
        utils::with_spinner("Fetching Slack Channels...", client.list_slack_channels()).await?;

    if channels.is_empty() {
        info!("No Slack Channels found.");
        return Ok(());
    }

    let rows = channels.into_iter().map(|c| SlackChannelTableRow {
        id: c.id,
        workspace: c.team_name,
        channel: c.channel,
    });
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn list_telegram_chats(config: &Config) -> Res<()> {
    let client = super::client(config)?;
    let chats =
        utils::with_spinner("Fetching Telegram Chats...", client.list_telegram_chats()).await?;

    if chats.is_empty() {
        info!("No Telegram Chats found.");
        return Ok(());
    }

    let rows = chats.into_iter().map(|c| TelegramChatTableRow {
        id: c.id,
        chat: c.name,
        chat_type: c.chat_type,
    });
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn list_discord_channels(config: &Config) -> Res<()> {
    let client = super::client(config)?;
    let channels =
        utils::with_spinner("Fetching Discord Channels...", client.list_discord_channels())
            .await?;

    if channels.is_empty() {
        info!("No Discord Channels found.");
        return Ok(());
    }

    let rows = channels.into_iter().map(|c| NamedTableRow {
        id: c.id,
        name: c.name,
    });
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn list_matrix_rooms(config: &Config) -> Res<()> {
    let client = super::client(config)?;
    let rooms = utils::with_spinner("Fetching Matrix Rooms...", client.list_matrix_rooms()).await?;

    if rooms.is_empty() {
        info!("No Matrix Rooms found.");
        return Ok(());
    }

    let rows = rooms.into_iter().map(|r| MatrixRoomTableRow {
        id: r.id,
        name: r.name,
        homeserver_url: r.homeserver_url,
        internal_room_id: r.internal_room_id,
    });
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn list_webhooks(config: &Config, kind: WebhookKind) -> Res<()> {
    let client = super::client(config)?;
    let message = format!("Fetching {}...", kind.title());
    let webhooks = utils::with_spinner(&message, client.list_webhooks(kind)).await?;

    if webhooks.is_empty() {
        info!("No {} found.", kind.title());
        return Ok(());
    }

    let rows = webhooks.into_iter().map(|w| NamedTableRow {
        id: w.id,
        name: w.name,
    });
    println!("{}", Table::new(rows));
    Ok(())
}
