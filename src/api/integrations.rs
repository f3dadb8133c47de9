use async_trait::async_trait;

use crate::{
    api::{ApiError, Client},
    types::{
        DiscordChannel, DiscordChannelsResponse, MatrixRoom, MatrixRoomsResponse, SlackChannel,
        SlackChannelsResponse, TelegramChat, TelegramChatsResponse, Webhook, WebhooksResponse,
    },
};

/// Integrations that share the plain `{id, name}` webhook shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookKind {
    Custom,
    HangoutsChat,
    MicrosoftTeams,
    Mattermost,
    Rocketchat,
}

impl WebhookKind {
    fn path(&self) -> &'static str {
        match self {
            WebhookKind::Custom => "v1/webhooks",
            WebhookKind::HangoutsChat => "v1/hangouts-chat-webhooks",
            WebhookKind::MicrosoftTeams => "v1/microsoft-teams-webhooks",
            WebhookKind::Mattermost => "v1/mattermost-webhooks",
            WebhookKind::Rocketchat => "v1/rocketchat-webhooks",
        }
    }

    /// Human readable plural used in command output.
    pub fn title(&self) -> &'static str {
        match self {
            WebhookKind::Custom => "Webhooks",
            WebhookKind::HangoutsChat => "Hangouts Chat Webhooks",
            WebhookKind::MicrosoftTeams => "Microsoft Teams Webhooks",
            WebhookKind::Mattermost => "Mattermost Webhooks",
            WebhookKind::Rocketchat => "Rocket.Chat Webhooks",
        }
    }
}

#[async_trait]
pub trait IntegrationsService: Send + Sync {
    async fn list_slack_channels(&self) -> Result<Vec<SlackChannel>, ApiError>;
    async fn list_telegram_chats(&self) -> Result<Vec<TelegramChat>, ApiError>;
    async fn list_discord_channels(&self) -> Result<Vec<DiscordChannel>, ApiError>;
    async fn list_matrix_rooms(&self) -> Result<Vec<MatrixRoom>, ApiError>;
    async fn list_webhooks(&self, kind: WebhookKind) -> Result<Vec<Webhook>, ApiError>;
}

#[async_trait]
impl IntegrationsService for Client {
    async fn list_slack_channels(&self) -> Result<Vec<SlackChannel>, ApiError> {
        let response: SlackChannelsResponse = self.get("v1/slack-channels").await?;
        Ok(response.channels)
    }

    async fn list_telegram_chats(&self) -> Result<Vec<TelegramChat>, ApiError> {
        let response: TelegramChatsResponse = self.get("v1/telegram-chats").await?;
        Ok(response.chats)
    }

    async fn list_discord_channels(&self) -> Result<Vec<DiscordChannel>, ApiError> {
        let response: DiscordChannelsResponse = self.get("v1/discord-channels").await?;
        Ok(response.channels)
    }

    async fn list_matrix_rooms(&self) -> Result<Vec<MatrixRoom>, ApiError> {
        let response: MatrixRoomsResponse = self.get("v1/matrix-rooms").await?;
        Ok(response.rooms)
    }

    async fn list_webhooks(&self, kind: WebhookKind) -> Result<Vec<Webhook>, ApiError> {
        let response: WebhooksResponse = self.get(kind.path()).await?;
        Ok(response.webhooks)
    }
}
