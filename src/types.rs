use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Email and password pair exchanged for the account's auth keys.
///
/// Lives only for the duration of one exchange and is never persisted.
#[derive(Clone)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthKey {
    pub name: String,
    pub secret: String,
    #[serde(default)]
    pub authorized_networks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmailNotification {
    Instant,
    Hourly,
    Daily,
    Weekly,
    None,
}

impl EmailNotification {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailNotification::Instant => "instant",
            EmailNotification::Hourly => "hourly",
            EmailNotification::Daily => "daily",
            EmailNotification::Weekly => "weekly",
            EmailNotification::None => "none",
        }
    }
}

impl fmt::Display for EmailNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version regular expression exclusion. Inverse exclusions act as inclusions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub value: String,
    #[serde(default)]
    pub inverse: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub email_notification: Option<EmailNotification>,
    #[serde(default, rename = "slack_channels")]
    pub slack_ids: Vec<String>,
    #[serde(default, rename = "telegram_chats")]
    pub telegram_chat_ids: Vec<String>,
    #[serde(default, rename = "discord_channels")]
    pub discord_ids: Vec<String>,
    #[serde(default, rename = "hangouts_chat_webhooks")]
    pub hangouts_chat_webhook_ids: Vec<String>,
    #[serde(default, rename = "microsoft_teams_webhooks")]
    pub ms_teams_webhook_ids: Vec<String>,
    #[serde(default, rename = "mattermost_webhooks")]
    pub mattermost_webhook_ids: Vec<String>,
    #[serde(default, rename = "rocketchat_webhooks")]
    pub rocketchat_webhook_ids: Vec<String>,
    #[serde(default, rename = "matrix_rooms")]
    pub matrix_room_ids: Vec<String>,
    #[serde(default, rename = "webhooks")]
    pub webhook_ids: Vec<String>,
    #[serde(default, rename = "exclude_version_regexp")]
    pub exclusions: Vec<Exclusion>,
    #[serde(default)]
    pub exclude_prereleases: bool,
    #[serde(default)]
    pub exclude_updated: bool,
    #[serde(default)]
    pub note: String,
    #[serde(default, rename = "tags")]
    pub tag_ids: Vec<String>,
}

impl Project {
    /// Email notification frequency, if one other than `none` is set.
    pub fn email(&self) -> Option<EmailNotification> {
        self.email_notification
            .filter(|e| *e != EmailNotification::None)
    }

    pub fn excluded_regexps(&self) -> Vec<String> {
        self.exclusions
            .iter()
            .filter(|e| !e.inverse)
            .map(|e| e.value.clone())
            .collect()
    }

    pub fn included_regexps(&self) -> Vec<String> {
        self.exclusions
            .iter()
            .filter(|e| e.inverse)
            .map(|e| e.value.clone())
            .collect()
    }
}

/// Partial project update body.
///
/// `None` leaves a field untouched, `Some(vec![])` removes every value and a
/// populated list replaces the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notification: Option<EmailNotification>,
    #[serde(rename = "slack_channels", skip_serializing_if = "Option::is_none")]
    pub slack_ids: Option<Vec<String>>,
    #[serde(rename = "telegram_chats", skip_serializing_if = "Option::is_none")]
    pub telegram_chat_ids: Option<Vec<String>>,
    #[serde(rename = "discord_channels", skip_serializing_if = "Option::is_none")]
    pub discord_ids: Option<Vec<String>>,
    #[serde(
        rename = "hangouts_chat_webhooks",
        skip_serializing_if = "Option::is_none"
    )]
    pub hangouts_chat_webhook_ids: Option<Vec<String>>,
    #[serde(
        rename = "microsoft_teams_webhooks",
        skip_serializing_if = "Option::is_none"
    )]
    pub ms_teams_webhook_ids: Option<Vec<String>>,
    #[serde(rename = "mattermost_webhooks", skip_serializing_if = "Option::is_none")]
    pub mattermost_webhook_ids: Option<Vec<String>>,
    #[serde(rename = "rocketchat_webhooks", skip_serializing_if = "Option::is_none")]
    pub rocketchat_webhook_ids: Option<Vec<String>>,
    #[serde(rename = "matrix_rooms", skip_serializing_if = "Option::is_none")]
    pub matrix_room_ids: Option<Vec<String>>,
    #[serde(rename = "webhooks", skip_serializing_if = "Option::is_none")]
    pub webhook_ids: Option<Vec<String>>,
    #[serde(
        rename = "exclude_version_regexp",
        skip_serializing_if = "Option::is_none"
    )]
    pub exclusions: Option<Vec<Exclusion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_prereleases: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_updated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "tags", skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProjectListOrder {
    Updated,
    Added,
    Name,
}

impl ProjectListOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectListOrder::Updated => "updated",
            ProjectListOrder::Added => "added",
            ProjectListOrder::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectListOptions {
    pub page: u32,
    pub provider: Option<String>,
    pub order: Option<ProjectListOrder>,
}

/// A project addressed either by its ID or by provider and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    Id(String),
    Name { provider: String, name: String },
}

impl ProjectRef {
    /// Builds a reference from `[PROJECT_ID]` or `[PROVIDER PROJECT_NAME]`.
    pub fn from_args(args: &[String]) -> Option<Self> {
        match args {
            [id] => Some(ProjectRef::Id(id.clone())),
            [provider, name] => Some(ProjectRef::Name {
                provider: provider.clone(),
                name: name.clone(),
            }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            ProjectRef::Id(id) => format!("v1/projects/{id}"),
            ProjectRef::Name { provider, name } => format!("v1/projects/{provider}/{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_prerelease: bool,
    #[serde(default)]
    pub is_updated: bool,
    #[serde(default)]
    pub is_excluded: bool,
    #[serde(default)]
    pub has_note: bool,
    #[serde(default)]
    pub cve: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackChannel {
    pub id: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramChat {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub chat_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordChannel {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRoom {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub homeserver_url: String,
    #[serde(default)]
    pub internal_room_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthKeysResponse {
    #[serde(default)]
    pub keys: Vec<AuthKey>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleasesResponse {
    #[serde(default)]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersResponse {
    #[serde(default)]
    pub providers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddProjectRequest<'a> {
    pub provider: &'a str,
    pub name: &'a str,
    #[serde(flatten)]
    pub options: &'a ProjectOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackChannelsResponse {
    #[serde(default)]
    pub channels: Vec<SlackChannel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChatsResponse {
    #[serde(default)]
    pub chats: Vec<TelegramChat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordChannelsResponse {
    #[serde(default)]
    pub channels: Vec<DiscordChannel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhooksResponse {
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRoomsResponse {
    #[serde(default)]
    pub rooms: Vec<MatrixRoom>,
}

/// Error body returned by the API on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Tabled)]
pub struct AuthKeySelectionRow {
    #[tabled(rename = "")]
    pub row: usize,
    #[tabled(rename = "Name")]
    pub name: String,
}

#[derive(Tabled)]
pub struct AuthKeyTableRow {
    #[tabled(rename = "")]
    pub row: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Authorized Networks")]
    pub authorized_networks: String,
}

#[derive(Tabled)]
pub struct ReleaseTableRow {
    #[tabled(rename = "Version")]
    pub version: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Pre-Release")]
    pub prerelease: String,
    #[tabled(rename = "Has Note")]
    pub has_note: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
    #[tabled(rename = "Excluded")]
    pub excluded: String,
    #[tabled(rename = "CVE")]
    pub cve: String,
}

#[derive(Tabled)]
pub struct ProviderTableRow {
    #[tabled(rename = "")]
    pub row: usize,
    #[tabled(rename = "Name")]
    pub name: String,
}

#[derive(Tabled)]
pub struct SlackChannelTableRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Workspace")]
    pub workspace: String,
    #[tabled(rename = "Channel")]
    pub channel: String,
}

#[derive(Tabled)]
pub struct TelegramChatTableRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Chat")]
    pub chat: String,
    #[tabled(rename = "Type")]
    pub chat_type: String,
}

/// Row for entities that only carry an ID and a name.
#[derive(Tabled)]
pub struct NamedTableRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
}

#[derive(Tabled)]
pub struct MatrixRoomTableRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Homeserver URL")]
    pub homeserver_url: String,
    #[tabled(rename = "Internal Room ID")]
    pub internal_room_id: String,
}
