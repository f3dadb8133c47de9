use clap::{Args, Subcommand};
use tabled::{builder::Builder, settings::Style};

use crate::{
    Res,
    api::{ApiError, ProjectsService},
    cli::ProjectRefArgs,
    config::Config,
    info, success,
    types::{EmailNotification, Project, ProjectListOptions, ProjectListOrder, ProjectOptions},
    utils, warning,
};

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// Get tracked projects
    List(ProjectListArgs),

    /// Search tracked projects by name
    Search(ProjectSearchArgs),

    /// Get information about a tracked project
    Get(ProjectRefArgs),

    /// Add a project to track
    Add(ProjectAddArgs),

    /// Update a tracked project
    Update(ProjectUpdateArgs),

    /// Remove a tracked project
    Remove(ProjectRefArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProjectListArgs {
    /// Page number
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Filter by provider
    #[arg(long)]
    pub provider: Option<String>,

    /// Sort projects; default updated
    #[arg(long, value_enum)]
    pub order: Option<ProjectListOrder>,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectSearchArgs {
    /// Project name, multiple words are joined with a space
    #[arg(required = true)]
    pub name: Vec<String>,

    /// Filter by provider
    #[arg(long)]
    pub provider: Option<String>,
}

/// Notification channel IDs accepted by both `add` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct ChannelArgs {
    /// Slack channel ID
    #[arg(long = "slack", value_name = "ID")]
    pub slack: Vec<String>,

    /// Telegram chat ID
    #[arg(long = "telegram", value_name = "ID")]
    pub telegram: Vec<String>,

    /// Discord channel ID
    #[arg(long = "discord", value_name = "ID")]
    pub discord: Vec<String>,

    /// Hangouts Chat webhook ID
    #[arg(long = "hangouts-chat", value_name = "ID")]
    pub hangouts_chat: Vec<String>,

    /// Microsoft Teams webhook ID
    #[arg(long = "microsoft-teams", value_name = "ID")]
    pub microsoft_teams: Vec<String>,

    /// Mattermost webhook ID
    #[arg(long = "mattermost", value_name = "ID")]
    pub mattermost: Vec<String>,

    /// Rocket.Chat webhook ID
    #[arg(long = "rocketchat", value_name = "ID")]
    pub rocketchat: Vec<String>,

    /// Matrix room ID
    #[arg(long = "matrix", value_name = "ID")]
    pub matrix: Vec<String>,

    /// Webhook ID
    #[arg(long = "webhook", value_name = "ID")]
    pub webhook: Vec<String>,

    /// Regex version exclusion, suffix with "-inverse" for inclusion
    #[arg(long = "regex-exclude", value_name = "REGEX")]
    pub regex_exclude: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectAddArgs {
    pub provider: String,

    pub name: String,

    /// Frequency of email notifications
    #[arg(long, value_enum, default_value_t = EmailNotification::None)]
    pub email: EmailNotification,

    #[command(flatten)]
    pub channels: ChannelArgs,

    /// Exclude pre-releases
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub exclude_prereleases: Option<bool>,

    /// Exclude updated
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub exclude_updated: Option<bool>,
}

impl ProjectAddArgs {
    pub fn options(&self) -> ProjectOptions {
        let channels = &self.channels;
        ProjectOptions {
            email_notification: Some(self.email),
            slack_ids: utils::list_option(false, channels.slack.clone()),
            telegram_chat_ids: utils::list_option(false, channels.telegram.clone()),
            discord_ids: utils::list_option(false, channels.discord.clone()),
            hangouts_chat_webhook_ids: utils::list_option(false, channels.hangouts_chat.clone()),
            ms_teams_webhook_ids: utils::list_option(false, channels.microsoft_teams.clone()),
            mattermost_webhook_ids: utils::list_option(false, channels.mattermost.clone()),
            rocketchat_webhook_ids: utils::list_option(false, channels.rocketchat.clone()),
            matrix_room_ids: utils::list_option(false, channels.matrix.clone()),
            webhook_ids: utils::list_option(false, channels.webhook.clone()),
            exclusions: utils::list_option(
                false,
                utils::parse_exclusions(&channels.regex_exclude),
            ),
            exclude_prereleases: self.exclude_prereleases,
            exclude_updated: self.exclude_updated,
            note: None,
            tag_ids: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ProjectUpdateArgs {
    #[command(flatten)]
    pub project: ProjectRefArgs,

    /// Frequency of email notifications
    #[arg(long, value_enum)]
    pub email: Option<EmailNotification>,

    #[command(flatten)]
    pub channels: ChannelArgs,

    /// Remove all Slack channels
    #[arg(long)]
    pub slack_remove: bool,

    /// Remove all Telegram chats
    #[arg(long)]
    pub telegram_remove: bool,

    /// Remove all Discord channels
    #[arg(long)]
    pub discord_remove: bool,

    /// Remove all Hangouts Chat webhooks
    #[arg(long)]
    pub hangouts_chat_remove: bool,

    /// Remove all Microsoft Teams webhooks
    #[arg(long)]
    pub microsoft_teams_remove: bool,

    /// Remove all Mattermost webhooks
    #[arg(long)]
    pub mattermost_remove: bool,

    /// Remove all Rocket.Chat webhooks
    #[arg(long)]
    pub rocketchat_remove: bool,

    /// Remove all Matrix rooms
    #[arg(long)]
    pub matrix_remove: bool,

    /// Remove all webhooks
    #[arg(long)]
    pub webhook_remove: bool,

    /// Remove all regex version exclusions
    #[arg(long)]
    pub regex_exclude_remove: bool,

    /// Exclude pre-releases
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub exclude_prereleases: Option<bool>,

    /// Exclude updated
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub exclude_updated: Option<bool>,

    /// Tag ID
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long)]
    pub tag_remove: bool,

    /// Project note, an empty value removes it
    #[arg(long)]
    pub note: Option<String>,
}

impl ProjectUpdateArgs {
    /// Builds the partial update body. Only given flags end up in it.
    pub fn options(&self) -> ProjectOptions {
        let channels = &self.channels;
        ProjectOptions {
            email_notification: self.email,
            slack_ids: utils::list_option(self.slack_remove, channels.slack.clone()),
            telegram_chat_ids: utils::list_option(self.telegram_remove, channels.telegram.clone()),
            discord_ids: utils::list_option(self.discord_remove, channels.discord.clone()),
            hangouts_chat_webhook_ids: utils::list_option(
                self.hangouts_chat_remove,
                channels.hangouts_chat.clone(),
            ),
            ms_teams_webhook_ids: utils::list_option(
                self.microsoft_teams_remove,
                channels.microsoft_teams.clone(),
            ),
            mattermost_webhook_ids: utils::list_option(
                self.mattermost_remove,
                channels.mattermost.clone(),
            ),
            rocketchat_webhook_ids: utils::list_option(
                self.rocketchat_remove,
                channels.rocketchat.clone(),
            ),
            matrix_room_ids: utils::list_option(self.matrix_remove, channels.matrix.clone()),
            webhook_ids: utils::list_option(self.webhook_remove, channels.webhook.clone()),
            exclusions: utils::list_option(
                self.regex_exclude_remove,
                utils::parse_exclusions(&channels.regex_exclude),
            ),
            exclude_prereleases: self.exclude_prereleases,
            exclude_updated: self.exclude_updated,
            note: self.note.clone(),
            tag_ids: utils::list_option(self.tag_remove, self.tags.clone()),
        }
    }
}

/// An optional project field, shown only when populated.
struct Column {
    title: &'static str,
    label: &'static str,
    value: fn(&Project) -> String,
}

fn flag(value: bool) -> String {
    if value { "yes".to_string() } else { String::new() }
}

fn optional_columns() -> [Column; 15] {
    [
        Column {
            title: "Email",
            label: "Email:",
            value: |p| p.email().map(|e| e.to_string()).unwrap_or_default(),
        },
        Column {
            title: "Slack",
            label: "Slack:",
            value: |p| utils::join(&p.slack_ids),
        },
        Column {
            title: "Telegram",
            label: "Telegram:",
            value: |p| utils::join(&p.telegram_chat_ids),
        },
        Column {
            title: "Discord",
            label: "Discord:",
            value: |p| utils::join(&p.discord_ids),
        },
        Column {
            title: "Hangouts Chat",
            label: "Hangouts Chat:",
            value: |p| utils::join(&p.hangouts_chat_webhook_ids),
        },
        Column {
            title: "Microsoft Teams",
            label: "Microsoft Teams:",
            value: |p| utils::join(&p.ms_teams_webhook_ids),
        },
        Column {
            title: "Mattermost",
            label: "Mattermost:",
            value: |p| utils::join(&p.mattermost_webhook_ids),
        },
        Column {
            title: "Rocket.Chat",
            label: "Rocket.Chat:",
            value: |p| utils::join(&p.rocketchat_webhook_ids),
        },
        Column {
            title: "Matrix",
            label: "Matrix:",
            value: |p| utils::join(&p.matrix_room_ids),
        },
        Column {
            title: "Webhook",
            label: "Webhooks:",
            value: |p| utils::join(&p.webhook_ids),
        },
        Column {
            title: "Regex Exclude",
            label: "Regex Exclude:",
            value: |p| utils::join(&p.excluded_regexps()),
        },
        Column {
            title: "Regex Exclude Inverse",
            label: "Regex Exclude Inverse:",
            value: |p| utils::join(&p.included_regexps()),
        },
        Column {
            title: "Exclude Pre-Releases",
            label: "Exclude Pre-Releases:",
            value: |p| flag(p.exclude_prereleases),
        },
        Column {
            title: "Exclude Updated",
            label: "Exclude Updated:",
            value: |p| flag(p.exclude_updated),
        },
        Column {
            title: "Tags",
            label: "Tags:",
            value: |p| utils::join(&p.tag_ids),
        },
    ]
}

/// Renders projects with the always present ID, name and provider columns
/// followed by the optional columns at least one project has a value for.
pub fn projects_table(projects: &[Project]) -> String {
    let all = optional_columns();
    let columns: Vec<&Column> = all
        .iter()
        .filter(|column| projects.iter().any(|p| !(column.value)(p).is_empty()))
        .collect();

    let mut builder = Builder::default();

    let mut header = vec!["ID".to_string(), "Name".to_string(), "Provider".to_string()];
    header.extend(columns.iter().map(|column| column.title.to_string()));
    builder.push_record(header);

    for project in projects {
        let mut record = vec![
            project.id.clone(),
            project.name.clone(),
            project.provider.clone(),
        ];
        record.extend(columns.iter().map(|column| (column.value)(project)));
        builder.push_record(record);
    }

    builder.build().to_string()
}

/// Renders a single project as label and value rows.
pub fn project_details(project: &Project) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID:".to_string(), project.id.clone()]);
    builder.push_record(["Name:".to_string(), project.name.clone()]);
    builder.push_record(["Provider:".to_string(), project.provider.clone()]);
    if !project.url.is_empty() {
        builder.push_record(["URL:".to_string(), project.url.clone()]);
    }

    for column in optional_columns() {
        let value = (column.value)(project);
        if !value.is_empty() {
            builder.push_record([column.label.to_string(), value]);
        }
    }

    if !project.note.is_empty() {
        builder.push_record(["Note:".to_string(), project.note.clone()]);
    }

    builder.build().with(Style::blank()).to_string()
}

pub async fn list_projects(config: &Config, args: ProjectListArgs) -> Res<()> {
    let client = super::client(config)?;
    let options = ProjectListOptions {
        page: args.page,
        provider: args.provider,
        order: args.order,
    };

    let result = utils::with_spinner("Fetching projects...", client.list_projects(&options)).await;
    let (projects, last_page) = match result {
        Ok(page) => page,
        Err(ApiError::NotFound) => (Vec::new(), 0),
        Err(e) => return Err(e.into()),
    };

    if projects.is_empty() {
        if options.page <= 1 {
            info!("No projects found.");
        } else {
            info!("No projects found on page {}.", options.page);
        }
        return Ok(());
    }

    println!("{}", projects_table(&projects));

    if options.page < last_page {
        info!("More projects on the next page...");
    }

    Ok(())
}

pub async fn search_projects(config: &Config, args: ProjectSearchArgs) -> Res<()> {
    let client = super::client(config)?;
    let query = args.name.join(" ");

    let projects = utils::with_spinner(
        "Searching projects...",
        client.search_projects(&query, args.provider.as_deref()),
    )
    .await?;

    if projects.is_empty() {
        info!("No projects found.");
        return Ok(());
    }

    println!("{}", projects_table(&projects));
    Ok(())
}

pub async fn get_project(config: &Config, args: ProjectRefArgs) -> Res<()> {
    let client = super::client(config)?;
    let project_ref = args.project_ref()?;

    match utils::with_spinner("Fetching project...", client.get_project(&project_ref)).await {
        Ok(project) => println!("{}", project_details(&project)),
        Err(ApiError::NotFound) => warning!("Project not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn add_project(config: &Config, args: ProjectAddArgs) -> Res<()> {
    let client = super::client(config)?;
    let options = args.options();

    let project = utils::with_spinner(
        "Adding project...",
        client.add_project(&args.provider, &args.name, &options),
    )
    .await?;

    success!("Project {}/{} added.", project.provider, project.name);
    println!("{}", project_details(&project));
    Ok(())
}

pub async fn update_project(config: &Config, args: ProjectUpdateArgs) -> Res<()> {
    let client = super::client(config)?;
    let project_ref = args.project.project_ref()?;
    let options = args.options();

    let result = utils::with_spinner(
        "Updating project...",
        client.update_project(&project_ref, &options),
    )
    .await;

    match result {
        Ok(project) => {
            success!("Project {}/{} updated.", project.provider, project.name);
            println!("{}", project_details(&project));
        }
        Err(ApiError::NotFound) => warning!("Project not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn remove_project(config: &Config, args: ProjectRefArgs) -> Res<()> {
    let client = super::client(config)?;
    let project_ref = args.project_ref()?;

    match utils::with_spinner("Removing project...", client.delete_project(&project_ref)).await {
        Ok(()) => success!("Project removed."),
        Err(ApiError::NotFound) => warning!("Project not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
