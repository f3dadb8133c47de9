use std::{path::PathBuf, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use newreleases::{
    Res,
    api::WebhookKind,
    cli::{
        self,
        auth::AuthCommand,
        integrations::{self, IntegrationCommand},
        project::{self, ProjectCommand},
        provider::{self, ProviderCommand},
        release::{self, ReleaseCommand},
        tag::{self, TagCommand},
    },
    config::{self, API_ENDPOINT_ENV, AUTH_KEY_ENV, Config, ConfigOverrides, TIMEOUT_ENV},
    error, utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Config file (default is $HOME/.newreleases.yaml)
    #[clap(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API auth key
    #[clap(long, global = true, env = AUTH_KEY_ENV, hide_env_values = true)]
    auth_key: Option<String>,

    /// API request timeout, for example 30s or 1m (default 30s)
    #[clap(long, global = true, env = TIMEOUT_ENV, value_parser = utils::parse_timeout)]
    timeout: Option<Duration>,

    /// API endpoint
    #[clap(long, global = true, hide = true, env = API_ENDPOINT_ENV)]
    api_endpoint: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Get API auth key and store it in the configuration
    GetAuthKey,

    /// Provide configuration values to be stored in a file
    Configure,

    /// Information about API authentication
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Manage tracked projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Get releases for tracked projects
    #[command(subcommand)]
    Release(ReleaseCommand),

    /// Get project providers
    #[command(subcommand)]
    Provider(ProviderCommand),

    /// Manage project tags
    #[command(subcommand)]
    Tag(TagCommand),

    /// Slack channels for notifications
    #[command(subcommand)]
    Slack(IntegrationCommand),

    /// Telegram chats for notifications
    #[command(subcommand)]
    Telegram(IntegrationCommand),

    /// Discord channels for notifications
    #[command(subcommand)]
    Discord(IntegrationCommand),

    /// Hangouts Chat webhooks for notifications
    #[command(subcommand)]
    HangoutsChat(IntegrationCommand),

    /// Microsoft Teams webhooks for notifications
    #[command(subcommand)]
    MicrosoftTeams(IntegrationCommand),

    /// Mattermost webhooks for notifications
    #[command(subcommand)]
    Mattermost(IntegrationCommand),

    /// Rocket.Chat webhooks for notifications
    #[command(subcommand)]
    Rocketchat(IntegrationCommand),

    /// Matrix rooms for notifications
    #[command(subcommand)]
    Matrix(IntegrationCommand),

    /// Custom webhooks for notifications
    #[command(subcommand)]
    Webhook(IntegrationCommand),

    /// Print version
    Version,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    config::load_env();
    init_tracing();

    let opts = Cli::parse();

    if let Err(e) = run(opts).await {
        error!("{}", e);
    }
}

async fn run(opts: Cli) -> Res<()> {
    match &opts.command {
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load(ConfigOverrides {
        config_path: opts.config,
        auth_key: opts.auth_key,
        timeout: opts.timeout,
        api_endpoint: opts.api_endpoint,
    })
    .await?;
    tracing::debug!(
        path = %config.path.display(),
        timeout = ?config.timeout,
        "configuration loaded"
    );

    match opts.command {
        Command::GetAuthKey => cli::get_auth_key(&config).await,
        Command::Configure => cli::configure(&config).await,
        Command::Auth(AuthCommand::List) => cli::list_auth_keys(&config).await,

        Command::Project(command) => match command {
            ProjectCommand::List(args) => project::list_projects(&config, args).await,
            ProjectCommand::Search(args) => project::search_projects(&config, args).await,
            ProjectCommand::Get(args) => project::get_project(&config, args).await,
            ProjectCommand::Add(args) => project::add_project(&config, args).await,
            ProjectCommand::Update(args) => project::update_project(&config, args).await,
            ProjectCommand::Remove(args) => project::remove_project(&config, args).await,
        },

        Command::Release(command) => match command {
            ReleaseCommand::List(args) => release::list_releases(&config, args).await,
            ReleaseCommand::Get(args) => release::get_release(&config, args).await,
            ReleaseCommand::GetLatest(args) => release::get_latest_release(&config, args).await,
            ReleaseCommand::Note(args) => release::get_release_note(&config, args).await,
        },

        Command::Provider(ProviderCommand::List(args)) => {
            provider::list_providers(&config, args).await
        }

        Command::Tag(command) => match command {
            TagCommand::List => tag::list_tags(&config).await,
            TagCommand::Get(args) => tag::get_tag(&config, args).await,
            TagCommand::Add(args) => tag::add_tag(&config, args).await,
            TagCommand::Update(args) => tag::update_tag(&config, args).await,
            TagCommand::Remove(args) => tag::remove_tag(&config, args).await,
        },

        Command::Slack(IntegrationCommand::List) => {
            integrations::list_slack_channels(&config).await
        }
        Command::Telegram(IntegrationCommand::List) => {
            integrations::list_telegram_chats(&config).await
        }
        Command::Discord(IntegrationCommand::List) => {
            integrations::list_discord_channels(&config).await
        }
        Command::Matrix(IntegrationCommand::List) => {
            integrations::list_matrix_rooms(&config).await
        }
        Command::HangoutsChat(IntegrationCommand::List) => {
            integrations::list_webhooks(&config, WebhookKind::HangoutsChat).await
        }
        Command::MicrosoftTeams(IntegrationCommand::List) => {
            integrations::list_webhooks(&config, WebhookKind::MicrosoftTeams).await
        }
        Command::Mattermost(IntegrationCommand::List) => {
            integrations::list_webhooks(&config, WebhookKind::Mattermost).await
        }
        Command::Rocketchat(IntegrationCommand::List) => {
            integrations::list_webhooks(&config, WebhookKind::Rocketchat).await
        }
        Command::Webhook(IntegrationCommand::List) => {
            integrations::list_webhooks(&config, WebhookKind::Custom).await
        }

        Command::Version | Command::Completions(_) => Ok(()),
    }
}
