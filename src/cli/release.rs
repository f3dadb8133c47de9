use clap::{Args, Subcommand};
use tabled::{Table, builder::Builder, settings::Style};

use crate::{
    Res,
    api::{ApiError, ReleasesService},
    cli::ProjectRefArgs,
    config::Config,
    info,
    types::{ProjectRef, Release, ReleaseNote, ReleaseTableRow},
    utils, warning,
};

/// Width release notes are wrapped at.
const NOTE_WIDTH: usize = 80;

#[derive(Subcommand, Debug, Clone)]
pub enum ReleaseCommand {
    /// Get project releases
    List(ReleaseListArgs),

    /// Get information about a release
    Get(ReleaseVersionArgs),

    /// Get the latest non-excluded release of a project
    GetLatest(ProjectRefArgs),

    /// Get the release note of a release
    Note(ReleaseVersionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReleaseListArgs {
    #[command(flatten)]
    pub project: ProjectRefArgs,

    /// Page number
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Args, Debug, Clone)]
pub struct ReleaseVersionArgs {
    /// PROVIDER PROJECT_NAME VERSION or PROJECT_ID VERSION
    #[arg(value_name = "PROJECT VERSION", num_args = 2..=3, required = true)]
    pub args: Vec<String>,
}

impl ReleaseVersionArgs {
    pub fn split(&self) -> Res<(ProjectRef, &str)> {
        let (version, project) = self
            .args
            .split_last()
            .ok_or("expected a project and a version")?;
        let project = ProjectRef::from_args(project)
            .ok_or("expected PROVIDER PROJECT_NAME VERSION or PROJECT_ID VERSION")?;
        Ok((project, version.as_str()))
    }
}

pub fn releases_table(releases: &[Release]) -> String {
    let rows = releases.iter().map(|r| ReleaseTableRow {
        version: r.version.clone(),
        date: utils::format_release_date(&r.date),
        prerelease: utils::yes_no(r.is_prerelease).to_string(),
        has_note: utils::yes_no(r.has_note).to_string(),
        updated: utils::yes_no(r.is_updated).to_string(),
        excluded: utils::yes_no(r.is_excluded).to_string(),
        cve: utils::yes_no(!r.cve.is_empty()).to_string(),
    });
    Table::new(rows).to_string()
}

pub fn release_details(release: &Release) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Version:".to_string(), release.version.clone()]);
    builder.push_record(["Date:".to_string(), utils::format_release_date(&release.date)]);
    if release.is_prerelease {
        builder.push_record(["Pre-Release:", "yes"].map(String::from));
    }
    if release.has_note {
        builder.push_record(["Has Note:", "yes"].map(String::from));
    }
    if release.is_updated {
        builder.push_record(["Updated:", "yes"].map(String::from));
    }
    if release.is_excluded {
        builder.push_record(["Excluded:", "yes"].map(String::from));
    }
    if !release.cve.is_empty() {
        builder.push_record(["CVE:".to_string(), utils::join(&release.cve)]);
    }
    builder.build().with(Style::blank()).to_string()
}

/// Title, text rendered message and URL, each followed by a blank line.
pub fn release_note_text(note: &ReleaseNote) -> String {
    let mut text = String::new();
    for part in [note.title.clone(), render_html(&note.message), note.url.clone()] {
        let part = part.trim_end();
        if part.is_empty() {
            continue;
        }
        text.push_str(part);
        text.push_str("\n\n");
    }
    text
}

fn render_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    html2text::from_read(html.as_bytes(), NOTE_WIDTH)
}

pub async fn list_releases(config: &Config, args: ReleaseListArgs) -> Res<()> {
    let client = super::client(config)?;
    let project = args.project.project_ref()?;

    let result = utils::with_spinner(
        "Fetching releases...",
        client.list_releases(&project, args.page),
    )
    .await;
    let (releases, last_page) = match result {
        Ok(page) => page,
        Err(ApiError::NotFound) => (Vec::new(), 0),
        Err(e) => return Err(e.into()),
    };

    if releases.is_empty() {
        if args.page <= 1 {
            info!("No releases found.");
        } else {
            info!("No releases found on page {}.", args.page);
        }
        return Ok(());
    }

    println!("{}", releases_table(&releases));

    if args.page < last_page {
        info!("More releases on the next page...");
    }

    Ok(())
}

pub async fn get_release(config: &Config, args: ReleaseVersionArgs) -> Res<()> {
    let client = super::client(config)?;
    let (project, version) = args.split()?;

    match utils::with_spinner("Fetching release...", client.get_release(&project, version)).await
    {
        Ok(release) => println!("{}", release_details(&release)),
        Err(ApiError::NotFound) => warning!("Release not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn get_latest_release(config: &Config, args: ProjectRefArgs) -> Res<()> {
    let client = super::client(config)?;
    let project = args.project_ref()?;

    match utils::with_spinner("Fetching release...", client.get_latest_release(&project)).await {
        Ok(release) => println!("{}", release_details(&release)),
        Err(ApiError::NotFound) => warning!("Release not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn get_release_note(config: &Config, args: ReleaseVersionArgs) -> Res<()> {
    let client = super::client(config)?;
    let (project, version) = args.split()?;

    let result = utils::with_spinner(
        "Fetching release note...",
        client.get_release_note(&project, version),
    )
    .await;

    match result {
        Ok(note) => print!("{}", release_note_text(&note)),
        Err(ApiError::NotFound) => warning!("Release note not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
