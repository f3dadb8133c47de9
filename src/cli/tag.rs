use clap::{Args, Subcommand};
use tabled::Table;

use crate::{
    Res,
    api::{ApiError, TagsService},
    config::Config,
    info, success,
    types::{NamedTableRow, Tag},
    utils, warning,
};

#[derive(Subcommand, Debug, Clone)]
pub enum TagCommand {
    /// Get all tags
    List,

    /// Get information about a tag
    Get(TagIdArgs),

    /// Add a new tag
    Add(TagAddArgs),

    /// Change the name of a tag
    Update(TagUpdateArgs),

    /// Remove a tag
    Remove(TagIdArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TagIdArgs {
    pub id: String,
}

#[derive(Args, Debug, Clone)]
pub struct TagAddArgs {
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct TagUpdateArgs {
    pub id: String,

    /// New tag name
    #[arg(long)]
    pub name: Option<String>,
}

pub fn tags_table(tags: &[Tag]) -> String {
    let rows = tags.iter().map(|tag| NamedTableRow {
        id: tag.id.clone(),
        name: tag.name.clone(),
    });
    Table::new(rows).to_string()
}

pub async fn list_tags(config: &Config) -> Res<()> {
    let client = super::client(config)?;
    let tags = utils::with_spinner("Fetching tags...", client.list_tags()).await?;

    if tags.is_empty() {
        info!("No tags found.");
        return Ok(());
    }

    println!("{}", tags_table(&tags));
    Ok(())
}

pub async fn get_tag(config: &Config, args: TagIdArgs) -> Res<()> {
    let client = super::client(config)?;

    match utils::with_spinner("Fetching tag...", client.get_tag(&args.id)).await {
        Ok(tag) => println!("{}", tags_table(&[tag])),
        Err(ApiError::NotFound) => warning!("Tag not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn add_tag(config: &Config, args: TagAddArgs) -> Res<()> {
    let client = super::client(config)?;
    let tag = utils::with_spinner("Adding tag...", client.add_tag(&args.name)).await?;

    success!("Tag {} added.", tag.name);
    println!("{}", tags_table(&[tag]));
    Ok(())
}

pub async fn update_tag(config: &Config, args: TagUpdateArgs) -> Res<()> {
    let Some(name) = args.name.filter(|n| !n.trim().is_empty()) else {
        warning!("Option --name is required.");
        return Ok(());
    };

    let client = super::client(config)?;

    match utils::with_spinner("Updating tag...", client.update_tag(&args.id, &name)).await {
        Ok(tag) => {
            success!("Tag {} updated.", tag.id);
            println!("{}", tags_table(&[tag]));
        }
        Err(ApiError::NotFound) => warning!("Tag not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn remove_tag(config: &Config, args: TagIdArgs) -> Res<()> {
    let client = super::client(config)?;

    match utils::with_spinner("Removing tag...", client.delete_tag(&args.id)).await {
        Ok(()) => success!("Tag removed."),
        Err(ApiError::NotFound) => warning!("Tag not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
