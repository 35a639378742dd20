mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use catalog_store::{
    CatalogStore, FileStorage, Icon, Link, LinkGroup, LinkGroupKey, MainCategory, NavConfig,
    WorkflowFields, WorkflowType, WorkflowUrl,
};
use nav_search::{build_dashboard, filter_workflows, ExpansionState, SearchIndex, SearchSession};

type Store = CatalogStore<FileStorage>;

#[derive(Parser)]
#[command(name = "devnav")]
#[command(about = "Personal navigation dashboard for development links and workflows")]
#[command(version)]
struct Cli {
    /// Directory holding the catalog documents (defaults to ~/.devnav)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show favorites and the catalog grouped by main category
    List {
        /// Category id to expand, repeatable
        #[arg(long)]
        expand: Vec<String>,
        /// Expand every category
        #[arg(long)]
        expand_all: bool,
    },
    /// Filter links by name, pinyin, initials or url
    Search {
        query: Option<String>,
        /// Read queries from stdin, refiltering after the debounce window
        #[arg(long, short)]
        interactive: bool,
    },
    /// Print every link in catalog order
    Links,
    /// Manage favorite links
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
    /// Manage main categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage link groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },
    /// Manage workflows
    Workflow {
        #[command(subcommand)]
        action: WorkflowAction,
    },
}

#[derive(Subcommand)]
enum FavAction {
    List,
    /// Add the link, or remove it if its url is already a favorite
    Toggle {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
    },
    Remove { url: String },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Insert, or replace the category with the same id
    Upsert {
        /// Omit to generate a new id
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category and every link group under it
    Delete { id: String },
}

#[derive(Subcommand)]
enum GroupAction {
    /// Insert, or replace the group with the same name and main category
    Upsert {
        #[arg(long)]
        name: String,
        #[arg(long = "main")]
        main_category: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Link as name=url, repeatable
        #[arg(long = "link", value_parser = parse_pair)]
        links: Vec<(String, String)>,
        /// Replace the group currently stored under this name (rename)
        #[arg(long, requires = "original_main")]
        original_category: Option<String>,
        #[arg(long, requires = "original_category")]
        original_main: Option<String>,
    },
    Delete {
        name: String,
        #[arg(long = "main")]
        main_category: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Permanent,
    Temporary,
}

impl From<TypeArg> for WorkflowType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Permanent => WorkflowType::Permanent,
            TypeArg::Temporary => WorkflowType::Temporary,
        }
    }
}

#[derive(Subcommand)]
enum WorkflowAction {
    List {
        /// Substring over name, description, tags and urls
        #[arg(long, short)]
        search: Option<String>,
        /// Only list workflows of this type
        #[arg(long = "type", value_enum)]
        workflow_type: Option<TypeArg>,
        /// Show the archive instead
        #[arg(long)]
        archived: bool,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "type", value_enum, default_value = "permanent")]
        workflow_type: TypeArg,
        /// URL as name=url, repeatable
        #[arg(long = "url", value_parser = parse_pair)]
        urls: Vec<(String, String)>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit fields; anything not given keeps its current value
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type", value_enum)]
        workflow_type: Option<TypeArg>,
        /// Replaces all urls when given
        #[arg(long = "url", value_parser = parse_pair)]
        urls: Vec<(String, String)>,
        /// Replaces all tags when given
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Move to the archive
    Delete { id: Uuid },
    /// Move back from the archive
    Restore { id: Uuid },
    /// Remove from the archive permanently
    Purge { id: Uuid },
    /// Flip completion of a temporary workflow
    Toggle { id: Uuid },
    /// Open every url of the workflow in the browser
    Open { id: Uuid },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, url)| (name.trim().to_string(), url.trim().to_string()))
        .ok_or_else(|| format!("expected name=url, got '{}'", raw))
}

fn parse_icon(name: Option<&str>) -> anyhow::Result<Icon> {
    match name {
        None => Ok(Icon::default()),
        Some(name) => Icon::from_name(name).ok_or_else(|| {
            let known: Vec<String> = Icon::ALL.into_iter().map(String::from).collect();
            anyhow!("unknown icon '{}', expected one of: {}", name, known.join(", "))
        }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_writer(io::stderr),
        )
        .init();

    let mut config = NavConfig::load();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    let storage = FileStorage::new(&config.data_dir);
    tracing::debug!("Using data directory {:?}", storage.base_path());

    let store = CatalogStore::open(storage).await;

    match cli.command {
        Commands::List { expand, expand_all } => list(&store, expand, expand_all).await,
        Commands::Search { query, interactive } => {
            if interactive {
                interactive_search(&store, &config).await
            } else {
                search(&store, query.as_deref().unwrap_or_default()).await
            }
        }
        Commands::Links => links(&store).await,
        Commands::Fav { action } => favorites(&store, action).await,
        Commands::Category { action } => category(&store, action).await,
        Commands::Group { action } => group(&store, action).await,
        Commands::Workflow { action } => workflow(&store, action).await,
    }
}

async fn list(store: &Store, expand: Vec<String>, expand_all: bool) -> anyhow::Result<()> {
    let snapshot = store.snapshot().await;
    let mut expansion = ExpansionState::new();
    for id in expand {
        expansion.expand(id);
    }
    if expand_all {
        for category in &snapshot.nav.main_categories {
            expansion.expand(category.id.clone());
        }
        for group in &snapshot.nav.dev_links {
            expansion.expand(group.main_category.clone());
        }
    }

    let index = SearchIndex::new(&snapshot.nav.dev_links);
    let sections = build_dashboard(&snapshot.nav.main_categories, &index.search(""), &expansion);

    render::print_favorites(&snapshot.favorites);
    render::print_sections(&sections, &snapshot.favorites);
    Ok(())
}

async fn search(store: &Store, raw_query: &str) -> anyhow::Result<()> {
    let snapshot = store.snapshot().await;
    let index = SearchIndex::new(&snapshot.nav.dev_links);
    let results = index.search(raw_query);

    println!(
        "{}",
        format!("{} links match '{}'", results.total_links(), raw_query.trim()).green()
    );
    let sections = build_dashboard(&snapshot.nav.main_categories, &results, &ExpansionState::new());
    render::print_sections(&sections, &snapshot.favorites);

    let buckets = filter_workflows(raw_query, &snapshot.workflows);
    if results.is_filtered() && !buckets.is_empty() {
        render::print_workflow_buckets(&buckets);
    }
    Ok(())
}

async fn interactive_search(store: &Store, config: &NavConfig) -> anyhow::Result<()> {
    let snapshot = store.snapshot().await;
    let mut session = SearchSession::new(&snapshot.nav.dev_links, config.debounce_window());

    println!("{}", "🔎 Type to filter, 'exit' to leave".cyan().bold());
    print!("{} ", ">".cyan());
    io::stdout().flush()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = session.deadline();
        let wake_at = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().eq_ignore_ascii_case("exit") || line.trim().eq_ignore_ascii_case("quit") {
                    break;
                }
                session.type_query(line, Instant::now());
            }
            _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
                if session.poll(Instant::now()) {
                    let results = session.results();
                    let sections =
                        build_dashboard(&snapshot.nav.main_categories, results, &ExpansionState::new());
                    println!(
                        "{}",
                        format!("{} links match '{}'", results.total_links(), session.applied_query().trim())
                            .green()
                    );
                    render::print_sections(&sections, &snapshot.favorites);
                    print!("{} ", ">".cyan());
                    io::stdout().flush()?;
                }
            }
        }
    }

    println!("{}", "👋 Bye".cyan());
    Ok(())
}

async fn links(store: &Store) -> anyhow::Result<()> {
    for link in store.all_links().await {
        println!("{} {}", link.name, link.url.dimmed());
    }
    println!(
        "{}",
        format!("{} links", store.total_link_count().await).green()
    );
    Ok(())
}

async fn favorites(store: &Store, action: FavAction) -> anyhow::Result<()> {
    match action {
        FavAction::List => {
            let favorites = store.favorites().await;
            if favorites.is_empty() {
                println!("{}", "No favorites yet".dimmed());
            }
            render::print_favorites(&favorites);
        }
        FavAction::Toggle { name, url } => {
            if store.toggle_favorite(Link::new(name, url.clone())).await? {
                println!("{}", format!("★ Added {}", url).yellow());
            } else {
                println!("{}", format!("☆ Removed {}", url).dimmed());
            }
        }
        FavAction::Remove { url } => {
            if store.remove_favorite(&url).await? {
                println!("{}", format!("☆ Removed {}", url).dimmed());
            } else {
                println!("{}", format!("{} is not a favorite", url).yellow());
            }
        }
    }
    Ok(())
}

async fn category(store: &Store, action: CategoryAction) -> anyhow::Result<()> {
    match action {
        CategoryAction::Upsert {
            id,
            name,
            icon,
            description,
            color,
        } => {
            let mut category = MainCategory::new(id.unwrap_or_default(), name)
                .with_icon(parse_icon(icon.as_deref())?)
                .with_description(description);
            if let Some(color) = color {
                category = category.with_color(color);
            }
            let snapshot = store.upsert_category(category.clone()).await?;
            let saved = snapshot
                .nav
                .main_categories
                .iter()
                .rev()
                .find(|c| c.name == category.name && (category.id.is_empty() || c.id == category.id))
                .context("category missing after save")?;
            println!("{}", format!("✅ Saved category {} ({})", saved.name, saved.id).green());
        }
        CategoryAction::Delete { id } => {
            let removed = store.groups_in_category(&id).await.len();
            store.delete_category(&id).await?;
            println!(
                "{}",
                format!("🗑  Deleted category {} and {} link groups", id, removed).green()
            );
        }
    }
    Ok(())
}

async fn group(store: &Store, action: GroupAction) -> anyhow::Result<()> {
    match action {
        GroupAction::Upsert {
            name,
            main_category,
            icon,
            color,
            links,
            original_category,
            original_main,
        } => {
            let mut group = LinkGroup::new(name, main_category).with_icon(parse_icon(icon.as_deref())?);
            if let Some(color) = color {
                group = group.with_color(color);
            }
            for (link_name, url) in links {
                group = group.with_link(link_name, url);
            }

            let label = format!("{}/{}", group.main_category, group.category);
            match original_category.zip(original_main) {
                Some((name, main)) => {
                    let original = LinkGroupKey::new(name, main);
                    store.replace_link_group(&original, group).await?;
                }
                None => {
                    store.upsert_link_group(group).await?;
                }
            }
            println!("{}", format!("✅ Saved link group {}", label).green());
        }
        GroupAction::Delete {
            name,
            main_category,
        } => {
            store.delete_link_group(&name, &main_category).await?;
            println!(
                "{}",
                format!("🗑  Deleted link group {}/{}", main_category, name).green()
            );
        }
    }
    Ok(())
}

fn to_urls(pairs: Vec<(String, String)>) -> Vec<WorkflowUrl> {
    pairs
        .into_iter()
        .map(|(name, url)| WorkflowUrl::new(name, url))
        .collect()
}

async fn workflow(store: &Store, action: WorkflowAction) -> anyhow::Result<()> {
    match action {
        WorkflowAction::List {
            search,
            workflow_type,
            archived,
        } => {
            if archived {
                let archive = store.archived_workflows().await;
                println!("{}", format!("归档 ({})", archive.len()).cyan().bold());
                for workflow in &archive {
                    render::print_workflow(workflow);
                }
            } else {
                let workflows = match workflow_type {
                    Some(workflow_type) => store.workflows_by_type(workflow_type.into()).await,
                    None => store.workflows().await,
                };
                let buckets = filter_workflows(search.as_deref().unwrap_or_default(), &workflows);
                render::print_workflow_buckets(&buckets);
            }
        }
        WorkflowAction::Create {
            name,
            description,
            workflow_type,
            urls,
            tags,
        } => {
            let fields = WorkflowFields {
                name,
                description,
                urls: to_urls(urls),
                workflow_type: workflow_type.into(),
                tags,
            };
            let workflow = store.create_workflow(fields).await?;
            println!(
                "{}",
                format!("✅ Created workflow {} ({})", workflow.name, workflow.id).green()
            );
        }
        WorkflowAction::Update {
            id,
            name,
            description,
            workflow_type,
            urls,
            tags,
        } => {
            let current = store
                .workflow(id)
                .await
                .with_context(|| format!("workflow {} not found", id))?;
            let mut fields = WorkflowFields::from(&current);
            if let Some(name) = name {
                fields.name = name;
            }
            if let Some(description) = description {
                fields.description = description;
            }
            if let Some(workflow_type) = workflow_type {
                fields.workflow_type = workflow_type.into();
            }
            if !urls.is_empty() {
                fields.urls = to_urls(urls);
            }
            if !tags.is_empty() {
                fields.tags = tags;
            }
            let workflow = store.update_workflow(id, fields).await?;
            println!("{}", format!("✅ Updated workflow {}", workflow.name).green());
        }
        WorkflowAction::Delete { id } => {
            report(store.delete_workflow(id).await?, "Archived", id);
        }
        WorkflowAction::Restore { id } => {
            report(store.restore_workflow(id).await?, "Restored", id);
        }
        WorkflowAction::Purge { id } => {
            report(store.purge_archived(id).await?, "Purged", id);
        }
        WorkflowAction::Toggle { id } => {
            if !store.toggle_workflow_completion(id).await? {
                bail!("no temporary workflow {}", id);
            }
            if let Some(workflow) = store.workflow(id).await {
                let state = if workflow.completed { "completed" } else { "open" };
                println!("{}", format!("✅ {} is now {}", workflow.name, state).green());
            }
        }
        WorkflowAction::Open { id } => {
            let workflow = store
                .workflow(id)
                .await
                .with_context(|| format!("workflow {} not found", id))?;
            for url in workflow.open_targets() {
                match webbrowser::open(url) {
                    Ok(()) => println!("{} {}", "↗".blue(), url),
                    Err(e) => {
                        tracing::warn!("Failed to open {}: {}", url, e);
                        println!("{}", format!("❌ Could not open {}: {}", url, e).red());
                    }
                }
            }
        }
    }
    Ok(())
}

fn report(changed: bool, verb: &str, id: Uuid) {
    if changed {
        println!("{}", format!("✅ {} workflow {}", verb, id).green());
    } else {
        println!("{}", format!("No workflow {} to act on", id).yellow());
    }
}
