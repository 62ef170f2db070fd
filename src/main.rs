//! Skill Directory CLI
//!
//! Manages accounts, the skill catalog and per-account skills in the local
//! single-table store. Every command prints JSON on stdout.
//!
//! ## Usage
//!
//! ```bash
//! # Write a default config.toml into the storage directory
//! skill-directory init-config
//!
//! # Catalog
//! skill-directory catalog add go --name Go --category Programming --tag systems
//! skill-directory catalog update go --category Backend
//!
//! # Accounts and skills
//! skill-directory account add jane --name "Jane Doe"
//! skill-directory skill add jane go --level advanced --years 6
//! skill-directory skill endorse jane go
//!
//! # Index queries
//! skill-directory query --category Programming --skill go --level Advanced --min-years 5 --max-years 10
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use skill_directory::{
    open_store, Backend, CatalogSkillChanges, Config, NewAccount, NewAccountSkill,
    NewCatalogSkill, ProficiencyLevel, SkillCategory, SkillDirectory, SkillQuery,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "skill-directory")]
#[command(about = "Account and skill directory on a single-table store")]
struct Args {
    /// Path to config file
    #[arg(short, long, env = "SKILL_DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Storage directory
    #[arg(long, env = "SKILL_DIRECTORY_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Store backend (sled or memory)
    #[arg(long, env = "SKILL_DIRECTORY_BACKEND")]
    backend: Option<Backend>,

    /// Re-sync denormalized skill copies after catalog edits
    #[arg(long)]
    resync: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the effective config to <storage-dir>/config.toml
    InitConfig,
    /// Skill catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),
    /// Accounts
    #[command(subcommand)]
    Account(AccountCommand),
    /// Skills held by accounts
    #[command(subcommand)]
    Skill(SkillCommand),
    /// Query account skills through the category index
    Query {
        #[arg(long)]
        category: SkillCategory,
        #[arg(long)]
        skill: Option<String>,
        #[arg(long)]
        level: Option<ProficiencyLevel>,
        #[arg(long, requires = "max_years")]
        min_years: Option<u32>,
        #[arg(long, requires = "min_years")]
        max_years: Option<u32>,
    },
    /// Rewrite stale copies of a catalog entry's name and category
    Resync {
        #[arg(long)]
        skill: String,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    Add {
        skill_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    List,
    Update {
        skill_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replaces all tags when given
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    Add {
        handle: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    List,
    /// Profile plus skill records of one account
    Show { handle: String },
}

#[derive(Subcommand, Debug)]
enum SkillCommand {
    Add {
        handle: String,
        skill_id: String,
        #[arg(long)]
        level: String,
        #[arg(long, default_value_t = 0)]
        years: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    Endorse {
        handle: String,
        skill_id: String,
    },
    Remove {
        handle: String,
        skill_id: String,
    },
    List { handle: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("skill_directory=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(dir) = args.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if args.resync {
        config.resync_on_catalog_update = true;
    }

    if let Command::InitConfig = args.command {
        tokio::fs::create_dir_all(&config.storage_dir).await?;
        let path = config.config_path();
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        config.save(&path)?;
        info!(path = %path.display(), "Created default config");
        return print_json(&config);
    }

    info!(
        storage_dir = %config.storage_dir.display(),
        backend = %config.backend,
        "Opening skill directory"
    );

    let handle = open_store(&config).await?;
    let directory = SkillDirectory::from_config(handle.store(), &config);
    let result = run(&directory, args.command).await;

    handle.flush().await?;
    result
}

async fn run(directory: &SkillDirectory, command: Command) -> anyhow::Result<()> {
    let store = directory.store();
    match command {
        Command::InitConfig => bail!("init-config does not open the store"),

        Command::Catalog(CatalogCommand::Add {
            skill_id,
            name,
            category,
            description,
            tags,
        }) => {
            let skill = directory
                .add_catalog_skill(NewCatalogSkill {
                    skill_id,
                    display_name: name,
                    description,
                    category,
                    tags,
                })
                .await?;
            print_json(&skill)
        }
        Command::Catalog(CatalogCommand::List) => print_json(&store.list_catalog_skills().await?),
        Command::Catalog(CatalogCommand::Update {
            skill_id,
            name,
            category,
            description,
            tags,
        }) => {
            let changes = CatalogSkillChanges {
                display_name: name,
                description,
                category,
                tags: (!tags.is_empty()).then_some(tags),
            };
            print_json(&directory.edit_catalog_skill(&skill_id, changes).await?)
        }

        Command::Account(AccountCommand::Add {
            handle,
            name,
            email,
        }) => {
            let account = directory
                .register_account(NewAccount {
                    handle,
                    display_name: name,
                    email,
                    ..Default::default()
                })
                .await?;
            print_json(&account)
        }
        Command::Account(AccountCommand::List) => print_json(&store.list_accounts().await?),
        Command::Account(AccountCommand::Show { handle }) => {
            print_json(&store.account_records(&handle).await?)
        }

        Command::Skill(SkillCommand::Add {
            handle,
            skill_id,
            level,
            years,
            notes,
        }) => {
            let input = NewAccountSkill {
                proficiency: level,
                years_of_experience: years,
                last_used: None,
                notes,
            };
            print_json(&directory.add_skill(&handle, &skill_id, input).await?)
        }
        Command::Skill(SkillCommand::Endorse { handle, skill_id }) => {
            print_json(&directory.endorse(&handle, &skill_id).await?)
        }
        Command::Skill(SkillCommand::Remove { handle, skill_id }) => {
            directory.remove_skill(&handle, &skill_id).await?;
            print_json(&serde_json::json!({ "removed": format!("{handle}/{skill_id}") }))
        }
        Command::Skill(SkillCommand::List { handle }) => {
            print_json(&store.list_account_skills(&handle).await?)
        }

        Command::Query {
            category,
            skill,
            level,
            min_years,
            max_years,
        } => {
            let mut query = SkillQuery::new(category);
            if let Some(skill) = &skill {
                query = query.with_skill(skill);
            }
            if let Some(level) = level {
                query = query.with_level(level);
            }
            if let (Some(min), Some(max)) = (min_years, max_years) {
                query = query.with_years(min, max);
            }
            print_json(&directory.find(&query).await?)
        }

        Command::Resync { skill } => print_json(&directory.resync(&skill).await?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
