use anyhow::Result;
use backend_api::BackendApi;
use clap::{Parser, Subcommand};
use common::ClientConfig;
use dotenvy::dotenv;
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about = "Command-line access to the learning backend's handlers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a page of questions for the quiz player
    Questions {
        /// Comma separated numeric skill ids
        skill_ids:      String,
        question_count: String,
        #[arg(long)]
        start_cursor:   Option<String>,
    },
    /// Show the editing rights on a skill
    SkillRights { skill_id: String },
    /// Create a new topic
    CreateTopic {
        name:             String,
        abbreviated_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let _guard = common::logging_stdout();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    info!(base_url = %config.base_url, "backend client configured");
    let api = BackendApi::from_config(&config)?;

    let output = match cli.command {
        Command::Questions {
            skill_ids,
            question_count,
            start_cursor,
        } => {
            let questions = api
                .questions
                .fetch_questions(&skill_ids, &question_count, start_cursor.as_deref())
                .await?;
            serde_json::to_string_pretty(&questions)?
        }
        Command::SkillRights { skill_id } => {
            let rights = api.skill_rights.load_skill_rights(&skill_id).await?;
            serde_json::to_string_pretty(&rights)?
        }
        Command::CreateTopic {
            name,
            abbreviated_name,
        } => {
            let created = api.topics.create_topic(&name, &abbreviated_name).await?;
            serde_json::to_string_pretty(&created)?
        }
    };
    println!("{output}");

    Ok(())
}
