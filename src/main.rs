use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use eventdesk_application::{error::AppError, prelude as flows, InFlightActions};
use eventdesk_boundary::legacy::LegacyEvent;
use eventdesk_core::{
    entities::{EmailAddress, Session},
    usecases::{ApprovalKind, SubmitOutcome},
};
use eventdesk_db_jfs::Connections;
use eventdesk_gateways::{
    media::LocalMediaStore,
    message::{Message, MessageSink},
    notify::Notify,
    send_to_json_file::SendToJsonFile,
};

mod adapters;
mod config;

use adapters::json;

#[derive(Parser)]
#[command(name = "eventdesk", version, about = "Review and publish community events")]
struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Email address of the acting user
    #[arg(long = "as", value_name = "EMAIL", global = true)]
    user: Option<String>,

    /// Act with administrator privileges
    #[arg(long, global = true)]
    admin: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a new event or an edit of an existing event (JSON file)
    Submit {
        file: PathBuf,
        /// The event to edit
        #[arg(long)]
        id: Option<String>,
    },
    /// Approve an event or its pending edit
    Approve { id: String },
    /// Print the stored event and its pending edit
    Show { id: String },
    /// Print the review presentation of an event
    Review { id: String },
    /// List all events that await a review
    Pending,
    /// Import events of the legacy storage layout (JSON file)
    ImportLegacy { file: PathBuf },
    /// Export all events in the legacy storage layout
    ExportLegacy {
        /// Write into this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Delivers messages into the log if no outbox is configured.
struct LogMessages;

impl MessageSink for LogMessages {
    fn deliver(&self, recipients: &[EmailAddress], message: &Message) {
        for to in recipients {
            log::info!("Message to {}: {}", to, message.subject);
        }
    }
}

fn session(cli: &Cli) -> Result<Session> {
    let email = cli
        .user
        .as_deref()
        .ok_or_else(|| anyhow!("Missing --as <EMAIL>"))?;
    let email = email
        .parse::<EmailAddress>()
        .map_err(|_| anyhow!("Invalid email address '{email}'"))?;
    Ok(if cli.admin {
        Session::admin(email)
    } else {
        Session::organizer(email)
    })
}

fn notify(cfg: &config::Notifications) -> Result<Notify> {
    let notify_on = cfg.notify_on.clone();
    let reviewers = cfg.reviewers.clone();
    let notify = match &cfg.json_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let sink = SendToJsonFile::try_new(dir)?;
            log::info!("Writing notifications to {}", sink.path().display());
            Notify::new(sink, notify_on, reviewers)
        }
        None => Notify::new(LogMessages, notify_on, reviewers),
    };
    Ok(notify)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T> {
    let json = fs::read_to_string(file).with_context(|| format!("Unable to read {}", file.display()))?;
    Ok(serde_json::from_str(&json)?)
}

fn explain(err: AppError) -> anyhow::Error {
    match err.parameter() {
        Some(param) if param.is_validation() => anyhow!("Invalid submission: {param}"),
        _ => err.into(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::Config::try_load_from_file_or_default(cli.config.as_ref())?;
    let connections = Connections::init(&cfg.store.dir, cfg.store.pretty)?;
    let in_flight = InFlightActions::default();

    match &cli.command {
        Command::Submit { file, id } => {
            let session = session(&cli)?;
            let new_event = json::from_json::new_event(read_json(file)?);
            let media = LocalMediaStore::new(
                &cfg.media.root,
                cfg.media.paths.upload_folder(),
                cfg.media.max_file_size,
            );
            let notify = notify(&cfg.notifications)?;
            let outcome = flows::submit_event(
                &connections,
                &in_flight,
                &media,
                &notify,
                &session,
                id.as_deref(),
                new_event,
            )
            .map_err(explain)?;
            match &outcome {
                SubmitOutcome::Created(event) => println!("Created event {}", event.id),
                SubmitOutcome::Updated(event) => println!("Updated event {}", event.id),
                SubmitOutcome::Drafted { event, .. } => {
                    println!("Submitted edit of event {} for review", event.id)
                }
            }
        }
        Command::Approve { id } => {
            let session = session(&cli)?;
            let notify = notify(&cfg.notifications)?;
            let approval = flows::approve(&connections, &in_flight, &notify, &session, id)?;
            match approval.kind {
                ApprovalKind::Event => println!("Approved event {}", approval.event.id),
                ApprovalKind::Edit => println!(
                    "Approved edit #{} of event {}",
                    approval.event.edit_count, approval.event.id
                ),
            }
        }
        Command::Show { id } => {
            let (event, draft) = flows::load_event(&connections, id)?;
            let event = json::Event::from(event);
            let draft = draft.map(json::Draft::from);
            print_json(&serde_json::json!({ "event": event, "draft": draft }))?;
        }
        Command::Review { id } => {
            let presentation = flows::load_review(&connections, id, &cfg.media.paths)?;
            print_json(&json::to_json::review_presentation(presentation))?;
        }
        Command::Pending => {
            for event in flows::pending_reviews(&connections)? {
                println!("{}\t{}\t{}", event.id, event.state, event.title());
            }
        }
        Command::ImportLegacy { file } => {
            let records: Vec<LegacyEvent> = read_json(file)?;
            let count = flows::import_legacy_events(&connections, records)?;
            println!("Imported {count} event(s)");
        }
        Command::ExportLegacy { output } => {
            let records = flows::export_legacy_events(&connections)?;
            let json = serde_json::to_string_pretty(&records)?;
            match output {
                Some(file) => fs::write(file, json)?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    run(Cli::parse())
}
