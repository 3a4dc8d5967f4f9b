#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]
// Output is the whole point of this binary.
#![allow(clippy::print_stdout)]

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use contact_manager::client::api::DEFAULT_API_URL;
use contact_manager::client::render::{render_form, render_list};
use contact_manager::client::{ContactsView, Event, HttpContactsApi, Outcome};
use contact_manager::domain::validation::Field;
use contact_manager::telemetry;
use std::io::{BufRead, Write};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(version, about = "Manage contacts through the contact-manager API", long_about = None)]
struct Cli {
    /// Base URL of the contacts endpoint
    #[arg(long, env = "CONTACTS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct FieldArgs {
    /// Full name
    #[arg(long)]
    name: Option<String>,
    /// Email address
    #[arg(long)]
    email: Option<String>,
    /// Phone number, digits only
    #[arg(long)]
    phone: Option<String>,
    /// Free-form notes
    #[arg(long)]
    message: Option<String>,
}

impl FieldArgs {
    fn changes(self) -> Vec<(Field, String)> {
        [(Field::Name, self.name), (Field::Email, self.email), (Field::Phone, self.phone), (Field::Message, self.message)]
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show contacts, newest first
    List {
        /// Filter by name (case-insensitive) or phone substring
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Create a contact
    Add(FieldArgs),
    /// Change fields of an existing contact
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a contact
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn fill_and_submit(
    view: &mut ContactsView,
    api: &HttpContactsApi,
    changes: Vec<(Field, String)>,
) -> anyhow::Result<()> {
    for (field, value) in changes {
        if view.dispatch(api, Event::ChangeField(field, value.clone())).await == Outcome::Ignored {
            bail!("{field} does not accept {value:?}");
        }
    }

    match view.dispatch(api, Event::Submit).await {
        Outcome::Saved(contact) => {
            println!("Saved {} ({})", contact.name, contact.id);
            Ok(())
        }
        _ => {
            print!("{}", render_form(view));
            bail!("contact was not saved")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(telemetry::env_filter("warn")).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let api = HttpContactsApi::new(cli.api_url);
    let mut view = ContactsView::new();
    view.dispatch(&api, Event::Load).await;

    match cli.command {
        Command::List { search } => {
            view.dispatch(&api, Event::Search(search)).await;
        }
        Command::Add(fields) => {
            fill_and_submit(&mut view, &api, fields.changes()).await?;
        }
        Command::Edit { id, fields } => {
            if view.dispatch(&api, Event::Edit(id)).await == Outcome::Ignored {
                bail!("no contact with id {id}");
            }
            fill_and_submit(&mut view, &api, fields.changes()).await?;
        }
        Command::Delete { id, yes } => {
            let Outcome::AwaitingConfirmation(prompt) = view.dispatch(&api, Event::RequestDelete(id)).await else {
                bail!("delete could not be requested");
            };
            let event = if yes || confirm(prompt).context("reading confirmation")? {
                Event::ConfirmDelete
            } else {
                Event::CancelDelete
            };
            match view.dispatch(&api, event).await {
                Outcome::Deleted(id) => println!("Deleted {id}"),
                Outcome::Failed => bail!("{}", view.notice().unwrap_or("delete failed")),
                _ => println!("Cancelled"),
            }
        }
    }

    print!("{}", render_list(&view));
    Ok(())
}
