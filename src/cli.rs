//! Command-line surface: one subcommand group per API resource.
//!
//! Every command resolves configuration, builds a client, calls one endpoint
//! function, and prints the JSON result. Failures are printed as
//! `{"error": "..."}` on stderr with a non-zero exit code.

use crate::client::Client;
use crate::config::{self, Overrides};
use crate::endpoints::{
    calendars, contacts, conversations, locations, objects, opportunities, workflows,
};
use crate::error::{Error, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

/// GoHighLevel CRM from the command line
#[derive(Parser, Debug)]
#[command(name = "ghl", version, about)]
pub struct Cli {
    /// API key (or set GHL_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Location id (or set GHL_LOCATION_ID)
    #[arg(long, global = true)]
    pub location_id: Option<String>,

    /// Named profile from the config file
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Contact management
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Conversation management
    #[command(subcommand)]
    Conversations(ConversationsCommand),
    /// Opportunity management
    #[command(subcommand)]
    Opportunities(OpportunitiesCommand),
    /// Calendar management
    #[command(subcommand)]
    Calendars(CalendarsCommand),
    /// Workflow management
    #[command(subcommand)]
    Workflows(WorkflowsCommand),
    /// Custom object management
    #[command(subcommand)]
    Objects(ObjectsCommand),
    /// Location (sub-account) management
    #[command(subcommand)]
    Locations(LocationsCommand),
}

/// JSON payload for create/update commands, inline or from a file.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Inline JSON payload
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Path to a JSON file payload
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn read(&self) -> Result<Value> {
        match (&self.data, &self.file) {
            (Some(data), _) => Ok(serde_json::from_str(data)?),
            (None, Some(path)) => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }
            (None, None) => Err(Error::Config("must provide --data or --file".into())),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ContactsCommand {
    /// List contacts
    List {
        /// Limit number of results
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Search query
        #[arg(long)]
        query: Option<String>,
        /// Comma-separated fields to include
        #[arg(long)]
        fields: Option<String>,
        /// Verbosity level
        #[arg(short = 'v', long, action = ArgAction::Count)]
        verbose: u8,
    },
    /// Get a contact by ID
    Get {
        contact_id: String,
        /// Comma-separated fields to include
        #[arg(long)]
        fields: Option<String>,
        /// Verbosity level
        #[arg(short = 'v', long, action = ArgAction::Count)]
        verbose: u8,
    },
    /// Create a contact
    Create {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Update a contact
    Update {
        contact_id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a contact
    Delete { contact_id: String },
    /// Search contacts
    Search {
        /// Search query
        #[arg(long)]
        query: String,
        /// Comma-separated fields to include
        #[arg(long)]
        fields: Option<String>,
        /// Verbosity level
        #[arg(short = 'v', long, action = ArgAction::Count)]
        verbose: u8,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConversationsCommand {
    /// List conversations
    List {
        /// Limit number of results
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Search query
        #[arg(long)]
        query: Option<String>,
        /// Filter by status (all, read, unread, starred, recents)
        #[arg(long)]
        status: Option<String>,
    },
    /// Get a conversation by ID
    Get { conversation_id: String },
    /// Create a conversation
    Create {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Update a conversation
    Update {
        conversation_id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a conversation
    Delete { conversation_id: String },
    /// Get messages for a conversation
    Messages {
        conversation_id: String,
        /// Limit number of messages
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum OpportunitiesCommand {
    /// List opportunities
    List {
        /// Limit number of results
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Search query
        #[arg(long)]
        query: Option<String>,
        /// Filter by pipeline ID
        #[arg(long)]
        pipeline_id: Option<String>,
        /// Filter by status (open, won, lost, abandoned, all)
        #[arg(long)]
        status: Option<String>,
    },
    /// Get an opportunity by ID
    Get { opportunity_id: String },
    /// Create an opportunity
    Create {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Update an opportunity
    Update {
        opportunity_id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete an opportunity
    Delete { opportunity_id: String },
    /// List pipelines
    Pipelines,
}

#[derive(Subcommand, Debug)]
pub enum CalendarsCommand {
    /// List calendars
    List {
        /// Filter by group ID
        #[arg(long)]
        group_id: Option<String>,
    },
    /// Get a calendar by ID
    Get { calendar_id: String },
    /// Create a calendar
    Create {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Update a calendar
    Update {
        calendar_id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a calendar
    Delete { calendar_id: String },
    /// List calendar events
    Events {
        /// Start time (epoch millis)
        #[arg(long)]
        start_time: String,
        /// End time (epoch millis)
        #[arg(long)]
        end_time: String,
        /// Filter by calendar ID
        #[arg(long)]
        calendar_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkflowsCommand {
    /// List workflows
    List,
}

#[derive(Subcommand, Debug)]
pub enum ObjectsCommand {
    /// List object schemas
    ListSchemas,
    /// Get object schema by key
    GetSchema { key: String },
    /// List records for a schema
    List {
        schema_key: String,
        /// Limit number of results
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Search query
        #[arg(long)]
        query: Option<String>,
    },
    /// Get a record by ID
    Get {
        schema_key: String,
        record_id: String,
    },
    /// Create a record
    Create {
        schema_key: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Update a record
    Update {
        schema_key: String,
        record_id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a record
    Delete {
        schema_key: String,
        record_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum LocationsCommand {
    /// List locations
    List {
        /// Limit number of results
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Skip number of results
        #[arg(long, default_value_t = 0)]
        skip: u32,
        /// Filter by email
        #[arg(long)]
        email: Option<String>,
        /// Filter by company ID
        #[arg(long)]
        company_id: Option<String>,
    },
    /// Get a location by ID
    Get {
        // Named `id` so the global --location-id doesn't clash.
        #[arg(value_name = "LOCATION_ID")]
        id: String,
    },
    /// Create a location
    Create {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Update a location
    Update {
        #[arg(value_name = "LOCATION_ID")]
        id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a location
    Delete {
        #[arg(value_name = "LOCATION_ID")]
        id: String,
        /// Delete the associated Twilio account
        #[arg(long)]
        delete_twilio_account: bool,
    },
}

/// Run one command and report its result.
pub async fn run(cli: Cli) -> ExitCode {
    match run_inner(cli).await {
        Ok(value) => {
            let out = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| value.to_string());
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
            ExitCode::FAILURE
        }
    }
}

async fn run_inner(cli: Cli) -> Result<Value> {
    let overrides = Overrides {
        api_key: cli.api_key.clone(),
        location_id: cli.location_id.clone(),
    };
    let settings = config::resolve(&overrides, cli.profile.as_deref())?;

    let api_key = settings
        .api_key
        .ok_or_else(|| Error::Config("API key is missing".into()))?;

    let mut client = Client::new(api_key)?.with_oauth(
        settings.client_id,
        settings.client_secret,
        settings.refresh_token,
    );
    if let Some(location_id) = settings.location_id {
        client = client.with_location_id(location_id);
    }

    dispatch(cli.command, &mut client).await
}

async fn dispatch(command: Commands, client: &mut Client) -> Result<Value> {
    match command {
        Commands::Contacts(command) => match command {
            ContactsCommand::List {
                limit,
                query,
                fields,
                verbose,
            } => {
                contacts::list_contacts(client, limit, query.as_deref(), fields.as_deref(), verbose)
                    .await
            }
            ContactsCommand::Get {
                contact_id,
                fields,
                verbose,
            } => contacts::get_contact(client, &contact_id, fields.as_deref(), verbose).await,
            ContactsCommand::Create { payload } => {
                contacts::create_contact(client, &payload.read()?).await
            }
            ContactsCommand::Update {
                contact_id,
                payload,
            } => contacts::update_contact(client, &contact_id, &payload.read()?).await,
            ContactsCommand::Delete { contact_id } => {
                contacts::delete_contact(client, &contact_id).await
            }
            ContactsCommand::Search {
                query,
                fields,
                verbose,
            } => contacts::search_contacts(client, &query, fields.as_deref(), verbose).await,
        },
        Commands::Conversations(command) => match command {
            ConversationsCommand::List {
                limit,
                query,
                status,
            } => {
                conversations::list_conversations(
                    client,
                    limit,
                    query.as_deref(),
                    status.as_deref(),
                    None,
                )
                .await
            }
            ConversationsCommand::Get { conversation_id } => {
                conversations::get_conversation(client, &conversation_id).await
            }
            ConversationsCommand::Create { payload } => {
                conversations::create_conversation(client, &payload.read()?).await
            }
            ConversationsCommand::Update {
                conversation_id,
                payload,
            } => {
                conversations::update_conversation(client, &conversation_id, &payload.read()?)
                    .await
            }
            ConversationsCommand::Delete { conversation_id } => {
                conversations::delete_conversation(client, &conversation_id).await
            }
            ConversationsCommand::Messages {
                conversation_id,
                limit,
            } => conversations::get_messages(client, &conversation_id, limit).await,
        },
        Commands::Opportunities(command) => match command {
            OpportunitiesCommand::List {
                limit,
                query,
                pipeline_id,
                status,
            } => {
                opportunities::list_opportunities(
                    client,
                    limit,
                    query.as_deref(),
                    pipeline_id.as_deref(),
                    status.as_deref(),
                )
                .await
            }
            OpportunitiesCommand::Get { opportunity_id } => {
                opportunities::get_opportunity(client, &opportunity_id).await
            }
            OpportunitiesCommand::Create { payload } => {
                opportunities::create_opportunity(client, &payload.read()?).await
            }
            OpportunitiesCommand::Update {
                opportunity_id,
                payload,
            } => {
                opportunities::update_opportunity(client, &opportunity_id, &payload.read()?).await
            }
            OpportunitiesCommand::Delete { opportunity_id } => {
                opportunities::delete_opportunity(client, &opportunity_id).await
            }
            OpportunitiesCommand::Pipelines => opportunities::list_pipelines(client).await,
        },
        Commands::Calendars(command) => match command {
            CalendarsCommand::List { group_id } => {
                calendars::list_calendars(client, None, group_id.as_deref()).await
            }
            CalendarsCommand::Get { calendar_id } => {
                calendars::get_calendar(client, &calendar_id).await
            }
            CalendarsCommand::Create { payload } => {
                calendars::create_calendar(client, &payload.read()?).await
            }
            CalendarsCommand::Update {
                calendar_id,
                payload,
            } => calendars::update_calendar(client, &calendar_id, &payload.read()?).await,
            CalendarsCommand::Delete { calendar_id } => {
                calendars::delete_calendar(client, &calendar_id).await
            }
            CalendarsCommand::Events {
                start_time,
                end_time,
                calendar_id,
            } => {
                calendars::list_events(
                    client,
                    &start_time,
                    &end_time,
                    calendar_id.as_deref(),
                    None,
                    None,
                )
                .await
            }
        },
        Commands::Workflows(command) => match command {
            WorkflowsCommand::List => workflows::list_workflows(client, None).await,
        },
        Commands::Objects(command) => match command {
            ObjectsCommand::ListSchemas => objects::list_schemas(client, None).await,
            ObjectsCommand::GetSchema { key } => objects::get_schema(client, &key, None).await,
            ObjectsCommand::List {
                schema_key,
                limit,
                query,
            } => objects::list_records(client, &schema_key, limit, query.as_deref(), None).await,
            ObjectsCommand::Get {
                schema_key,
                record_id,
            } => objects::get_record(client, &schema_key, &record_id).await,
            ObjectsCommand::Create {
                schema_key,
                payload,
            } => objects::create_record(client, &schema_key, &payload.read()?).await,
            ObjectsCommand::Update {
                schema_key,
                record_id,
                payload,
            } => objects::update_record(client, &schema_key, &record_id, &payload.read()?).await,
            ObjectsCommand::Delete {
                schema_key,
                record_id,
            } => objects::delete_record(client, &schema_key, &record_id).await,
        },
        Commands::Locations(command) => match command {
            LocationsCommand::List {
                limit,
                skip,
                email,
                company_id,
            } => {
                locations::list_locations(
                    client,
                    limit,
                    skip,
                    email.as_deref(),
                    company_id.as_deref(),
                )
                .await
            }
            LocationsCommand::Get { id } => locations::get_location(client, &id).await,
            LocationsCommand::Create { payload } => {
                locations::create_location(client, &payload.read()?).await
            }
            LocationsCommand::Update { id, payload } => {
                locations::update_location(client, &id, &payload.read()?).await
            }
            LocationsCommand::Delete {
                id,
                delete_twilio_account,
            } => locations::delete_location(client, &id, delete_twilio_account).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_contacts_list_defaults() {
        let cli = Cli::try_parse_from(["ghl", "contacts", "list"]).unwrap();
        if let Commands::Contacts(ContactsCommand::List {
            limit,
            query,
            fields,
            verbose,
        }) = cli.command
        {
            assert_eq!(limit, 20);
            assert!(query.is_none());
            assert!(fields.is_none());
            assert_eq!(verbose, 0);
        } else {
            panic!("Expected contacts list");
        }
    }

    #[test]
    fn test_parse_contacts_list_flags() {
        let cli = Cli::try_parse_from([
            "ghl", "contacts", "list", "--limit", "50", "--query", "ada", "-vv",
        ])
        .unwrap();
        if let Commands::Contacts(ContactsCommand::List { limit, query, verbose, .. }) = cli.command
        {
            assert_eq!(limit, 50);
            assert_eq!(query.as_deref(), Some("ada"));
            assert_eq!(verbose, 2);
        } else {
            panic!("Expected contacts list");
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "ghl",
            "--api-key",
            "k",
            "--location-id",
            "loc",
            "--profile",
            "staging",
            "workflows",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.location_id.as_deref(), Some("loc"));
        assert_eq!(cli.profile.as_deref(), Some("staging"));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["ghl", "contacts", "list", "--api-key", "k"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_parse_contacts_create_with_data() {
        let cli = Cli::try_parse_from([
            "ghl", "contacts", "create", "--data", r#"{"email":"a@b.c"}"#,
        ])
        .unwrap();
        if let Commands::Contacts(ContactsCommand::Create { payload }) = cli.command {
            assert!(payload.data.is_some());
            assert!(payload.file.is_none());
        } else {
            panic!("Expected contacts create");
        }
    }

    #[test]
    fn test_data_and_file_conflict() {
        let result = Cli::try_parse_from([
            "ghl", "contacts", "create", "--data", "{}", "--file", "x.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_conversations_messages() {
        let cli = Cli::try_parse_from([
            "ghl", "conversations", "messages", "conv_1", "--limit", "5",
        ])
        .unwrap();
        if let Commands::Conversations(ConversationsCommand::Messages {
            conversation_id,
            limit,
        }) = cli.command
        {
            assert_eq!(conversation_id, "conv_1");
            assert_eq!(limit, 5);
        } else {
            panic!("Expected conversations messages");
        }
    }

    #[test]
    fn test_parse_opportunities_pipelines() {
        let cli = Cli::try_parse_from(["ghl", "opportunities", "pipelines"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Opportunities(OpportunitiesCommand::Pipelines)
        ));
    }

    #[test]
    fn test_parse_calendars_events_requires_times() {
        let result = Cli::try_parse_from(["ghl", "calendars", "events"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "ghl",
            "calendars",
            "events",
            "--start-time",
            "1700000000000",
            "--end-time",
            "1700090000000",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Calendars(CalendarsCommand::Events { .. })
        ));
    }

    #[test]
    fn test_parse_objects_subcommands() {
        let cli = Cli::try_parse_from(["ghl", "objects", "list-schemas"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Objects(ObjectsCommand::ListSchemas)
        ));

        let cli = Cli::try_parse_from(["ghl", "objects", "get-schema", "pets"]).unwrap();
        if let Commands::Objects(ObjectsCommand::GetSchema { key }) = cli.command {
            assert_eq!(key, "pets");
        } else {
            panic!("Expected objects get-schema");
        }

        let cli = Cli::try_parse_from(["ghl", "objects", "get", "pets", "rec_1"]).unwrap();
        if let Commands::Objects(ObjectsCommand::Get {
            schema_key,
            record_id,
        }) = cli.command
        {
            assert_eq!(schema_key, "pets");
            assert_eq!(record_id, "rec_1");
        } else {
            panic!("Expected objects get");
        }
    }

    #[test]
    fn test_parse_locations_delete_flag() {
        let cli = Cli::try_parse_from([
            "ghl",
            "locations",
            "delete",
            "loc_1",
            "--delete-twilio-account",
        ])
        .unwrap();
        if let Commands::Locations(LocationsCommand::Delete {
            id,
            delete_twilio_account,
        }) = cli.command
        {
            assert_eq!(id, "loc_1");
            assert!(delete_twilio_account);
        } else {
            panic!("Expected locations delete");
        }
    }

    #[test]
    fn test_payload_read_inline() {
        let payload = PayloadArgs {
            data: Some(r#"{"name":"Ada"}"#.into()),
            file: None,
        };
        assert_eq!(payload.read().unwrap()["name"], "Ada");
    }

    #[test]
    fn test_payload_read_rejects_missing_input() {
        let payload = PayloadArgs {
            data: None,
            file: None,
        };
        assert!(matches!(payload.read(), Err(Error::Config(_))));
    }

    #[test]
    fn test_payload_read_invalid_json() {
        let payload = PayloadArgs {
            data: Some("not json".into()),
            file: None,
        };
        assert!(matches!(payload.read(), Err(Error::Json(_))));
    }
}
