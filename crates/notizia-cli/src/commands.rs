use super::args::{
    CaseCommand, Cli, ClientCommand, Commands, QueryCommand, ReportCommand, SessionCommand,
};
use super::handlers;
use crate::output::Printer;
use crate::types::LogLevel;
use anyhow::Result;
use notizia_runtime::{Practice, resolve_workspace_path};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_new(level.to_string())
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level)?;
    let printer = Printer::new(cli.format);

    if let Commands::Demo = cli.command {
        return handlers::demo::handle(&printer);
    }

    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    tracing::debug!(path = %data_dir.display(), "opening practice");
    let mut practice = Practice::open(&data_dir)?;

    match cli.command {
        Commands::Client { command } => match command {
            ClientCommand::Add {
                name,
                gender,
                age,
                anamnesis,
            } => handlers::client::add(&mut practice, name, gender, age, anamnesis, &printer),
            ClientCommand::List { search } => handlers::client::list(&practice, search, &printer),
            ClientCommand::Update {
                id,
                name,
                gender,
                age,
                anamnesis,
            } => handlers::client::update(
                &mut practice,
                id,
                name,
                gender,
                age,
                anamnesis,
                &printer,
            ),
            ClientCommand::Delete { id } => handlers::client::delete(&mut practice, id, &printer),
            ClientCommand::Show { id } => handlers::client::show(&practice, id, &printer),
        },

        Commands::Case { command } => match command {
            CaseCommand::Add {
                client_id,
                problem,
                text,
                started_at,
                status,
                severity,
            } => handlers::case::add(
                &mut practice,
                handlers::case::AddCase {
                    client_id,
                    problem,
                    text,
                    started_at,
                    status,
                    severity,
                },
                &printer,
            ),
            CaseCommand::List { client_id } => handlers::case::list(&practice, client_id, &printer),
            CaseCommand::Status { id, status } => {
                handlers::case::set_status(&mut practice, id, status, &printer)
            }
            CaseCommand::Delete { id } => handlers::case::delete(&mut practice, id, &printer),
        },

        Commands::Session { command } => match command {
            SessionCommand::Add {
                case_id,
                method,
                started_at,
                duration,
                sud_before,
                sud_after,
                insights,
                notes,
            } => handlers::session::add(
                &mut practice,
                handlers::session::AddSession {
                    case_id,
                    method,
                    started_at,
                    duration,
                    sud_before,
                    sud_after,
                    insights,
                    notes,
                },
                &printer,
            ),
            SessionCommand::List { case_id } => {
                handlers::session::list(&practice, case_id, &printer)
            }
            SessionCommand::Delete { id } => {
                handlers::session::delete(&mut practice, id, &printer)
            }
        },

        Commands::Sessions => handlers::session::list_all(&practice, &printer),

        Commands::Report { command } => match command {
            ReportCommand::Run { saved, filters } => {
                handlers::report::run(&practice, saved, &filters, &printer)
            }
            ReportCommand::Crosstab { kind, filters } => {
                handlers::report::crosstab(&practice, kind, &filters, &printer)
            }
            ReportCommand::Export {
                as_format,
                anonymize,
                closed_only,
                no_sessions,
                output,
                filters,
            } => handlers::report::export(
                &practice,
                handlers::report::ExportArgs {
                    format: as_format,
                    anonymize,
                    closed_only,
                    no_sessions,
                    output,
                },
                &filters,
                &printer,
            ),
        },

        Commands::Query { command } => match command {
            QueryCommand::Save { name, filters } => {
                handlers::query::save(&practice, &name, &filters, &printer)
            }
            QueryCommand::List => handlers::query::list(&practice, &printer),
            QueryCommand::Delete { name } => handlers::query::delete(&practice, &name, &printer),
        },

        Commands::Demo => handlers::demo::handle(&printer),
    }
}
