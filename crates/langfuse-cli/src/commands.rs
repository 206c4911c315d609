use crate::args::{
    AuthCommand, Cli, Commands, DatasetsCommand, ExperimentsCommand, ObservationsCommand,
    PromptsCommand, ScoresCommand, SessionsCommand, TracesCommand,
};
use crate::context::ExecutionContext;
use crate::handlers;
use langfuse_core::{ConfigOverrides, RenderOptions};
use langfuse_types::Result;

pub fn run(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        host: cli.host,
        profile: cli.profile,
        ..Default::default()
    };
    let options = RenderOptions {
        json: cli.json,
        fields: cli.fields,
        jq: cli.jq,
        quiet: cli.quiet,
    };
    let ctx = ExecutionContext::new(overrides, options);

    match cli.command {
        Commands::Traces { command } => match command {
            TracesCommand::List {
                limit,
                user_id,
                session_id,
                tags,
                name,
                from,
                to,
            } => handlers::traces::list(&ctx, limit, user_id, session_id, tags, name, from, to),
            TracesCommand::Get { trace_id } => handlers::traces::get(&ctx, &trace_id),
            TracesCommand::Tree { trace_id } => handlers::traces::tree(&ctx, &trace_id),
        },

        Commands::Observations { command } => match command {
            ObservationsCommand::List {
                limit,
                trace_id,
                observation_type,
                name,
                from,
                to,
            } => handlers::observations::list(
                &ctx,
                limit,
                trace_id,
                observation_type,
                name,
                from,
                to,
            ),
        },

        Commands::Sessions { command } => match command {
            SessionsCommand::List { limit, from, to } => {
                handlers::sessions::list(&ctx, limit, from, to)
            }
            SessionsCommand::Get { session_id } => handlers::sessions::get(&ctx, &session_id),
        },

        Commands::Scores { command } => match command {
            ScoresCommand::List {
                limit,
                trace_id,
                name,
                from,
                to,
            } => handlers::scores::list(&ctx, limit, trace_id, name, from, to),
            ScoresCommand::Summary { name, from, to } => {
                handlers::scores::summary(&ctx, name, from, to)
            }
        },

        Commands::Prompts { command } => match command {
            PromptsCommand::List { limit } => handlers::prompts::list(&ctx, limit),
            PromptsCommand::Get {
                name,
                version,
                label,
            } => handlers::prompts::get(&ctx, &name, version, label.as_deref()),
            PromptsCommand::Compile {
                name,
                version,
                label,
                vars,
            } => handlers::prompts::compile(&ctx, &name, version, label.as_deref(), &vars),
            PromptsCommand::Diff { name, v1, v2 } => handlers::prompts::diff(&ctx, &name, v1, v2),
        },

        Commands::Datasets { command } => match command {
            DatasetsCommand::List { limit } => handlers::datasets::list(&ctx, limit),
            DatasetsCommand::Get { name, limit } => handlers::datasets::get(&ctx, &name, limit),
        },

        Commands::Experiments { command } => match command {
            ExperimentsCommand::List { dataset } => handlers::experiments::list(&ctx, &dataset),
            ExperimentsCommand::Compare {
                dataset,
                run1,
                run2,
            } => handlers::experiments::compare(&ctx, &dataset, &run1, &run2),
        },

        Commands::Auth { command } => match command {
            AuthCommand::Login {
                public_key,
                secret_key,
            } => handlers::auth::login(&ctx, public_key, secret_key),
            AuthCommand::Logout => handlers::auth::logout(&ctx),
            AuthCommand::Status => handlers::auth::status(&ctx),
        },
    }
}
