use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse traces")]
    Traces {
        #[command(subcommand)]
        command: TracesCommand,
    },

    #[command(about = "Browse observations (spans, generations, events)")]
    Observations {
        #[command(subcommand)]
        command: ObservationsCommand,
    },

    #[command(about = "Browse sessions")]
    Sessions {
        #[command(subcommand)]
        command: SessionsCommand,
    },

    #[command(about = "Browse and aggregate scores")]
    Scores {
        #[command(subcommand)]
        command: ScoresCommand,
    },

    #[command(about = "Browse, compile, and diff prompts")]
    Prompts {
        #[command(subcommand)]
        command: PromptsCommand,
    },

    #[command(about = "Browse datasets and their items")]
    Datasets {
        #[command(subcommand)]
        command: DatasetsCommand,
    },

    #[command(about = "Browse experiment runs on datasets")]
    Experiments {
        #[command(subcommand)]
        command: ExperimentsCommand,
    },

    #[command(about = "Manage stored credentials")]
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand)]
pub enum TracesCommand {
    #[command(about = "List recent traces")]
    List {
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        #[arg(short = 'u', long)]
        user_id: Option<String>,

        #[arg(short = 's', long)]
        session_id: Option<String>,

        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(long, help = "Only traces at or after this time (RFC 3339 or YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long, help = "Only traces before this time (RFC 3339 or YYYY-MM-DD)")]
        to: Option<String>,
    },

    #[command(about = "Show one trace in detail")]
    Get { trace_id: String },

    #[command(about = "Show a trace with its observations as a tree")]
    Tree { trace_id: String },
}

#[derive(Subcommand)]
pub enum ObservationsCommand {
    #[command(about = "List recent observations")]
    List {
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        #[arg(short = 't', long)]
        trace_id: Option<String>,

        #[arg(long = "type", help = "Filter by type: SPAN, GENERATION, or EVENT")]
        observation_type: Option<String>,

        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SessionsCommand {
    #[command(about = "List recent sessions")]
    List {
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    #[command(about = "Show one session in detail")]
    Get { session_id: String },
}

#[derive(Subcommand)]
pub enum ScoresCommand {
    #[command(about = "List recent scores")]
    List {
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        #[arg(short = 't', long)]
        trace_id: Option<String>,

        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    #[command(about = "Aggregate scores per name: count, mean, min, max")]
    Summary {
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PromptsCommand {
    #[command(about = "List prompts")]
    List {
        #[arg(short = 'l', long)]
        limit: Option<usize>,
    },

    #[command(about = "Show one prompt version")]
    Get {
        name: String,

        #[arg(long, help = "Specific version (defaults to the production label)")]
        version: Option<u32>,

        #[arg(long)]
        label: Option<String>,
    },

    #[command(about = "Fill a prompt's {{variables}} and print the result")]
    Compile {
        name: String,

        #[arg(long)]
        version: Option<u32>,

        #[arg(long)]
        label: Option<String>,

        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },

    #[command(about = "Unified diff between two prompt versions")]
    Diff {
        name: String,

        #[arg(long)]
        v1: u32,

        #[arg(long)]
        v2: u32,
    },
}

#[derive(Subcommand)]
pub enum DatasetsCommand {
    #[command(about = "List datasets")]
    List {
        #[arg(short = 'l', long)]
        limit: Option<usize>,
    },

    #[command(about = "Show a dataset and its items")]
    Get {
        name: String,

        #[arg(short = 'l', long, help = "Maximum items to fetch")]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum ExperimentsCommand {
    #[command(about = "List experiment runs for a dataset")]
    List { dataset: String },

    #[command(about = "Compare two runs of the same dataset side by side")]
    Compare {
        dataset: String,
        run1: String,
        run2: String,
    },
}

#[derive(Subcommand)]
pub enum AuthCommand {
    #[command(about = "Store credentials: public key in the config file, secret key in the OS keyring")]
    Login {
        #[arg(long)]
        public_key: Option<String>,

        #[arg(long)]
        secret_key: Option<String>,
    },

    #[command(about = "Remove the stored secret key for the active profile")]
    Logout,

    #[command(about = "Show where each credential resolves from (never prints the secret)")]
    Status,
}
