use clap::Parser;
use rowcast::command::{parse_column_spec, parse_decimals};
use rowcast::session::{Form, DEFAULT_INTERVAL};
use rowcast::{console, repl, ColumnSpec, TimeOfDay};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(
    name = "rowcast",
    version = VERSION,
    about = "Estimate row size and storage growth of agent-written tables."
)]
struct Cli {
    /// Number of agents writing rows.
    #[arg(short, long, env = "ROWCAST_AGENTS", default_value_t = 1, allow_negative_numbers = true)]
    agents: i64,

    /// Time between two writes of one agent, as HH:MM:SS.
    #[arg(short = 'n', long, env = "ROWCAST_INTERVAL", default_value = DEFAULT_INTERVAL)]
    interval: String,

    /// Start of the daily work window (HH:MM). Agents are always active if neither bound is set.
    #[arg(long, env = "ROWCAST_START")]
    start: Option<TimeOfDay>,

    /// End of the daily work window (HH:MM). Before the start means the window crosses midnight.
    #[arg(long, env = "ROWCAST_END")]
    end: Option<TimeOfDay>,

    /// Column as TYPE[:LENGTH][:NAME], e.g. varchar:50:payload. Repeatable.
    #[arg(short, long = "column", value_parser = parse_column_spec)]
    columns: Vec<ColumnSpec>,

    /// Decimal places for byte sizes.
    #[arg(short, long, env = "ROWCAST_DECIMALS", default_value_t = 2, value_parser = parse_decimals)]
    decimals: usize,

    /// Open an interactive session seeded with these values.
    #[arg(short, long)]
    interactive: bool,
}

impl Cli {
    fn into_form(self) -> Form {
        let mut form = Form::default();
        form.set_agents(self.agents);
        form.set_interval(self.interval);
        form.set_bounds(self.start, self.end);
        for column in self.columns {
            form.add_column(column);
        }
        form.decimals = self.decimals;
        form
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let interactive = cli.interactive;
    let form = cli.into_form();
    debug!(?form, "Parsed command line.");

    if interactive {
        return match repl::start(form) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                console::error(format!("Error: {}\n", e));
                ExitCode::FAILURE
            }
        };
    }

    console::print_form(&form);
    if form.projection().is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
