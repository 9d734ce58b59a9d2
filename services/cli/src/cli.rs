use crate::commands::{self, Session};
use crate::infra::{parse_date, parse_kind, parse_time};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use firesafe::error::AppError;
use firesafe::workflows::booking::{BookingKind, BookingView};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "firesafe",
    about = "Schedule building surveys and submit fire-safety inspections from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List or register buildings
    Buildings {
        #[command(subcommand)]
        command: BuildingsCommand,
    },
    /// List or schedule bookings
    Bookings {
        #[command(subcommand)]
        command: BookingsCommand,
    },
    /// Submit an inspection questionnaire against a deployed booking
    Inspect(InspectArgs),
}

#[derive(Subcommand, Debug)]
enum BuildingsCommand {
    /// List registered buildings
    List(BuildingListArgs),
    /// Register a new building under the signed-in owner
    Register(RegisterArgs),
}

#[derive(Subcommand, Debug)]
enum BookingsCommand {
    /// List bookings through one of the role views
    List(BookingListArgs),
    /// Request a survey or inspection visit
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct BuildingListArgs {
    /// Only buildings owned by the signed-in user
    #[arg(long)]
    pub(crate) mine: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RegisterArgs {
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    #[arg(long, default_value = "")]
    pub(crate) address: String,
    #[arg(long, default_value = "")]
    pub(crate) building_type: String,
    #[arg(long, default_value = "")]
    pub(crate) floors: String,
    #[arg(long, default_value = "")]
    pub(crate) units: String,
    /// Construction date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) construction_date: Option<NaiveDate>,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub(crate) lat: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub(crate) lng: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ViewArg {
    Pending,
    History,
    Owned,
    #[default]
    All,
}

impl From<ViewArg> for BookingView {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Pending => BookingView::Pending,
            ViewArg::History => BookingView::History,
            ViewArg::Owned => BookingView::Owned,
            ViewArg::All => BookingView::All,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct BookingListArgs {
    #[arg(long, value_enum, default_value_t = ViewArg::All)]
    pub(crate) view: ViewArg,
    /// List every booking instead of only the signed-in user's
    #[arg(long)]
    pub(crate) everyone: bool,
    /// Also write the listed bookings to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    #[arg(long)]
    pub(crate) building: Option<u64>,
    /// Appointment date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Appointment time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub(crate) time: Option<NaiveTime>,
    #[arg(long, value_parser = parse_kind, default_value = "survey")]
    pub(crate) kind: BookingKind,
}

#[derive(Args, Debug)]
pub(crate) struct InspectArgs {
    #[arg(long)]
    pub(crate) booking: u64,
    /// JSON draft of the questionnaire; reset in place after a successful submission
    #[arg(long)]
    pub(crate) draft: PathBuf,
    /// Photo to attach; repeat for several. Replaces any images listed in the draft.
    #[arg(long = "image")]
    pub(crate) images: Vec<PathBuf>,
    /// Look the booking up among every booking instead of the user's own
    #[arg(long)]
    pub(crate) everyone: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let session = Session::bootstrap()?;

    match cli.command {
        Command::Buildings {
            command: BuildingsCommand::List(args),
        } => commands::list_buildings(&session, args).await,
        Command::Buildings {
            command: BuildingsCommand::Register(args),
        } => commands::register_building(&session, args).await,
        Command::Bookings {
            command: BookingsCommand::List(args),
        } => commands::list_bookings(&session, args).await,
        Command::Bookings {
            command: BookingsCommand::Schedule(args),
        } => commands::schedule_booking(&session, args).await,
        Command::Inspect(args) => commands::submit_inspection(&session, args).await,
    }
}
