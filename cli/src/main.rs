//! Coworking booking manager: CLI
//!
//! ```sh
//! # Default config (~/.config/coworking-booking/config.toml)
//! coworking coworking list
//!
//! # Find a free room with a projector for at least 6 people
//! coworking search --from "2025-03-10 10:00" --to "2025-03-10 12:00" \
//!     --min-capacity 6 --equipment 1
//!
//! # Book it, pay, cancel
//! coworking book --room 3 --user 7 --from "2025-03-10 10:00" --to "2025-03-10 12:00"
//! coworking confirm --payment 12
//! coworking cancel --booking 11 --user 7
//!
//! # Reports
//! coworking report occupancy --from 2025-03-01 --to 2025-03-31
//! coworking --json report revenue --from 2025-03-01 --to 2025-03-31
//!
//! # Validate config without connecting
//! coworking --check
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use coworking_booking::config::AppConfig;
use coworking_booking::domain::user::CreateUserDto;
use coworking_booking::domain::{NewCoworking, NewEquipment, NewRoom, RoomSearch, UserRole};
use coworking_booking::shared::{parse_date, parse_datetime, report_period, TimeWindow};
use coworking_booking::{default_config_path, init_tracing, App, AppOptions};

use render::{emit, BookingWithPayment};

/// Coworking booking manager: rooms, availability, bookings and reports.
#[derive(Parser, Debug)]
#[command(
    name = "coworking",
    version,
    about = "Booking manager for coworking spaces",
    long_about = "Manage coworkings, rooms and equipment, search free rooms, \
                  book them with payments and pull occupancy and revenue reports.\n\n\
                  Default config: ~/.config/coworking-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "COWORKING_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the database URL.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Validate the configuration and exit without connecting.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long, global = true)]
    no_migrate: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Coworking spaces
    #[command(subcommand)]
    Coworking(CoworkingCommand),
    /// Rooms of a coworking
    #[command(subcommand)]
    Room(RoomCommand),
    /// Equipment types and their rooms
    #[command(subcommand)]
    Equipment(EquipmentCommand),
    /// Users
    #[command(subcommand)]
    User(UserCommand),
    /// Find rooms free for a time window
    Search(SearchArgs),
    /// Book a room and open its payment
    Book(BookArgs),
    /// Mark a payment paid and confirm its booking
    Confirm {
        #[arg(long)]
        payment: i32,
    },
    /// Cancel a booking, refunding a paid payment
    Cancel {
        #[arg(long)]
        booking: i32,
        #[arg(long)]
        user: i32,
    },
    /// Booking history of a user, newest first
    History {
        #[arg(long)]
        user: i32,
    },
    /// Reports
    #[command(subcommand)]
    Report(ReportCommand),
    /// Mark confirmed bookings that have ended as completed
    Complete {
        /// Reference time "YYYY-MM-DD HH:MM" (UTC); defaults to now
        #[arg(long, value_parser = datetime_arg)]
        now: Option<DateTime<Utc>>,
    },
}

#[derive(Subcommand, Debug)]
enum CoworkingCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RoomCommand {
    List {
        #[arg(long)]
        coworking: i32,
    },
    Create {
        #[arg(long)]
        coworking: i32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        capacity: i32,
        /// Area in square meters
        #[arg(long)]
        area: Option<f64>,
        /// Price per hour
        #[arg(long)]
        rate: Decimal,
    },
}

#[derive(Subcommand, Debug)]
enum EquipmentCommand {
    List,
    /// Create equipment, or update the description of an existing name
    Upsert {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Attach {
        #[arg(long)]
        room: i32,
        #[arg(long)]
        equipment: i32,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        /// admin or member
        #[arg(long, value_parser = role_arg)]
        role: Option<UserRole>,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Start "YYYY-MM-DD HH:MM" (UTC)
    #[arg(long, value_parser = datetime_arg)]
    from: DateTime<Utc>,
    /// End "YYYY-MM-DD HH:MM" (UTC)
    #[arg(long, value_parser = datetime_arg)]
    to: DateTime<Utc>,
    #[arg(long)]
    min_capacity: Option<i32>,
    #[arg(long)]
    max_rate: Option<Decimal>,
    /// Required equipment ids, comma separated
    #[arg(long, value_delimiter = ',')]
    equipment: Vec<i32>,
}

#[derive(Args, Debug)]
struct BookArgs {
    #[arg(long)]
    room: i32,
    #[arg(long)]
    user: i32,
    #[arg(long, value_parser = datetime_arg)]
    from: DateTime<Utc>,
    #[arg(long, value_parser = datetime_arg)]
    to: DateTime<Utc>,
    #[arg(long)]
    payment_method: Option<String>,
}

#[derive(Args, Debug)]
struct PeriodArgs {
    /// First day "YYYY-MM-DD"
    #[arg(long, value_parser = date_arg)]
    from: NaiveDate,
    /// Last day "YYYY-MM-DD", included up to 23:59:59
    #[arg(long, value_parser = date_arg)]
    to: NaiveDate,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    Occupancy(PeriodArgs),
    Revenue(PeriodArgs),
    User {
        #[arg(long)]
        user: i32,
    },
}

fn datetime_arg(s: &str) -> Result<DateTime<Utc>, String> {
    parse_datetime(s).map_err(|e| e.to_string())
}

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn role_arg(s: &str) -> Result<UserRole, String> {
    UserRole::parse(&s.to_lowercase()).ok_or_else(|| format!("unknown role '{}'", s))
}

fn period(args: &PeriodArgs) -> Result<TimeWindow, Box<dyn std::error::Error>> {
    Ok(report_period(args.from, args.to)?)
}

async fn run(app: &App, command: Command, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Coworking(CoworkingCommand::List) => {
            let list = app.catalog.list_coworkings().await?;
            emit(json, list.as_slice(), render::coworkings)?;
        }
        Command::Coworking(CoworkingCommand::Create {
            name,
            address,
            description,
        }) => {
            let created = app
                .catalog
                .create_coworking(NewCoworking {
                    name,
                    address,
                    description,
                })
                .await?;
            emit(json, &created, render::coworking)?;
        }
        Command::Room(RoomCommand::List { coworking }) => {
            let list = app.catalog.list_rooms(coworking).await?;
            emit(json, list.as_slice(), render::rooms)?;
        }
        Command::Room(RoomCommand::Create {
            coworking,
            name,
            capacity,
            area,
            rate,
        }) => {
            let created = app
                .catalog
                .create_room(NewRoom {
                    coworking_id: coworking,
                    name,
                    capacity,
                    area_sqm: area,
                    hourly_rate: rate,
                })
                .await?;
            emit(json, &created, render::room)?;
        }
        Command::Equipment(EquipmentCommand::List) => {
            let list = app.catalog.list_equipment().await?;
            emit(json, list.as_slice(), render::equipment_list)?;
        }
        Command::Equipment(EquipmentCommand::Upsert { name, description }) => {
            let saved = app
                .catalog
                .upsert_equipment(NewEquipment { name, description })
                .await?;
            emit(json, &saved, render::equipment)?;
        }
        Command::Equipment(EquipmentCommand::Attach { room, equipment }) => {
            app.catalog.attach_equipment(room, equipment).await?;
            let done = serde_json::json!({ "room_id": room, "equipment_id": equipment });
            emit(json, &done, |_| {
                println!("Equipment #{} attached to room #{}", equipment, room)
            })?;
        }
        Command::User(UserCommand::Create {
            email,
            password,
            full_name,
            role,
        }) => {
            let user = app
                .catalog
                .create_user(CreateUserDto {
                    email,
                    password,
                    full_name,
                    role,
                })
                .await?;
            emit(json, &user, render::user)?;
        }
        Command::Search(args) => {
            let window = TimeWindow::new(args.from, args.to)?;
            let mut search = RoomSearch::new(window).equipment(args.equipment);
            if let Some(capacity) = args.min_capacity {
                search = search.min_capacity(capacity);
            }
            if let Some(rate) = args.max_rate {
                search = search.max_rate(rate);
            }
            let rooms = app.availability.search(search).await?;
            emit(json, rooms.as_slice(), render::available_rooms)?;
        }
        Command::Book(args) => {
            let (booking, payment) = app
                .bookings
                .create_booking(args.room, args.user, args.from, args.to, args.payment_method)
                .await?;
            let created = BookingWithPayment {
                booking: &booking,
                payment: &payment,
            };
            emit(json, &created, render::booking_with_payment)?;
        }
        Command::Confirm { payment } => {
            let (payment, booking) = app.bookings.confirm_payment(payment).await?;
            let confirmed = BookingWithPayment {
                booking: &booking,
                payment: &payment,
            };
            emit(json, &confirmed, render::booking_with_payment)?;
        }
        Command::Cancel { booking, user } => {
            app.bookings.cancel_booking(booking, user).await?;
            let cancelled = app.bookings.find_booking(booking).await?;
            let refund = app.bookings.payment_for_booking(booking).await?;
            let done = serde_json::json!({ "booking": &cancelled, "payment": &refund });
            emit(json, &done, |_| {
                println!("Booking #{} cancelled", booking);
                if let Some(p) = &refund {
                    println!("Payment #{} is {}", p.id, p.status);
                }
            })?;
        }
        Command::History { user } => {
            let list = app.bookings.user_bookings(user).await?;
            emit(json, list.as_slice(), render::history)?;
        }
        Command::Report(ReportCommand::Occupancy(args)) => {
            let rows = app.reports.room_occupancy(&period(&args)?).await?;
            emit(json, rows.as_slice(), render::occupancy)?;
        }
        Command::Report(ReportCommand::Revenue(args)) => {
            let rows = app.reports.revenue(&period(&args)?).await?;
            emit(json, rows.as_slice(), render::revenue)?;
        }
        Command::Report(ReportCommand::User { user }) => {
            let stats = app.reports.user_statistics(user).await?;
            emit(json, &stats, render::user_statistics)?;
        }
        Command::Complete { now } => {
            let completed = app
                .bookings
                .complete_finished_bookings(now.unwrap_or_else(Utc::now))
                .await?;
            let done = serde_json::json!({ "completed": completed });
            emit(json, &done, |_| println!("{} booking(s) completed", completed))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(url) = cli.database_url.clone() {
        config.database.url = Some(url);
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());
    if cli.database_url.is_some() {
        info!("CLI override: database url = {}", config.database.display_url());
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log level = {}", level);
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.display_url());
        println!(
            "   Pool        : {}..{} connections, {}s lifetime",
            config.database.pool.min_connections,
            config.database.pool.max_connections,
            config.database.pool.max_lifetime_secs
        );
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command else {
        eprintln!("error: no command given (see --help)");
        return ExitCode::from(2);
    };

    // ── Run ────────────────────────────────────────────────────
    let app = match App::start(AppOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(&app, command, cli.json).await;
    if let Err(e) = app.close().await {
        error!("Failed to close database pool: {}", e);
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
