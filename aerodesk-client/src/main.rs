use aerodesk_booking::{BookingLedger, BookingWorkflow, FareCalculator};
use aerodesk_client::DirectoryClient;
use aerodesk_core::{Booking, ListingEnricher, NewFlight, PaymentMethod, Profile};
use aerodesk_store::app_config::{Config, FareRules};
use aerodesk_store::JsonFileCollection;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book flights against an AeroDesk directory and manage your local booking history
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory service base URL
    #[arg(long, env = "AERODESK_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// File holding your bookings
    #[arg(long, env = "AERODESK_BOOKINGS", default_value = "my_bookings.json")]
    bookings: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List flights with display prices
    Flights,
    /// Reserve a seat: select flight, pay, confirm
    Book(BookArgs),
    /// Booking history kept on this machine
    #[command(subcommand)]
    Bookings(BookingsCommand),
    /// Create your profile in the directory
    Profile(ProfileArgs),
    /// Directory administration
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct BookArgs {
    /// Flight number, e.g. AA100
    #[arg(long)]
    flight: String,
    #[arg(long, default_value_t = 1)]
    passengers: u32,
    /// credit, debit, upi, netbanking or paypal
    #[arg(long)]
    method: Option<String>,
    #[arg(long, default_value = "")]
    account: String,
    #[arg(long, default_value = "")]
    amount: String,
}

#[derive(Subcommand, Debug)]
enum BookingsCommand {
    List,
    /// Remove the booking at this position in `bookings list`
    Remove { index: usize },
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    district: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long)]
    district_code: Option<String>,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Publish a new flight
    AddFlight {
        #[arg(long)]
        flight_number: String,
        #[arg(long)]
        departure: String,
        #[arg(long)]
        arrival: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        airline: String,
    },
    /// List registered users
    Users,
    /// Remove every user with this email
    RemoveUser { email: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerodesk=info,aerodesk_booking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = DirectoryClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    let ledger = BookingLedger::new(Arc::new(JsonFileCollection::<Booking>::new(&cli.bookings)));

    match cli.command {
        Command::Flights => show_flights(&client).await,
        Command::Book(args) => book(&client, ledger, args).await,
        Command::Bookings(BookingsCommand::List) => show_bookings(&ledger).await,
        Command::Bookings(BookingsCommand::Remove { index }) => {
            match ledger.remove_at(index).await? {
                Some(booking) => println!("Removed booking for flight {}", booking.flight_number()),
                None => bail!("No booking at position {}", index),
            }
            Ok(())
        }
        Command::Profile(args) => {
            let profile = Profile {
                name: args.name,
                email: args.email,
                country: args.country,
                state: args.state,
                district: args.district,
                city: args.city,
                district_code: args.district_code.map(serde_json::Value::String),
                ..Default::default()
            };
            let created = client.create_profile(&profile).await?;
            println!("Profile created for {} <{}>", created.name, created.email);
            Ok(())
        }
        Command::Admin(cmd) => admin(&client, cmd).await,
    }
}

fn fare_rules() -> FareRules {
    match Config::load() {
        Ok(config) => config.fares,
        Err(e) => {
            warn!("Using default fares, config unavailable: {}", e);
            FareRules::default()
        }
    }
}

async fn show_flights(client: &DirectoryClient) -> Result<()> {
    let flights = client.list_flights().await.context("Could not load flights")?;
    if flights.is_empty() {
        println!("No flights available.");
        return Ok(());
    }

    let mut enricher = ListingEnricher::new();
    for listing in enricher.enrich_all(flights) {
        let f = &listing.flight;
        println!(
            "{:<8} {:<14} {} -> {}  {} {}  {:>9.2}  {:>3} seats  {}",
            f.flight_number, f.airline, f.departure, f.arrival, f.date, f.time,
            listing.price, listing.seats, listing.duration
        );
    }
    Ok(())
}

async fn book(client: &DirectoryClient, ledger: BookingLedger, args: BookArgs) -> Result<()> {
    let mut workflow = BookingWorkflow::new(ledger, FareCalculator::new(fare_rules()));
    if workflow.load(client).await == 0 {
        bail!("No flights available to book");
    }

    workflow.select_flight(&args.flight)?;
    workflow.set_passengers(args.passengers)?;
    workflow.proceed_to_payment()?;

    if let Some(method) = args.method {
        workflow.choose_payment_method(method.parse::<PaymentMethod>()?)?;
    }
    workflow.enter_payment_details(args.account, args.amount)?;

    if let Some(fare) = workflow.quote() {
        println!(
            "{} x {} = {:.2} + tax {:.2} + service fee {:.2} = {:.2}",
            fare.base, fare.passengers, fare.subtotal, fare.tax, fare.service_fee, fare.total
        );
    }

    let booking = workflow.confirm().await?;
    println!(
        "Booking confirmed: {} {} -> {} on {} at {}, paid by {} ({}), total {:.2}",
        booking.flight.flight_number,
        booking.flight.departure,
        booking.flight.arrival,
        booking.flight.date,
        booking.flight.time,
        booking.payment_method,
        booking.account_number.hint(),
        booking.total
    );
    Ok(())
}

async fn show_bookings(ledger: &BookingLedger) -> Result<()> {
    let bookings = ledger.list().await?;
    if bookings.is_empty() {
        println!("You have no bookings yet.");
        return Ok(());
    }

    for (i, b) in bookings.iter().enumerate() {
        println!(
            "[{}] {} {} -> {}  {} at {}  {}  booked {}  {} pax  {:.2}",
            i,
            b.flight.flight_number,
            b.flight.departure,
            b.flight.arrival,
            b.flight.date,
            b.flight.time,
            b.flight.airline,
            b.booked_at.format("%Y-%m-%d %H:%M"),
            b.passengers,
            b.total
        );
    }
    Ok(())
}

async fn admin(client: &DirectoryClient, cmd: AdminCommand) -> Result<()> {
    match cmd {
        AdminCommand::AddFlight { flight_number, departure, arrival, date, time, airline } => {
            let draft = NewFlight {
                flight_number,
                departure,
                arrival,
                date,
                time,
                airline,
                ..Default::default()
            };
            let flight = client.create_flight(&draft).await?;
            println!("Flight {} added with id {}", flight.flight_number, flight.id);
        }
        AdminCommand::Users => {
            let users = client.list_users().await?;
            if users.is_empty() {
                println!("No users found.");
            }
            for u in users {
                println!("{:<20} {:<28} {}, {}", u.name, u.email, u.city, u.country);
            }
        }
        AdminCommand::RemoveUser { email } => {
            client.remove_user(&email).await?;
            println!("User removed successfully!");
        }
    }
    Ok(())
}
