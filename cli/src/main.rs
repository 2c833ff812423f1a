//! eSociety terminal client
//!
//! Every invocation hydrates the saved session, runs one command through the
//! route guard and prints the resulting view.
//!
//! ```sh
//! # Sign in; the session is saved under the data directory
//! esociety login --email asha@example.com --password 's3cret99'
//!
//! # Show whatever a path resolves to for the current user
//! esociety open /resident/complaints
//!
//! # Act on a view
//! esociety resident complaints file --type Noise --description "Drilling at 2am"
//! esociety admin complaints resolve 65f0c0ffee0000000000abcd
//! esociety security visitors add --name Ravi --purpose Delivery
//! ```

mod render;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use esociety::api::dto::RegisterRequest;
use esociety::domain::{Decision, GateStatus, Role};
use esociety::routing::{NavigationShell, Refusal, Route, RouteGuard};
use esociety::telemetry::init_tracing;
use esociety::views::admin::{
    AdminBookingsView, AdminComplaintsView, AdminDashboard, AdminVisitorsView, FacilitiesView,
    UsersView,
};
use esociety::views::login::LoginView;
use esociety::views::resident::{
    ResidentBookingsView, ResidentComplaintsView, ResidentDashboard, ResidentVisitorsView,
};
use esociety::views::security::SecurityVisitorsView;
use esociety::{
    default_config_path, AppConfig, FileSessionStorage, HttpApi, Outcome, ResourceView,
    SessionStore, SocietyApi,
};

type CliResult = Result<(), Box<dyn Error>>;

/// eSociety: residential society management from the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "esociety",
    version,
    about = "Residential society management client",
    long_about = "Terminal client for residents, admins and security staff.\n\n\
                  Default config: ~/.config/esociety/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ESOCIETY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and save the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ESOCIETY_PASSWORD", hide_env_values = true, default_value = "")]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List the navigation links for the current user.
    Nav,
    /// Show whatever a path resolves to.
    Open { path: String },
    #[command(subcommand)]
    Resident(ResidentCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
    #[command(subcommand)]
    Security(SecurityCommand),
}

#[derive(Subcommand, Debug)]
enum ResidentCommand {
    Dashboard,
    Complaints {
        #[command(subcommand)]
        action: Option<ComplaintAction>,
    },
    Bookings {
        #[command(subcommand)]
        action: Option<BookingAction>,
    },
    Visitors {
        #[command(subcommand)]
        action: Option<DecisionAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ComplaintAction {
    /// File a complaint (Maintenance, Noise, Parking or Other).
    File {
        #[arg(long = "type", default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
enum BookingAction {
    /// Book a slot; list facilities first to see the choices.
    Book {
        #[arg(long, default_value = "")]
        facility: String,
        #[arg(long, default_value = "")]
        slot: String,
    },
}

#[derive(Subcommand, Debug)]
enum DecisionAction {
    Approve { id: String },
    Deny { id: String },
}

impl DecisionAction {
    fn split(&self) -> (&str, Decision) {
        match self {
            Self::Approve { id } => (id.as_str(), Decision::Approve),
            Self::Deny { id } => (id.as_str(), Decision::Deny),
        }
    }
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    Dashboard,
    Facilities {
        #[command(subcommand)]
        action: Option<FacilityAction>,
    },
    Complaints {
        #[command(subcommand)]
        action: Option<ResolveAction>,
    },
    Bookings {
        #[command(subcommand)]
        action: Option<CancelAction>,
    },
    Visitors {
        #[command(subcommand)]
        action: Option<DecisionAction>,
    },
    /// Register a new user.
    Register(RegisterArgs),
}

#[derive(Subcommand, Debug)]
enum FacilityAction {
    Add {
        #[arg(long, default_value = "")]
        name: String,
        /// Comma-separated slot labels.
        #[arg(long, default_value = "")]
        slots: String,
    },
    Update {
        id: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        slots: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ResolveAction {
    Resolve { id: String },
}

#[derive(Subcommand, Debug)]
enum CancelAction {
    Cancel { id: String },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "ESOCIETY_NEW_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    role: Role,
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
}

#[derive(Subcommand, Debug)]
enum SecurityCommand {
    Dashboard {
        #[command(subcommand)]
        action: Option<GateAction>,
    },
    Visitors {
        #[command(subcommand)]
        action: Option<GateAction>,
    },
}

#[derive(Subcommand, Debug)]
enum GateAction {
    /// Register someone at the gate.
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        purpose: String,
    },
    /// Mark a visitor as entered.
    Enter { id: String },
    /// Mark a visitor as exited.
    Exit { id: String },
}

/// Shared state for one invocation.
struct App {
    api: Arc<dyn SocietyApi>,
    session: SessionStore,
}

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(&Default::default());
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config.logging);
    info!(api = %config.api.base_url, "configuration ready");

    // ── Hydrate session ────────────────────────────────────────
    let api: Arc<dyn SocietyApi> = Arc::new(HttpApi::new(&config.api)?);
    let storage = FileSessionStorage::new(config.session.resolved_path());
    let session = SessionStore::open(storage).await;
    let mut app = App { api, session };

    app.run(cli.command).await
}

impl App {
    async fn run(&mut self, command: Command) -> CliResult {
        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => {
                let next = NavigationShell::logout(&mut self.session).await?;
                println!("Signed out. Next: {next}");
                Ok(())
            }
            Command::Whoami => match self.session.identity() {
                Some(identity) => {
                    print!("{}", render::whoami(identity));
                    Ok(())
                }
                None => Err("not signed in".into()),
            },
            Command::Nav => {
                print!("{}", render::nav(&NavigationShell::links(self.session.identity())));
                Ok(())
            }
            Command::Open { path } => self.open(&path).await,
            Command::Resident(cmd) => self.resident(cmd).await,
            Command::Admin(cmd) => self.admin(cmd).await,
            Command::Security(cmd) => self.security(cmd).await,
        }
    }

    async fn login(&mut self, email: &str, password: &str) -> CliResult {
        let mut view = LoginView::mount(&self.session).map_err(refused)?;
        match view.submit(self.api.as_ref(), &mut self.session, email, password).await {
            Some(landing) => {
                let name = self
                    .session
                    .identity()
                    .map(|i| i.display_name().to_string())
                    .unwrap_or_default();
                println!("Signed in as {name}. Next: {landing}");
                Ok(())
            }
            None => Err(view
                .notice()
                .map(|n| n.text().to_string())
                .unwrap_or_else(|| "Login failed".into())
                .into()),
        }
    }

    /// Resolve a path through the guard and show the view behind it.
    async fn open(&mut self, path: &str) -> CliResult {
        let state = self.session.state();
        let Some(route) = RouteGuard::resolve(&state, path) else {
            println!("Loading...");
            return Ok(());
        };
        if route.path() != path.trim_end_matches('/') {
            println!("→ {route}");
        }
        match route {
            Route::Login => {
                println!("Sign in with: esociety login --email <email>");
                Ok(())
            }
            Route::NotFound => Err(format!("no page at {path}").into()),
            Route::ResidentDashboard => self.resident(ResidentCommand::Dashboard).await,
            Route::ResidentComplaints => {
                self.resident(ResidentCommand::Complaints { action: None }).await
            }
            Route::ResidentBookings => {
                self.resident(ResidentCommand::Bookings { action: None }).await
            }
            Route::ResidentVisitors => {
                self.resident(ResidentCommand::Visitors { action: None }).await
            }
            Route::AdminDashboard => self.admin(AdminCommand::Dashboard).await,
            Route::AdminFacilities => {
                self.admin(AdminCommand::Facilities { action: None }).await
            }
            Route::AdminComplaints => {
                self.admin(AdminCommand::Complaints { action: None }).await
            }
            Route::AdminBookings => self.admin(AdminCommand::Bookings { action: None }).await,
            Route::AdminVisitors => self.admin(AdminCommand::Visitors { action: None }).await,
            Route::AdminUsers => {
                println!("Register users with: esociety admin register --help");
                Ok(())
            }
            Route::SecurityDashboard => {
                self.security(SecurityCommand::Dashboard { action: None }).await
            }
            Route::SecurityVisitors => {
                self.security(SecurityCommand::Visitors { action: None }).await
            }
        }
    }

    // ── Resident ───────────────────────────────────────────────

    async fn resident(&mut self, cmd: ResidentCommand) -> CliResult {
        let api = self.api.clone();
        match cmd {
            ResidentCommand::Dashboard => {
                let view = ResidentDashboard::mount(&self.session).map_err(refused)?;
                print!("{}", render::menu(view.greeting(), view.cards()));
                Ok(())
            }
            ResidentCommand::Complaints { action } => {
                let mut view = ResidentComplaintsView::mount(api, &self.session).map_err(refused)?;
                let mut outcome = view.refresh().await;
                if let (true, Some(ComplaintAction::File { category, description })) =
                    (outcome.is_done(), action)
                {
                    outcome = view.file(&category, &description).await;
                }
                print!("{}", render::notice(view.notice()));
                print!("{}", render::complaints(view.complaints()));
                self.settle(outcome).await
            }
            ResidentCommand::Bookings { action } => {
                let mut view = ResidentBookingsView::mount(api, &self.session).map_err(refused)?;
                let mut outcome = view.refresh().await;
                if let (true, Some(BookingAction::Book { facility, slot })) =
                    (outcome.is_done(), action)
                {
                    outcome = view.book(&facility, &slot).await;
                }
                print!("{}", render::notice(view.notice()));
                println!("Facilities:");
                print!("{}", render::facilities(view.facilities()));
                println!("My bookings:");
                print!("{}", render::bookings(view.bookings()));
                self.settle(outcome).await
            }
            ResidentCommand::Visitors { action } => {
                let mut view = ResidentVisitorsView::mount(api, &self.session).map_err(refused)?;
                let mut outcome = view.refresh().await;
                if let (true, Some(action)) = (outcome.is_done(), action) {
                    let (id, decision) = action.split();
                    outcome = view.decide(id, decision).await;
                }
                print!("{}", render::notice(view.notice()));
                print!("{}", render::visitors(view.pending()));
                self.settle(outcome).await
            }
        }
    }

    // ── Admin ──────────────────────────────────────────────────

    async fn admin(&mut self, cmd: AdminCommand) -> CliResult {
        let api = self.api.clone();
        match cmd {
            AdminCommand::Dashboard => {
                let mut view = AdminDashboard::mount(api, &self.session).map_err(refused)?;
                let outcome = view.refresh().await;
                print!("{}", render::notice(view.notice()));
                print!("{}", render::stats(view.stats()));
                self.settle(outcome).await
            }
            AdminCommand::Facilities { action } => {
                let mut view = FacilitiesView::mount(api, &self.session).map_err(refused)?;
                let mut outcome = view.refresh().await;
                if let (true, Some(action)) = (outcome.is_done(), action) {
                    outcome = match action {
                        FacilityAction::Add { name, slots } => view.add(&name, &slots).await,
                        FacilityAction::Update { id, name, slots } => {
                            view.update(&id, &name, &slots).await
                        }
                        FacilityAction::Delete { id } => view.delete(&id).await,
                    };
                }
                print!("{}", render::notice(view.notice()));
                print!("{}", render::facilities(view.facilities()));
                self.settle(outcome).await
            }
            AdminCommand::Complaints { action } => {
                let mut view = AdminComplaintsView::mount(api, &self.session).map_err(refused)?;
                let mut outcome = view.refresh().await;
                if let (true, Some(ResolveAction::Resolve { id })) = (outcome.is_done(), action) {
                    outcome = view.resolve(&id).await;
                }
                print!("{}", render::notice(view.notice()));
                print!("{}", render::complaints(view.complaints()));
                self.settle(outcome).await
            }
            AdminCommand::Bookings { action } => {
                let mut view = AdminBookingsView::mount(api, &self.session).map_err(refused)?;
                let mut outcome = view.refresh().await;
                if let (true, Some(CancelAction::Cancel { id })) = (outcome.is_done(), action) {
                    outcome = view.cancel(&id).await;
                }
                print!("{}", render::notice(view.notice()));
                print!("{}", render::bookings(view.bookings()));
                self.settle(outcome).await
            }
            AdminCommand::Visitors { action } => {
                let mut view = AdminVisitorsView::mount(api, &self.session).map_err(refused)?;
                let mut outcome = view.refresh().await;
                if let (true, Some(action)) = (outcome.is_done(), action) {
                    let (id, decision) = action.split();
                    outcome = view.decide(id, decision).await;
                }
                print!("{}", render::notice(view.notice()));
                print!("{}", render::visitors(view.visitors()));
                self.settle(outcome).await
            }
            AdminCommand::Register(args) => {
                let mut view = UsersView::mount(api, &self.session).map_err(refused)?;
                let outcome = view
                    .register(RegisterRequest {
                        email: args.email.trim().to_string(),
                        password: args.password,
                        role: args.role,
                        name: args.name.trim().to_string(),
                        phone: args.phone.trim().to_string(),
                        address: args.address.trim().to_string(),
                    })
                    .await;
                print!("{}", render::notice(view.notice()));
                self.settle(outcome).await
            }
        }
    }

    // ── Security ───────────────────────────────────────────────

    async fn security(&mut self, cmd: SecurityCommand) -> CliResult {
        let api = self.api.clone();
        let (mut view, action, dashboard) = match cmd {
            SecurityCommand::Dashboard { action } => (
                SecurityVisitorsView::mount_dashboard(api, &self.session).map_err(refused)?,
                action,
                true,
            ),
            SecurityCommand::Visitors { action } => (
                SecurityVisitorsView::mount(api, &self.session).map_err(refused)?,
                action,
                false,
            ),
        };

        let mut outcome = view.refresh().await;
        if let (true, Some(action)) = (outcome.is_done(), action) {
            outcome = match action {
                GateAction::Add { name, purpose } => view.add(&name, &purpose).await,
                GateAction::Enter { id } => view.mark(&id, GateStatus::Entered).await,
                GateAction::Exit { id } => view.mark(&id, GateStatus::Exited).await,
            };
        }

        print!("{}", render::notice(view.notice()));
        print!("{}", render::gate_summary(&view.summary()));
        if !dashboard {
            println!("All visitors:");
            print!("{}", render::visitors(view.visitors()));
        }
        self.settle(outcome).await
    }

    /// Turn a view outcome into the process result. A rejected token ends
    /// the saved session.
    async fn settle(&mut self, outcome: Outcome) -> CliResult {
        match outcome {
            Outcome::Done => Ok(()),
            Outcome::Invalid(message) | Outcome::Failed(message) => Err(message.into()),
            Outcome::SessionExpired(message) => {
                self.session.invalidate().await?;
                Err(format!("{message}. Session ended, sign in again.").into())
            }
        }
    }
}

fn refused(refusal: Refusal) -> Box<dyn Error> {
    match refusal {
        Refusal::Pending => "session is still loading".into(),
        Refusal::Redirect(Route::Login) => {
            "not signed in with access to this page; run `esociety login`".into()
        }
        Refusal::Redirect(route) => format!("redirected to {route}").into(),
    }
}
