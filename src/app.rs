//! Application runtime.
//!
//! Provides [`App`], which wires the database pool, migrations, repositories
//! and services together. The CLI builds one per invocation; tests build one
//! over an in-memory SQLite connection with [`App::from_connection`].

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::application::{AvailabilityService, BookingService, CatalogService, ReportingService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::{OverlapGuard, SeaOrmRepositoryProvider};
use crate::infrastructure::init_database;

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the application.
pub struct AppOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── App ────────────────────────────────────────────────────────────

/// Connected application: one pool shared by every service.
pub struct App {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    pub catalog: CatalogService,
    pub availability: AvailabilityService,
    pub bookings: BookingService,
    pub reports: ReportingService,
    /// Overlap protection in effect for the connected store.
    pub overlap_guard: OverlapGuard,

    db: DatabaseConnection,
}

impl App {
    /// Connect to the configured database, migrate it if asked to, and build
    /// the services.
    pub async fn start(opts: AppOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let db_config = opts.config.database.to_database_config();
        let db = init_database(&db_config).await?;
        let app = Self::from_connection(db, opts.auto_migrate).await?;
        info!(overlap_guard = ?app.overlap_guard, "Coworking booking ready");
        Ok(app)
    }

    /// Build the application over an existing connection.
    pub async fn from_connection(
        db: DatabaseConnection,
        auto_migrate: bool,
    ) -> Result<Self, sea_orm::DbErr> {
        if auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Database migrations completed");
        }

        let provider = SeaOrmRepositoryProvider::new(db.clone());
        let overlap_guard = provider.overlap_guard();
        let repos: Arc<dyn RepositoryProvider> = Arc::new(provider);

        Ok(Self {
            catalog: CatalogService::new(repos.clone()),
            availability: AvailabilityService::new(repos.clone()),
            bookings: BookingService::new(repos.clone()),
            reports: ReportingService::new(repos.clone()),
            repos,
            overlap_guard,
            db,
        })
    }

    /// Replace the catalog service's bcrypt cost.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.catalog = CatalogService::new(self.repos.clone()).with_password_cost(cost);
        self
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the connection pool.
    pub async fn close(self) -> Result<(), sea_orm::DbErr> {
        self.db.close().await
    }
}

// ── Tracing ────────────────────────────────────────────────────────

/// Install the global tracing subscriber. Output goes to stderr so stdout
/// carries only command results.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
