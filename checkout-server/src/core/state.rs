use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::core::Config;
use crate::db::repository::{
    CourseRepository, EnrollmentRepository, FoodItemRepository, OrderRepository, PromoRepository,
    UserRepository,
};
use crate::db::DbService;
use crate::orders::OrderService;
use crate::services::{HttpPaymentProvider, LogNotifier, PaymentSessionProvider};
use crate::settlement::SettlementCoordinator;
use crate::utils::AppError;

/// Server state - shared handles for all services
///
/// Cloning is cheap: the database handle and the service components are
/// reference counted.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Order creation / cancellation service
    pub orders: Arc<OrderService>,
    /// Settlement coordinator (payment callbacks)
    pub settlement: Arc<SettlementCoordinator>,
    /// Hosted checkout session provider
    pub payment: Arc<dyn PaymentSessionProvider>,
}

impl ServerState {
    /// Initialize all services from configuration
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let data_dir = std::path::Path::new(&config.work_dir).join("data");
        let db_service = DbService::new(&data_dir).await?;
        let db = db_service.db;

        Ok(Self::with_db(config.clone(), db))
    }

    /// Build the state around an existing database handle
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let promos = Arc::new(PromoRepository::new(db.clone()));
        let order_repo = Arc::new(OrderRepository::new(db.clone()));
        let catalog = Arc::new(FoodItemRepository::new(db.clone()));
        let courses = Arc::new(CourseRepository::new(db.clone()));
        let enrollments = Arc::new(EnrollmentRepository::new(db.clone()));
        let users = Arc::new(UserRepository::new(db.clone()));
        let notifier = Arc::new(LogNotifier);

        let orders = Arc::new(OrderService::new(order_repo.clone()));
        let settlement = Arc::new(SettlementCoordinator::new(
            order_repo,
            catalog,
            courses,
            enrollments,
            promos,
            users,
            notifier,
        ));

        let payment: Arc<dyn PaymentSessionProvider> = Arc::new(HttpPaymentProvider::new(
            config.payment_base_url.clone(),
            config.payment_api_key.clone(),
            config.checkout_success_url.clone(),
            config.checkout_cancel_url.clone(),
        ));

        Self {
            config,
            db,
            orders,
            settlement,
            payment,
        }
    }
}
