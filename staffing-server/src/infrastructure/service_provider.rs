use std::sync::Arc;

use domain_timesheet::{
    repository::{AssignedPersonnelRepo, ShiftRepo, TimesheetRepo, UserRepo},
    service::{
        ClockService, Notifier, PermissionService, ShiftStatusService, SignatureStore, TimeSource,
        TimesheetApprovalService,
    },
};
use service_timesheet::{
    ClockServiceImpl, PermissionServiceImpl, ShiftStatusServiceImpl, SystemTimeSource,
    TimesheetApprovalServiceImpl,
};

use super::{
    background_service::BackgroundService,
    config::{DatabaseKind, StaffingConfig},
    database::{Database, MemoryRepo, OrmRepo, SeedData},
    notifier::{LogNotifier, WebhookNotifier},
    signature_store::FileSignatureStore,
};

/// Every persistence port, possibly all backed by one adapter.
#[derive(Clone)]
pub struct Repositories {
    pub shift: Arc<dyn ShiftRepo>,
    pub assignment: Arc<dyn AssignedPersonnelRepo>,
    pub timesheet: Arc<dyn TimesheetRepo>,
    pub user: Arc<dyn UserRepo>,
}

impl Repositories {
    pub fn from_shared<R>(repo: Arc<R>) -> Self
    where
        R: ShiftRepo + AssignedPersonnelRepo + TimesheetRepo + UserRepo + 'static,
    {
        Self {
            shift: repo.clone(),
            assignment: repo.clone(),
            timesheet: repo.clone(),
            user: repo,
        }
    }

    async fn connect(config: &StaffingConfig) -> anyhow::Result<Self> {
        let db = config.db();
        match db.kind() {
            DatabaseKind::Memory => {
                let seed = match db.seed_file() {
                    Some(path) => SeedData::load(path).await?,
                    None => SeedData::default(),
                };
                tracing::info!(
                    "Using memory database with {} shifts and {} users.",
                    seed.shifts.len(),
                    seed.users.len()
                );
                Ok(Self::from_shared(Arc::new(MemoryRepo::new(seed))))
            }
            DatabaseKind::Postgres => {
                let database = Arc::new(Database::new(db.url()).await?);
                if *db.auto_migrate() {
                    database.create_schema().await?;
                }
                Ok(Self::from_shared(Arc::new(
                    OrmRepo::builder().db(database).build(),
                )))
            }
        }
    }
}

#[derive(Clone)]
pub struct ServiceProvider {
    pub config: StaffingConfig,
    pub clock_service: Arc<dyn ClockService>,
    pub shift_status_service: Arc<dyn ShiftStatusService>,
    pub timesheet_approval_service: Arc<dyn TimesheetApprovalService>,
}

impl ServiceProvider {
    /// Wires the services from configuration and returns the background tasks to spawn.
    pub async fn build(
        config: StaffingConfig,
    ) -> anyhow::Result<(Self, Vec<Arc<dyn BackgroundService>>)> {
        let repositories = Repositories::connect(&config).await?;
        let signature_store = Arc::new(FileSignatureStore::new(config.signature().root()));
        let mut background_services: Vec<Arc<dyn BackgroundService>> = vec![];
        let notifier: Arc<dyn Notifier> = if *config.notification().enable() {
            let (notifier, delivery) = WebhookNotifier::new(config.notification())?;
            background_services.push(Arc::new(delivery));
            Arc::new(notifier)
        } else {
            Arc::new(LogNotifier)
        };
        let sp = Self::assemble(
            config,
            repositories,
            signature_store,
            notifier,
            Arc::new(SystemTimeSource),
        );
        Ok((sp, background_services))
    }

    pub fn assemble(
        config: StaffingConfig,
        repositories: Repositories,
        signature_store: Arc<dyn SignatureStore>,
        notifier: Arc<dyn Notifier>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        let max_write_attempts = *config.workflow().max_write_attempts();
        let permission_service: Arc<dyn PermissionService> = Arc::new(
            PermissionServiceImpl::builder()
                .user_repo(repositories.user.clone())
                .build(),
        );
        let clock_service = Arc::new(
            ClockServiceImpl::builder()
                .shift_repo(repositories.shift.clone())
                .assignment_repo(repositories.assignment.clone())
                .permission_service(permission_service.clone())
                .notifier(notifier.clone())
                .time_source(time_source.clone())
                .max_write_attempts(max_write_attempts)
                .build(),
        );
        let shift_status_service = Arc::new(
            ShiftStatusServiceImpl::builder()
                .shift_repo(repositories.shift.clone())
                .assignment_repo(repositories.assignment.clone())
                .permission_service(permission_service.clone())
                .build(),
        );
        let timesheet_approval_service = Arc::new(
            TimesheetApprovalServiceImpl::builder()
                .shift_repo(repositories.shift)
                .assignment_repo(repositories.assignment)
                .timesheet_repo(repositories.timesheet)
                .permission_service(permission_service)
                .signature_store(signature_store)
                .notifier(notifier)
                .time_source(time_source)
                .max_write_attempts(max_write_attempts)
                .build(),
        );
        Self {
            config,
            clock_service,
            shift_status_service,
            timesheet_approval_service,
        }
    }
}
