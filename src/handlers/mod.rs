pub mod assets;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod handovers;
pub mod joiner_leaver;
pub mod leave;
pub mod meetings;
pub mod rooms;
pub mod trainings;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use slog::Logger;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::events::EventSender;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub handovers: Arc<crate::services::handovers::HandoverService>,
    pub notifications: Arc<crate::services::notifications::NotificationService>,
    pub users: Arc<crate::services::users::UserService>,
    pub rooms: Arc<crate::services::rooms::RoomService>,
    pub assets: Arc<crate::services::assets::AssetService>,
    pub leave: Arc<crate::services::leave::LeaveService>,
    pub meetings: Arc<crate::services::meetings::MeetingService>,
    pub trainings: Arc<crate::services::trainings::TrainingService>,
    pub attendance: Arc<crate::services::attendance::AttendanceService>,
    pub joiner_leaver: Arc<crate::services::joiner_leaver::JoinerLeaverService>,
    pub dashboard: Arc<crate::services::dashboard::DashboardService>,
}

impl AppServices {
    /// Build the service container shared by every handler.
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        base_logger: Logger,
        config: &AppConfig,
    ) -> Self {
        let notifications = Arc::new(crate::services::notifications::NotificationService::new(
            db_pool.clone(),
            config.base_url.clone(),
        ));

        let handover_logger = base_logger.new(slog::o!("component" => "handover_service"));
        let handovers = Arc::new(crate::services::handovers::HandoverService::new(
            db_pool.clone(),
            event_sender.clone(),
            notifications.clone(),
            handover_logger,
        ));

        let users = Arc::new(crate::services::users::UserService::new(
            db_pool.clone(),
            event_sender.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration,
            Duration::from_secs(config.otp_ttl_secs),
        ));

        let rooms = Arc::new(crate::services::rooms::RoomService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let assets = Arc::new(crate::services::assets::AssetService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let leave = Arc::new(crate::services::leave::LeaveService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let meetings = Arc::new(crate::services::meetings::MeetingService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let trainings = Arc::new(crate::services::trainings::TrainingService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let attendance = Arc::new(crate::services::attendance::AttendanceService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let joiner_leaver = Arc::new(crate::services::joiner_leaver::JoinerLeaverService::new(
            db_pool.clone(),
            event_sender,
        ));
        let dashboard = Arc::new(crate::services::dashboard::DashboardService::new(db_pool));

        Self {
            handovers,
            notifications,
            users,
            rooms,
            assets,
            leave,
            meetings,
            trainings,
            attendance,
            joiner_leaver,
            dashboard,
        }
    }
}
