//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. [`engagement_store`] adapts the
//! like and comment repositories to the core engagement trait.

pub mod comment_repo;
pub mod connection_repo;
pub mod dashboard_repo;
pub mod engagement_store;
pub mod like_repo;
pub mod notification_repo;
pub mod notification_settings_repo;
pub mod portfolio_repo;
pub mod report_repo;
pub mod session_repo;
pub mod support_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use connection_repo::ConnectionRepo;
pub use dashboard_repo::DashboardRepo;
pub use like_repo::LikeRepo;
pub use notification_repo::NotificationRepo;
pub use notification_settings_repo::NotificationSettingsRepo;
pub use portfolio_repo::PortfolioRepo;
pub use report_repo::ReportRepo;
pub use session_repo::SessionRepo;
pub use support_repo::SupportRepo;
pub use user_repo::UserRepo;
