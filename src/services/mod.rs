// Business logic services

pub mod metric_service;
pub mod notification_service;
pub mod plan_service;
pub mod session_service;
pub mod template_service;

pub use metric_service::MetricService;
pub use notification_service::NotificationService;
pub use plan_service::PlanService;
pub use session_service::SessionService;
pub use template_service::TemplateService;
