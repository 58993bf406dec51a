use crate::config::AppConfig;
use crate::services::assistant::AssistantPlatform;
use crate::services::calendar::CalendarService;

pub struct AppState {
    pub config: AppConfig,
    pub calendar: Box<dyn CalendarService>,
    pub assistant: Box<dyn AssistantPlatform>,
}
