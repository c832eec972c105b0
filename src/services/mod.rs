pub mod coinmarketcap;
pub mod messenger;
pub mod tracking_service;
pub mod session_service;
pub mod alert_monitor;
