pub mod achievement_service;
pub mod chart_service;
pub mod currency_service;
pub mod insights_service;
pub mod ledger_service;
pub mod snapshot_service;
