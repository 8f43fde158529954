pub mod achievement;
pub mod catalog;
pub mod chart;
pub mod insights;
pub mod ledger;
pub mod settings;
pub mod snapshot;
pub mod transaction;
