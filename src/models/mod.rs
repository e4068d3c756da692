pub mod budget;
pub mod catalog;
pub mod crm;
pub mod dashboard;
