pub mod budget_service;
pub mod catalog_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod product_service;
