pub mod budgets;
pub mod crm;
pub mod dashboard;
pub mod materials;
pub mod products;
