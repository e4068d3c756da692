// src/services/crm_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::Repository, models::crm::Customer};

/// Dados de cliente vindos do formulário, já validados.
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
}

impl CustomerInput {
    fn into_customer(self, id: Uuid) -> Customer {
        Customer {
            id,
            name: self.name.trim().to_string(),
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            tax_id: non_blank(self.tax_id),
        }
    }
}

// Campo vazio no formulário não é guardado
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct CrmService {
    repo: Repository<Customer>,
}

impl CrmService {
    pub fn new(repo: Repository<Customer>) -> Self {
        Self { repo }
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create_customer(&self, input: CustomerInput) -> Result<Customer, AppError> {
        let customer = self.repo.create(input.into_customer(Uuid::nil())).await?;
        tracing::info!(customer_id = %customer.id, "Cliente criado");
        Ok(customer)
    }

    pub async fn update_customer(&self, id: Uuid, input: CustomerInput) -> Result<Customer, AppError> {
        let customer = self.repo.update(id, input.into_customer(id)).await?;
        tracing::info!(customer_id = %id, "Cliente atualizado");
        Ok(customer)
    }

    // Orçamentos guardam uma cópia do cliente, então continuam legíveis
    pub async fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        tracing::info!(customer_id = %id, "Cliente removido");
        Ok(())
    }
}
