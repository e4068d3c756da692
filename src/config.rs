// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{DocumentStore, MemoryDocumentStore, PgDocumentStore, Repository},
    services::{
        budget_service::BudgetService, catalog_service::CatalogService, crm_service::CrmService,
        dashboard_service::DashboardService, product_service::ProductService,
    },
};

// Configuração lida do ambiente (.env incluído)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub default_locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: "0.0.0.0:3000".to_string(),
            db_max_connections: 5,
            db_acquire_timeout: Duration::from_secs(3),
            default_locale: "en".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = AppConfig::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS")?
                .unwrap_or(defaults.db_max_connections),
            db_acquire_timeout: parse_var::<u64>("DB_ACQUIRE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.db_acquire_timeout),
            default_locale: env::var("DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
        })
    }
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{name} inválido: {raw:?}")),
        Err(_) => Ok(None),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub i18n_store: I18nStore,
    pub catalog_service: CatalogService,
    pub product_service: ProductService,
    pub crm_service: CrmService,
    pub budget_service: BudgetService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match &config.database_url {
            Some(database_url) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(config.db_acquire_timeout)
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&db_pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;

                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
                Arc::new(PgDocumentStore::new(db_pool))
            }
            None => {
                tracing::warn!("DATABASE_URL não definida: usando banco em memória (dados somem ao reiniciar)");
                Arc::new(MemoryDocumentStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Monta o gráfico de dependências sobre um banco já aberto.
    pub fn with_store(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let cost_items = Repository::new(store.clone());
        let products = Repository::new(store.clone());
        let customers = Repository::new(store.clone());
        let budgets = Repository::new(store);

        Self {
            config: Arc::new(config),
            i18n_store: I18nStore::default(),
            catalog_service: CatalogService::new(cost_items.clone()),
            product_service: ProductService::new(products.clone(), cost_items),
            crm_service: CrmService::new(customers.clone()),
            budget_service: BudgetService::new(budgets.clone(), customers, products),
            dashboard_service: DashboardService::new(budgets),
        }
    }
}
