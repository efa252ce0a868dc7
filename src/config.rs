/// Credentials and endpoint for the DaData suggestion API.
#[derive(Debug, Clone)]
pub struct DaDataConfig {
    pub api_key: String,
    pub secret_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub dadata: DaDataConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt_secret = std::env::var("JWT_SECRET")?;
        let dadata = DaDataConfig {
            api_key: std::env::var("DADATA_API_KEY")?,
            secret_key: std::env::var("DADATA_SECRET_KEY")?,
            base_url: std::env::var("DADATA_BASE_URL").unwrap_or_else(|_| {
                "https://suggestions.dadata.ru/suggestions/api/4_1/rs".into()
            }),
        };
        Ok(Self {
            database_url,
            jwt_secret,
            dadata,
        })
    }
}
