use dotenvy::dotenv;
use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

pub struct Config {
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenv().is_ok();

        let port = match env::var("PORT") {
            Ok(p) => p.parse().expect("PORT must be a valid u16 number"),
            Err(_) => DEFAULT_PORT,
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Self {
            port,
            allowed_origins,
        }
    }

    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}
