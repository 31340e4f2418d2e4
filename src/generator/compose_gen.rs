use crate::analyzer::Analysis;
use crate::error::GeneratorError;
use crate::generator::ecosystem::Ecosystem;
use crate::generator::templates::{self, COMPOSE_TEMPLATE};
use serde::Serialize;

/// Database engine bundled next to the application service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    Postgres,
    MySql,
    Mongo,
    Redis,
}

impl DatabaseEngine {
    /// Engine for the first detected database; unrecognized names get Postgres
    pub fn from_detected(databases: &[String]) -> Option<Self> {
        let first = databases.first()?.to_ascii_lowercase();
        let engine = if first.contains("mysql") || first.contains("mariadb") {
            DatabaseEngine::MySql
        } else if first.contains("mongo") {
            DatabaseEngine::Mongo
        } else if first.contains("redis") {
            DatabaseEngine::Redis
        } else {
            DatabaseEngine::Postgres
        };
        Some(engine)
    }

    pub fn image(&self) -> &'static str {
        match self {
            DatabaseEngine::Postgres => "postgres:15",
            DatabaseEngine::MySql => "mysql:8.0",
            DatabaseEngine::Mongo => "mongo:6.0",
            DatabaseEngine::Redis => "redis:7-alpine",
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            DatabaseEngine::Postgres => 5432,
            DatabaseEngine::MySql => 3306,
            DatabaseEngine::Mongo => 27017,
            DatabaseEngine::Redis => 6379,
        }
    }

    /// Connection URL as seen from the application container
    pub fn connection_url(&self) -> &'static str {
        match self {
            DatabaseEngine::Postgres => "postgresql://appuser:${POSTGRES_PASSWORD:-apppassword}@db:5432/app",
            DatabaseEngine::MySql => "mysql://appuser:${MYSQL_PASSWORD:-apppassword}@db:3306/app",
            DatabaseEngine::Mongo => "mongodb://admin:${MONGO_PASSWORD:-password}@db:27017/app?authSource=admin",
            DatabaseEngine::Redis => "redis://db:6379",
        }
    }

    fn service(&self) -> DatabaseService {
        let service = |environment: &[&str], volume, data_dir, healthcheck| DatabaseService {
            engine: *self,
            image: self.image(),
            port: self.port(),
            environment: environment.iter().map(|s| s.to_string()).collect(),
            volume,
            data_dir,
            healthcheck,
        };

        match self {
            DatabaseEngine::Postgres => service(
                &[
                    "POSTGRES_DB=app",
                    "POSTGRES_USER=appuser",
                    "POSTGRES_PASSWORD=${POSTGRES_PASSWORD:-apppassword}",
                ],
                "postgres_data",
                "/var/lib/postgresql/data",
                r#"["CMD-SHELL", "pg_isready -U appuser -d app"]"#,
            ),
            DatabaseEngine::MySql => service(
                &[
                    "MYSQL_DATABASE=app",
                    "MYSQL_USER=appuser",
                    "MYSQL_PASSWORD=${MYSQL_PASSWORD:-apppassword}",
                    "MYSQL_ROOT_PASSWORD=${MYSQL_ROOT_PASSWORD:-rootpassword}",
                ],
                "mysql_data",
                "/var/lib/mysql",
                r#"["CMD", "mysqladmin", "ping", "-h", "localhost"]"#,
            ),
            DatabaseEngine::Mongo => service(
                &[
                    "MONGO_INITDB_DATABASE=app",
                    "MONGO_INITDB_ROOT_USERNAME=admin",
                    "MONGO_INITDB_ROOT_PASSWORD=${MONGO_PASSWORD:-password}",
                ],
                "mongo_data",
                "/data/db",
                r#"["CMD", "mongosh", "--quiet", "--eval", "db.adminCommand('ping')"]"#,
            ),
            DatabaseEngine::Redis => service(
                &[],
                "redis_data",
                "/data",
                r#"["CMD", "redis-cli", "ping"]"#,
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct DatabaseService {
    engine: DatabaseEngine,
    image: &'static str,
    port: u16,
    environment: Vec<String>,
    volume: &'static str,
    data_dir: &'static str,
    healthcheck: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ComposeContext {
    project_type: String,
    service_name: String,
    port: u16,
    environment: Vec<String>,
    volumes: Vec<String>,
    db: Option<DatabaseService>,
}

/// Key of the bundled database service
pub const DATABASE_SERVICE: &str = "db";

/// Compose service key derived from the manifest name; never equal to [`DATABASE_SERVICE`]
pub fn service_name(analysis: &Analysis) -> String {
    let name: String = match analysis.package.name() {
        Some(name) => name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect(),
        None => return "app".to_string(),
    };
    if name.is_empty() {
        "app".to_string()
    } else if name == DATABASE_SERVICE {
        format!("{}_app", name)
    } else {
        name
    }
}

pub fn generate(analysis: &Analysis, port: u16) -> Result<String, GeneratorError> {
    let ecosystem = Ecosystem::for_project_type(analysis.project_type);
    let db = DatabaseEngine::from_detected(&analysis.database).map(|engine| engine.service());

    let mut environment = match ecosystem {
        Ecosystem::Node => vec!["NODE_ENV=production".to_string()],
        Ecosystem::Python => vec!["PYTHONUNBUFFERED=1".to_string()],
        _ => Vec::new(),
    };
    environment.push(format!("PORT={}", port));
    if let Some(db) = &db {
        environment.push(format!("DATABASE_URL={}", db.engine.connection_url()));
    }

    let volumes = match ecosystem {
        Ecosystem::Node => vec![".:/app".to_string(), "/app/node_modules".to_string()],
        _ => Vec::new(),
    };

    let context = ComposeContext {
        project_type: analysis.project_type.to_string(),
        service_name: service_name(analysis),
        port,
        environment,
        volumes,
        db,
    };
    log::debug!(
        "Rendering compose file: service={}, database={:?}",
        context.service_name,
        context.db.as_ref().map(|db| db.engine)
    );
    templates::render(COMPOSE_TEMPLATE, &context)
}
