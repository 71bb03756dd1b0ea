use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum NewswatchError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    DateParse(String),
    AuthFailed(String),
}

impl NewswatchError {
    pub fn code(&self) -> &'static str {
        match self {
            NewswatchError::DatabaseConfig(_) => "E001",
            NewswatchError::DatabaseConnection(_) => "E002",
            NewswatchError::DatabaseOperation(_) => "E003",
            NewswatchError::Validation(_) => "E004",
            NewswatchError::NotFound(_) => "E005",
            NewswatchError::Serialization(_) => "E006",
            NewswatchError::DateParse(_) => "E007",
            NewswatchError::AuthFailed(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            NewswatchError::DatabaseConfig(_) => "Database Configuration Error",
            NewswatchError::DatabaseConnection(_) => "Database Connection Error",
            NewswatchError::DatabaseOperation(_) => "Database Operation Error",
            NewswatchError::Validation(_) => "Validation Error",
            NewswatchError::NotFound(_) => "Resource Not Found",
            NewswatchError::Serialization(_) => "Serialization Error",
            NewswatchError::DateParse(_) => "Date Parse Error",
            NewswatchError::AuthFailed(_) => "Authentication Failed",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            NewswatchError::DatabaseConfig(msg) => msg,
            NewswatchError::DatabaseConnection(msg) => msg,
            NewswatchError::DatabaseOperation(msg) => msg,
            NewswatchError::Validation(msg) => msg,
            NewswatchError::NotFound(msg) => msg,
            NewswatchError::Serialization(msg) => msg,
            NewswatchError::DateParse(msg) => msg,
            NewswatchError::AuthFailed(msg) => msg,
        }
    }

    /// HTTP status the handler boundary maps this error to. Storage errors
    /// are always a generic 500; the driver message never reaches the client.
    pub fn http_status(&self) -> StatusCode {
        match self {
            NewswatchError::DatabaseConfig(_)
            | NewswatchError::DatabaseConnection(_)
            | NewswatchError::DatabaseOperation(_)
            | NewswatchError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            NewswatchError::Validation(_) | NewswatchError::DateParse(_) => {
                StatusCode::BAD_REQUEST
            }
            NewswatchError::NotFound(_) => StatusCode::NOT_FOUND,
            NewswatchError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl fmt::Display for NewswatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for NewswatchError {}

impl NewswatchError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        NewswatchError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        NewswatchError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        NewswatchError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        NewswatchError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        NewswatchError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        NewswatchError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        NewswatchError::DateParse(msg.into())
    }

    pub fn auth_failed<T: Into<String>>(msg: T) -> Self {
        NewswatchError::AuthFailed(msg.into())
    }
}

impl From<sea_orm::DbErr> for NewswatchError {
    fn from(err: sea_orm::DbErr) -> Self {
        NewswatchError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for NewswatchError {
    fn from(err: serde_json::Error) -> Self {
        NewswatchError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for NewswatchError {
    fn from(err: chrono::ParseError) -> Self {
        NewswatchError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NewswatchError>;
