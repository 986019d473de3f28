use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error(
        "the escrow authority must be delegated for this NFT before updating metadata; \
         delegate the NFT first: {0}"
    )]
    DelegationMissing(keyturn_ops::Error),
    #[error("not found")]
    NotFound,
    #[error("{}", msg)]
    Custom { status: StatusCode, msg: String },
    #[error(transparent)]
    Ops(keyturn_ops::Error),
}

impl Error {
    pub fn custom<T: std::fmt::Display>(status: StatusCode, msg: T) -> Self {
        Error::Custom {
            status,
            msg: msg.to_string(),
        }
    }
}

impl From<keyturn_ops::Error> for Error {
    fn from(e: keyturn_ops::Error) -> Self {
        use keyturn_ops::Error as Ops;
        match e {
            Ops::PermissionDenied(_) | Ops::DelegateNotFound => Error::DelegationMissing(e),
            Ops::InvalidAddress(_) => Error::Validation(e.to_string()),
            Ops::AccountNotFound(_) => Error::NotFound,
            _ => Error::Ops(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn build<E: ResponseError>(e: &E) -> HttpResponse {
        HttpResponse::build(e.status_code()).json(ErrorBody {
            error: e.to_string(),
        })
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::DelegationMissing(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Custom { status, .. } => *status,
            Error::Ops(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ErrorBody::build(self)
    }
}
