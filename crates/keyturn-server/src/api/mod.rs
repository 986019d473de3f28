pub mod deposit_hook;
pub mod mint_hook;
pub mod update_metadata;

pub mod info;
pub mod status;

pub mod prelude {
    pub use crate::{error::Error, AppContext, Config};
    pub use actix_web::{dev::HttpServiceFactory, http::StatusCode, web};
    pub use serde::{Deserialize, Serialize};
    pub use thiserror::Error as ThisError;

    pub struct Success;

    impl Serialize for Success {
        fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            let mut s = s.serialize_struct("Success", 1)?;
            s.serialize_field("success", &true)?;
            s.end()
        }
    }
}
