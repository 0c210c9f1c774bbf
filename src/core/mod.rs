//! Core module containing fundamental traits and types

pub mod auth;
pub mod entity;
pub mod error;
pub mod hyperlink;
pub mod media;
pub mod module;
pub mod service;
pub mod validation;

pub use auth::{AuthContext, AuthProvider, TokenAuthProvider};
pub use entity::Entity;
pub use error::{ApiError, ApiResult, StorageError, StorageResult};
pub use hyperlink::BaseUrl;
pub use media::MediaStore;
pub use module::Module;
pub use service::{AccountService, DataService};
