//! `savepass` - register service logins for a user and keep them in local storage
//!
//! The core of the crate is [`RegisterLoginData`], a headless form that
//! validates a service name, an e-mail or username and a password, appends
//! the resulting [`LoginData`] to the signed-in user's slot in a
//! [`KeyValueStore`], and navigates home.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod alert;
pub mod config;
pub mod error;
pub mod logging;
pub mod login;
pub mod navigation;
pub mod register;
pub mod repository;
pub mod session;
pub mod storage;
pub mod validation;

pub use alert::{Alert, SAVE_FAILED_MESSAGE};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use login::{Field, LoginData, LoginDataForm};
pub use navigation::{Navigator, Screen};
pub use register::{RegisterLoginData, SubmitOutcome};
pub use repository::LoginDataRepository;
pub use session::{AuthContext, StaticSession, User};
pub use storage::{KeyValueStore, SqliteStore, StoreStats};
pub use validation::{validate, ValidationErrors};
