mod error;
pub use error::{Error, IntoError};

pub mod flatten;
pub use flatten::flatten;

pub mod hal;

pub mod registration;
pub use registration::ResourceRegistration;

pub mod schema;
pub use schema::{Identifier, Record, Schema};

pub mod validator;
pub use validator::Validator;

pub mod widget;
pub use widget::{Composer, Widget, WidgetRegistry, Widgets};

/// A Result type alias that uses hal-admin's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
