mod admin;
pub use admin::{Admin, Builder};

pub mod client;
pub use client::{Headers, HttpClient, Method, Request, Response};

pub mod provider;
pub use provider::DataProvider;

pub mod upload;
pub use upload::{DefaultFileUpload, FileUpload, FileValue, RawFile};

pub use hal_admin_core::{
    async_trait, registration, schema, widget, Error, Identifier, Record, Result, Schema,
};
