use crate::client::{HttpClient, Request};
use crate::provider::DataProvider;
use crate::upload::FileUpload;
use hal_admin_core::registration::{register_resources, ResourceRegistration};
use hal_admin_core::{err, Error, Result, Schema, WidgetRegistry};
use std::sync::Arc;

/// An admin application bound to one API.
///
/// Holds the schema read from the descriptor document, the data provider
/// talking to the API and the widget catalog used to build pages.
#[derive(Debug, Clone)]
pub struct Admin {
    provider: DataProvider,
    registry: Arc<WidgetRegistry>,
}

impl Admin {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Schema {
        self.provider.schema()
    }

    pub fn provider(&self) -> &DataProvider {
        &self.provider
    }

    pub fn widgets(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Builds the pages of every declared resource.
    pub fn resources(&self) -> Vec<ResourceRegistration> {
        register_resources(self.schema(), &self.registry)
    }
}

#[derive(Debug, Default)]
pub struct Builder {
    upload: Option<Arc<dyn FileUpload>>,
    registry: Option<WidgetRegistry>,
}

impl Builder {
    /// Sets the adapter used to convert file fields before writes.
    pub fn upload(&mut self, upload: impl FileUpload) -> &mut Self {
        self.upload = Some(Arc::new(upload));
        self
    }

    /// Replaces the built-in widget catalog.
    pub fn widgets(&mut self, registry: WidgetRegistry) -> &mut Self {
        self.registry = Some(registry);
        self
    }

    /// Fetches the descriptor document from `descriptor_url` and builds the
    /// admin on top of it.
    pub async fn connect(
        &mut self,
        client: impl HttpClient,
        descriptor_url: &str,
    ) -> Result<Admin> {
        let response = client.send(Request::get(descriptor_url)).await?;
        if !response.is_success() {
            return Err(Error::http(response.status, "", response.json).context(err!(
                "failed to fetch the descriptor from `{}`",
                descriptor_url
            )));
        }

        let schema = Schema::from_slice(response.body.as_bytes())
            .map_err(|e| e.context(err!("invalid descriptor at `{}`", descriptor_url)))?;

        tracing::debug!(
            title = schema.title(),
            resources = schema.resources().count(),
            "loaded descriptor"
        );

        Ok(self.build(client, schema))
    }

    /// Builds the admin from an already parsed schema.
    pub fn build(&mut self, client: impl HttpClient, schema: Schema) -> Admin {
        let mut provider = DataProvider::new(Arc::new(schema), Arc::new(client));
        if let Some(upload) = self.upload.take() {
            provider = provider.with_upload(upload);
        }

        Admin {
            provider,
            registry: Arc::new(self.registry.take().unwrap_or_default()),
        }
    }
}
