//! Page layouts registered with the admin UI, one set per resource.

use crate::schema::{Resource, Schema};
use crate::widget::{Composer, Mode, WidgetRegistry, Widgets};

/// Everything the UI needs to register one resource.
#[derive(Debug, Clone)]
pub struct ResourceRegistration {
    pub name: String,

    /// Menu label.
    pub label: String,

    pub list: Option<ListPage>,
    pub show: Option<ShowPage>,
    pub create: Option<CreatePage>,
    pub edit: Option<EditPage>,
}

#[derive(Debug, Clone)]
pub struct ListPage {
    /// Columns of the data grid.
    pub columns: Widgets,

    /// Filter inputs, always as a list.
    pub filters: Widgets,

    /// Page opened when a row is clicked.
    pub row_click: Option<RowClick>,

    /// Adds an edit button to every row.
    pub edit_button: bool,

    /// Allows selecting rows for bulk deletion.
    pub bulk_delete: bool,

    /// Replaces numbered pages with "load more".
    pub infinite_pagination: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClick {
    Show,
}

#[derive(Debug, Clone)]
pub struct ShowPage {
    pub fields: Widgets,
}

#[derive(Debug, Clone)]
pub struct CreatePage {
    pub inputs: Widgets,

    /// The save button stays enabled on a pristine form.
    pub always_enable_save: bool,
}

#[derive(Debug, Clone)]
pub struct EditPage {
    pub inputs: Widgets,

    pub delete_button: bool,

    pub mutation_mode: MutationMode,
}

/// When the UI applies an edit locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Wait for the server to confirm the write.
    Pessimistic,
}

impl ResourceRegistration {
    pub fn new(composer: &Composer<'_>, resource: &Resource) -> ResourceRegistration {
        let views = &resource.views;

        let label = if resource.title.is_empty() {
            resource.name.clone()
        } else {
            resource.title.clone()
        };

        let list = views.list.as_ref().map(|list| ListPage {
            columns: composer.compose_fields(&list.fields),
            filters: Widgets::from_vec(composer.compose_list(Mode::Input, &list.filters), true),
            row_click: views.show.as_ref().map(|_| RowClick::Show),
            edit_button: views.edit.is_some(),
            bulk_delete: resource.deletable,
            infinite_pagination: resource.infinite_pagination,
        });

        let show = views.show.as_ref().map(|show| ShowPage {
            fields: composer.compose_fields(&show.fields),
        });

        let create = views.create.as_ref().map(|create| CreatePage {
            inputs: composer.compose_inputs(&create.fields, false),
            always_enable_save: true,
        });

        let edit = views.edit.as_ref().map(|edit| EditPage {
            inputs: composer.compose_inputs(&edit.fields, false),
            delete_button: resource.deletable,
            mutation_mode: MutationMode::Pessimistic,
        });

        ResourceRegistration {
            name: resource.name.clone(),
            label,
            list,
            show,
            create,
            edit,
        }
    }
}

/// Builds the registration of every resource, in document order.
pub fn register_resources(schema: &Schema, registry: &WidgetRegistry) -> Vec<ResourceRegistration> {
    let composer = Composer::new(schema, registry);
    schema.map_resources(|resource| ResourceRegistration::new(&composer, resource))
}
