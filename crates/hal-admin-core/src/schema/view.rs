use super::Field;
use serde::Deserialize;

/// Fields displayed by a show, create or edit page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct View {
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Columns and filter inputs displayed by a list page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListView {
    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default)]
    pub filters: Vec<Field>,

    /// List pages request no total count and page with "load more" instead.
    #[serde(default)]
    pub infinite_pagination: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Views {
    #[serde(default)]
    pub list: Option<ListView>,

    #[serde(default)]
    pub show: Option<View>,

    #[serde(default)]
    pub create: Option<View>,

    #[serde(default)]
    pub edit: Option<View>,
}
