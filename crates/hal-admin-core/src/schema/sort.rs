use serde::{Deserialize, Serialize};

/// A sort request coming from a list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Sort {
        Sort {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Sort {
        Sort {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }

    /// Value of the `order_by` query parameter: the field name, prefixed
    /// with `-` for descending order.
    pub fn order_by(&self) -> String {
        match self.order {
            SortOrder::Asc => self.field.clone(),
            SortOrder::Desc => format!("-{}", self.field),
        }
    }
}

impl std::str::FromStr for Sort {
    type Err = crate::Error;

    /// Parses `field`, `field:ASC` or `field:DESC`.
    fn from_str(s: &str) -> crate::Result<Sort> {
        let (field, order) = match s.split_once(':') {
            Some((field, order)) => (field, order),
            None => (s, "ASC"),
        };
        if field.is_empty() {
            crate::bail!("sort field is empty in `{}`", s);
        }
        let order = match order.to_ascii_uppercase().as_str() {
            "ASC" => SortOrder::Asc,
            "DESC" => SortOrder::Desc,
            other => crate::bail!("unknown sort order `{}`", other),
        };
        Ok(Sort {
            field: field.to_string(),
            order,
        })
    }
}
