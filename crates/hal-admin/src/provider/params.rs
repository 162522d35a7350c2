use hal_admin_core::schema::Sort;
use hal_admin_core::{err, Identifier, Record, Result};
use serde_json::Value;

/// Page selection. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Pagination {
        Pagination { page, per_page }
    }

    /// Index of the first record of the page.
    pub(super) fn offset(&self) -> Result<u64> {
        self.page
            .saturating_sub(1)
            .checked_mul(self.per_page)
            .ok_or_else(|| {
                err!(
                    "page {} with {} records per page is out of range",
                    self.page,
                    self.per_page
                )
            })
    }
}

impl Default for Pagination {
    fn default() -> Pagination {
        Pagination {
            page: 1,
            per_page: 100,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Defaults to the first 100 records.
    pub pagination: Option<Pagination>,
    pub sort: Option<Sort>,

    /// Sent as query parameters.
    pub filter: Record,
}

impl ListParams {
    pub fn new() -> ListParams {
        ListParams::default()
    }

    pub fn paginate(mut self, page: u64, per_page: u64) -> ListParams {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }

    pub fn sort(mut self, sort: Sort) -> ListParams {
        self.sort = Some(sort);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> ListParams {
        self.filter.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
    pub data: Vec<Record>,

    /// Total number of matching records. `None` for resources using
    /// infinite pagination.
    pub total: Option<u64>,

    /// Whether the server has more records past this page.
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GetManyParams {
    pub ids: Vec<Identifier>,

    /// Extra query parameters.
    pub filter: Record,
}

impl GetManyParams {
    pub fn new(ids: impl IntoIterator<Item = Identifier>) -> GetManyParams {
        GetManyParams {
            ids: ids.into_iter().collect(),
            filter: Record::new(),
        }
    }
}

/// Records of `resource` pointing at one record of another resource.
#[derive(Debug, Clone)]
pub struct GetManyReferenceParams {
    /// Name of the property holding the reference.
    pub target: String,

    /// Identifier of the referenced record.
    pub id: Identifier,

    pub pagination: Pagination,
    pub sort: Option<Sort>,
    pub filter: Record,
}

impl GetManyReferenceParams {
    pub fn new(target: impl Into<String>, id: impl Into<Identifier>) -> GetManyReferenceParams {
        GetManyReferenceParams {
            target: target.into(),
            id: id.into(),
            pagination: Pagination::default(),
            sort: None,
            filter: Record::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceResult {
    pub data: Vec<Record>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset() {
        assert_eq!(Pagination::new(1, 25).offset().unwrap(), 0);
        assert_eq!(Pagination::new(3, 10).offset().unwrap(), 20);
        assert_eq!(Pagination::new(0, 10).offset().unwrap(), 0);
        assert_eq!(Pagination::new(u64::MAX, 0).offset().unwrap(), 0);
    }

    #[test]
    fn offset_out_of_range() {
        let err = Pagination::new(u64::MAX, 2).offset().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
