use super::query::Query;
use super::{into_record, total_count, DataProvider};
use super::{GetManyParams, GetManyReferenceParams, ListParams, ListResult, ReferenceResult};
use hal_admin_core::{err, hal, Identifier, Record, Result};
use serde_json::Value;
use url::Url;

impl DataProvider {
    /// Fetches one page of records, following `next` links until the
    /// requested page size is filled or the server has nothing more.
    ///
    /// The total comes from the first response only. Resources using infinite
    /// pagination skip the total and rely on `has_next_page` instead.
    pub async fn list(&self, resource: &str, params: ListParams) -> Result<ListResult> {
        let pagination = params.pagination.unwrap_or_default();
        let infinite = self.schema.is_infinite_pagination(resource);
        let url = self.schema.resource_url(resource)?;

        let mut query = Query::new();
        query
            .extend(params.filter)
            .extend(self.schema.order_clause(resource, params.sort.as_ref()))
            .insert("offset", pagination.offset()?)
            .insert("limit", pagination.per_page);
        if infinite {
            query.remove("total_count");
        } else {
            query.insert("total_count", true);
        }

        let mut page_url = Some(query.to_url(&url));
        let mut remaining = pagination.per_page;
        let mut read_total = !infinite;
        let mut total = None;
        let mut data = vec![];

        while remaining > 0 {
            let Some(url) = page_url.as_deref() else {
                break;
            };

            let response = self.fetch(url).await?;
            if read_total {
                total = Some(total_count::read(&response.headers)?);
                read_total = false;
            }

            let records = self.schema.extract_embedded(resource, &response.json)?;
            let fetched = records.len() as u64;
            data.extend(records);

            page_url = hal::next_link(&response.json)
                .map(|next| resolve_link(url, next))
                .transpose()?;

            if fetched == 0 {
                break;
            }
            remaining = remaining.saturating_sub(fetched);
        }

        Ok(ListResult {
            data,
            total,
            has_next_page: page_url.is_some(),
        })
    }

    /// Fetches one record. `id` is used when the response does not reveal
    /// its own identifier.
    pub async fn get_one(&self, resource: &str, id: &Identifier) -> Result<Record> {
        let response = self.fetch(&self.record_url(resource, id)?).await?;

        let mut record = into_record(response.json);
        let id = self.schema.resolve_id(resource, &record, Some(id))?;
        record.insert("id".to_string(), id.to_value());
        Ok(record)
    }

    /// Fetches several records in one request with an `<id field>__in`
    /// filter.
    pub async fn get_many(&self, resource: &str, params: GetManyParams) -> Result<Vec<Record>> {
        let url = self.schema.resource_url(resource)?;

        let mut query = Query::new();
        query.insert("total_count", true).extend(params.filter);

        if !params.ids.is_empty() {
            let id_field = match self.schema.resource_id_field(resource) {
                "" => "id",
                id_field => id_field,
            };
            let ids: Vec<Value> = params.ids.iter().map(Identifier::to_value).collect();
            query.insert(format!("{}__in", id_field), ids);
        }

        let response = self.fetch(&query.to_url(&url)).await?;
        self.schema.extract_embedded(resource, &response.json)
    }

    /// Fetches the records whose `target` property points at `id`.
    ///
    /// A single page is requested; `next` links are not followed.
    pub async fn get_many_reference(
        &self,
        resource: &str,
        params: GetManyReferenceParams,
    ) -> Result<ReferenceResult> {
        let url = self.schema.resource_url(resource)?;
        let pagination = params.pagination;

        let mut query = Query::new();
        query
            .extend(params.filter)
            .insert(params.target, params.id.to_value())
            .extend(self.schema.order_clause(resource, params.sort.as_ref()))
            .insert("offset", pagination.offset()?)
            .insert("limit", pagination.per_page)
            .insert("total_count", true);

        let response = self.fetch(&query.to_url(&url)).await?;
        let total = total_count::read(&response.headers)?;
        let data = self.schema.extract_embedded(resource, &response.json)?;

        Ok(ReferenceResult { data, total })
    }
}

/// Resolves a `next` link against the URL of the page that returned it.
fn resolve_link(page_url: &str, href: &str) -> Result<String> {
    match Url::parse(page_url) {
        Ok(base) => base
            .join(href)
            .map(String::from)
            .map_err(|e| err!("invalid `next` link `{}`: {}", href, e)),
        // The page URL itself is relative; nothing to resolve against.
        Err(_) => Ok(href.to_string()),
    }
}
