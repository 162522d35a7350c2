use crate::client::Headers;
use hal_admin_core::{Error, Result};

const HEADER: &str = "X-Total-Count";

/// Reads the total from `X-Total-Count`, given either as `<n>` or as
/// `<range>/<total>`.
pub(super) fn read(headers: &Headers) -> Result<u64> {
    let value = headers.get(HEADER).map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(Error::missing_total_count());
    }

    let total = value.rsplit('/').next().unwrap_or(value).trim();
    total
        .parse()
        .map_err(|_| Error::invalid_total_count(value))
}
