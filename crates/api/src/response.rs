use serde::Serialize;

/// Envelope for every successful response body: `{ "data": ... }`.
///
/// Reports, single rows and lists all go out wrapped, so clients read
/// `data` regardless of endpoint.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
