//! Civo Client
//!
//! A provider session: the shared HTTP client plus one caller's credentials
//! and region. Sessions are created per inbound call and never shared.

use super::auth::Credentials;
use super::error::ProviderError;
use super::http::{CivoHttpClient, RequestAuth};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Page size requested from paginated list endpoints
const PAGE_SIZE: &str = "100";

/// One page of a paginated Civo list
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct PaginatedList<T> {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub per_page: i64,
    #[serde(default)]
    pub pages: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Generic `{"result": "success"}` style answer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimpleResponse {
    pub id: String,
    pub result: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Account {
    id: String,
}

/// Civo client bound to one caller
#[derive(Clone, Debug)]
pub struct CivoClient {
    http: CivoHttpClient,
    credentials: Credentials,
    region: String,
}

impl CivoClient {
    pub fn new(http: CivoHttpClient, credentials: Credentials, region: String) -> Self {
        Self {
            http,
            credentials,
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth {
            token: self.credentials.api_key().expose(),
            user_agent: self.credentials.user_agent(),
        }
    }

    /// GET `path` and decode the answer
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let mut pairs = vec![("region", self.region.as_str())];
        pairs.extend_from_slice(query);
        let url = self.http.url(path, &pairs)?;
        let value = self.http.get(url, &self.auth()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch all items of a paginated list (auto-paginate)
    pub async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ProviderError> {
        let mut all_items = Vec::new();
        let mut page: i64 = 1;

        loop {
            let page_str = page.to_string();
            let result: PaginatedList<T> = self
                .get_with_query(path, &[("page", page_str.as_str()), ("per_page", PAGE_SIZE)])
                .await?;

            let fetched = result.items.len();
            all_items.extend(result.items);

            if fetched == 0 || result.pages <= page {
                break;
            }
            page += 1;
        }

        Ok(all_items)
    }

    /// POST a JSON body to `path` and decode the answer
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ProviderError> {
        let url = self.http.url(path, &[])?;
        let value = self.http.post(url, &self.auth(), body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// DELETE `path`
    pub async fn delete(&self, path: &str) -> Result<SimpleResponse, ProviderError> {
        let url = self.http.url(path, &[("region", self.region.as_str())])?;
        let value = self.http.delete(url, &self.auth()).await?;
        if value.is_null() {
            return Ok(SimpleResponse::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Id of the account that owns this session's API key
    pub async fn account_id(&self) -> Result<String, ProviderError> {
        let accounts: Vec<Account> = self.get_all_pages("/v2/accounts").await?;
        Ok(accounts.into_iter().next().map(|a| a.id).unwrap_or_default())
    }
}

/// Field deserializer reading an explicit `null` as the field's default
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build `/v2/<collection>/<id>` with the id percent-encoded
pub fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_encodes_ids() {
        assert_eq!(item_path("/v2/networks", "abc"), "/v2/networks/abc");
        assert_eq!(item_path("/v2/dns", "a b/c"), "/v2/dns/a%20b%2Fc");
    }

    #[test]
    fn paginated_list_tolerates_missing_fields() {
        let page: PaginatedList<SimpleResponse> =
            serde_json::from_str(r#"{"items":[{"id":"x"}]}"#).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pages, 0);
    }
}
