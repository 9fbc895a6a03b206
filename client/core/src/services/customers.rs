use super::{logged, resource};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::http::ApiClient;
use crate::query::QueryString;
use crate::types::{Customer, CustomerFilters, CustomerPage, Id};

/// Customer endpoints
pub struct CustomersApi {
    client: ApiClient,
}

impl CustomersApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `GET /customers`, paginated and optionally searched
    pub async fn get_all_customers(
        &self,
        filters: &CustomerFilters,
    ) -> Result<Envelope<CustomerPage>> {
        let mut query = QueryString::new();
        query
            .push("page", filters.page)
            .push("limit", filters.limit)
            .push_text("search", filters.search.as_deref());

        logged(
            "get_all_customers",
            self.client.get(&query.append_to("/customers"), None, None).await,
        )
    }

    pub async fn get_customer(&self, id: &Id) -> Result<Envelope<Customer>> {
        let path = resource("/customers", id, "")?;
        logged("get_customer", self.client.get(&path, None, None).await)
    }
}
