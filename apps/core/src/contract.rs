use serde::{Deserialize, Serialize};

use crate::data_context::Overview;
use crate::filter::TransactionFilter;
use crate::model::{Account, Category, Loan, Transaction};
use crate::pagination::Page;
use crate::search::{SearchHit, SearchResults};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: SearchResults,
    pub preview: Vec<SearchHit>,
    pub no_results: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListRequest {
    pub category: Category,
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default)]
    pub filter: Option<TransactionFilter>,
}

fn first_page() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "category", content = "page", rename_all = "snake_case")]
pub enum ListResponse {
    Accounts(Page<Account>),
    Transactions(Page<Transaction>),
    Loans(Page<Loan>),
}

impl ListResponse {
    pub fn total_pages(&self) -> usize {
        match self {
            Self::Accounts(page) => page.total_pages,
            Self::Transactions(page) => page.total_pages,
            Self::Loans(page) => page.total_pages,
        }
    }

    pub fn current_page(&self) -> usize {
        match self {
            Self::Accounts(page) => page.current_page,
            Self::Transactions(page) => page.current_page,
            Self::Loans(page) => page.current_page,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Search(SearchRequest),
    List(ListRequest),
    Overview,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Search(SearchResponse),
    List(ListResponse),
    Overview(Overview),
}
