use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{validate, Config};
use crate::contract::{CoreRequest, CoreResponse, ListRequest, ListResponse, SearchResponse};
use crate::data_context::{DataContext, DataError, Overview};
use crate::filter::{FilterError, TransactionFilter};
use crate::model::{Account, AccountType, Category, Loan, Transaction, TransactionType};
use crate::pagination::{paginate, Page, PaginationError};
use crate::search::{SearchHit, SearchResults};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Data(DataError),
    Filter(FilterError),
    Pagination(PaginationError),
    InvalidRequest(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Data(error) => write!(f, "data error: {error}"),
            Self::Filter(error) => write!(f, "filter error: {error}"),
            Self::Pagination(error) => write!(f, "pagination error: {error}"),
            Self::InvalidRequest(error) => write!(f, "invalid request: {error}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<DataError> for ServiceError {
    fn from(value: DataError) -> Self {
        Self::Data(value)
    }
}

impl From<FilterError> for ServiceError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<PaginationError> for ServiceError {
    fn from(value: PaginationError) -> Self {
        Self::Pagination(value)
    }
}

/// The dashboard's view of its data: config-driven page sizes over a
/// caller-owned [`DataContext`].
pub struct DashboardService {
    config: Config,
    data: DataContext,
}

impl DashboardService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        let data = if config.data_path.exists() {
            DataContext::load(&config.data_path)?
        } else {
            crate::logging::warn(&format!(
                "data fixture missing at {}; using seeded data",
                config.data_path.display()
            ));
            DataContext::seeded()
        };
        Ok(Self { config, data })
    }

    pub fn with_data(config: Config, data: DataContext) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self { config, data })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data(&self) -> &DataContext {
        &self.data
    }

    pub fn search(&self, query: &str) -> SearchResults {
        crate::search::search(query, self.data.collections())
    }

    pub fn preview(&self, query: &str) -> Vec<SearchHit> {
        self.search(query).preview(self.config.preview_limit as usize)
    }

    pub fn list_accounts(&self, page: usize) -> Result<Page<Account>, ServiceError> {
        Ok(paginate(&self.data.collections().accounts, self.page_size(), page)?)
    }

    pub fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: usize,
    ) -> Result<Page<Transaction>, ServiceError> {
        filter.validate()?;
        let transactions = &self.data.collections().transactions;
        if filter.is_empty() {
            return Ok(paginate(transactions, self.page_size(), page)?);
        }
        let filtered = filter.apply(transactions);
        Ok(paginate(&filtered, self.page_size(), page)?)
    }

    pub fn list_loans(&self, page: usize) -> Result<Page<Loan>, ServiceError> {
        Ok(paginate(&self.data.collections().loans, self.page_size(), page)?)
    }

    pub fn overview(&self) -> Overview {
        self.data.overview(self.config.recent_transactions as usize)
    }

    pub fn open_account(
        &mut self,
        account_type: AccountType,
        initial_deposit: Decimal,
        opened_on: NaiveDate,
    ) -> Result<Account, ServiceError> {
        let account = self
            .data
            .open_account(account_type, initial_deposit, opened_on)?
            .clone();
        crate::logging::info(&format!("opened account #{}", account.account_id));
        Ok(account)
    }

    pub fn close_account(&mut self, account_id: u32) -> Result<Account, ServiceError> {
        let account = self.data.close_account(account_id)?;
        crate::logging::info(&format!("closed account #{account_id}"));
        Ok(account)
    }

    pub fn record_transaction(
        &mut self,
        account_id: u32,
        transaction_type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction, ServiceError> {
        let transaction = self
            .data
            .record_transaction(account_id, transaction_type, amount, date)?
            .clone();
        crate::logging::info(&format!(
            "recorded transaction #{} on account #{account_id}",
            transaction.transaction_id
        ));
        Ok(transaction)
    }

    pub fn apply_for_loan(
        &mut self,
        amount: Decimal,
        branch_id: u32,
        purpose: &str,
        interest_rate: Decimal,
    ) -> Result<Loan, ServiceError> {
        let loan = self
            .data
            .apply_for_loan(amount, branch_id, purpose, interest_rate)?
            .clone();
        crate::logging::info(&format!("loan application #{} submitted", loan.loan_id));
        Ok(loan)
    }

    pub fn handle_command(&self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Search(request) => {
                let results = self.search(&request.query);
                let preview = results.preview(self.config.preview_limit as usize);
                let no_results = results.is_empty();
                Ok(CoreResponse::Search(SearchResponse {
                    results,
                    preview,
                    no_results,
                }))
            }
            CoreRequest::List(request) => self.handle_list(request).map(CoreResponse::List),
            CoreRequest::Overview => Ok(CoreResponse::Overview(self.overview())),
        }
    }

    fn handle_list(&self, request: ListRequest) -> Result<ListResponse, ServiceError> {
        if request.filter.is_some() && request.category != Category::Transactions {
            return Err(ServiceError::InvalidRequest(format!(
                "filters are only supported for transactions, not {}",
                request.category
            )));
        }

        match request.category {
            Category::Accounts => self.list_accounts(request.page).map(ListResponse::Accounts),
            Category::Transactions => {
                let filter = request.filter.unwrap_or_default();
                self.list_transactions(&filter, request.page)
                    .map(ListResponse::Transactions)
            }
            Category::Loans => self.list_loans(request.page).map(ListResponse::Loans),
        }
    }

    fn page_size(&self) -> usize {
        self.config.page_size as usize
    }
}
