use axum::{extract::State, Json};
use axum_extra::extract::{Query, WithRejection};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::api::errors::ApiError;
use crate::domain::repositories::MemberRepository;
use crate::domain::search::query_value::optional_number;
use crate::domain::search::{MemberSearchCondition, MemberTeamDto, Order, Page, PageRequest};
use crate::infrastructure::repositories::SqliteMemberRepository;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Paging query parameters (`page`, `size`, repeated `sort=property[,asc|desc]`)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageParams {
    #[serde(deserialize_with = "optional_number")]
    pub page: Option<u32>,
    #[serde(deserialize_with = "optional_number")]
    pub size: Option<u32>,
    pub sort: Vec<String>,
}

impl PageParams {
    /// Converts the raw parameters into a page request
    ///
    /// Page defaults to 0 and size to 20; sizes above 2000 are capped.
    /// Sort terms apply in the order given; blank terms are skipped.
    pub fn into_page_request(self) -> Result<PageRequest, ApiError> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        let mut request =
            PageRequest::new(self.page.unwrap_or(0), size).map_err(ApiError::bad_request)?;

        for sort in self.sort.iter().filter(|s| !s.trim().is_empty()) {
            let order = sort.parse::<Order>().map_err(ApiError::bad_request)?;
            request = request.with_order(order);
        }

        Ok(request)
    }
}

/// Search members with optional filters, one page at a time
///
/// GET /api/members/search?username=&teamName=&ageGoe=&ageLoe=&page=&size=&sort=
pub async fn search_members(
    State(pool): State<SqlitePool>,
    WithRejection(Query(condition), _): WithRejection<Query<MemberSearchCondition>, ApiError>,
    WithRejection(Query(params), _): WithRejection<Query<PageParams>, ApiError>,
) -> Result<Json<Page<MemberTeamDto>>, ApiError> {
    let page = params.into_page_request()?;

    let member_repo = SqliteMemberRepository::new(pool);
    let result = member_repo.search_page_complex(&condition, &page).await?;

    Ok(Json(result))
}

/// Greeting endpoint
///
/// GET /hello
pub async fn hello() -> &'static str {
    "hello"
}
