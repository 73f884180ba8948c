use std::future::Future;
use std::str::FromStr;

use serde::Serialize;

/// Columns of the member/team join that a search can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortProperty {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl FromStr for MemberSortProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memberId" | "id" => Ok(MemberSortProperty::MemberId),
            "username" => Ok(MemberSortProperty::Username),
            "age" => Ok(MemberSortProperty::Age),
            "teamId" => Ok(MemberSortProperty::TeamId),
            "teamName" => Ok(MemberSortProperty::TeamName),
            other => Err(format!("Unknown sort property: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// One ordering term of a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub property: MemberSortProperty,
    pub direction: Direction,
    pub nulls_last: bool,
}

impl Order {
    pub fn asc(property: MemberSortProperty) -> Self {
        Self {
            property,
            direction: Direction::Asc,
            nulls_last: false,
        }
    }

    pub fn desc(property: MemberSortProperty) -> Self {
        Self {
            property,
            direction: Direction::Desc,
            nulls_last: false,
        }
    }

    /// Places rows with a missing value after all others
    pub fn nulls_last(mut self) -> Self {
        self.nulls_last = true;
        self
    }
}

/// Parses `property[,asc|desc]`
///
/// # Example
/// ```
/// use member_query_api::domain::search::{Direction, MemberSortProperty, Order};
///
/// let order: Order = "age,desc".parse().unwrap();
/// assert_eq!(order.property, MemberSortProperty::Age);
/// assert_eq!(order.direction, Direction::Desc);
/// ```
impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let property = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "Sort property cannot be empty".to_string())?
            .parse()?;
        let direction = match parts.next() {
            Some(direction) => direction.parse()?,
            None => Direction::Asc,
        };
        if parts.next().is_some() {
            return Err(format!("Invalid sort expression: {}", s));
        }

        Ok(Self {
            property,
            direction,
            nulls_last: false,
        })
    }
}

/// Zero-based page window with optional ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Vec<Order>,
}

impl PageRequest {
    /// Creates a page request
    ///
    /// # Returns
    /// * `Err(String)` - If `size` is zero
    pub fn new(page: u32, size: u32) -> Result<Self, String> {
        if size == 0 {
            return Err("Page size must be at least one".to_string());
        }

        Ok(Self {
            page,
            size,
            sort: Vec::new(),
        })
    }

    /// Appends an ordering term
    pub fn with_order(mut self, order: Order) -> Self {
        self.sort.push(order);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &[Order] {
        &self.sort
    }

    /// Number of rows before the first row of this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// A window of results plus the total number of matching rows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u32,
    pub number: u32,
}

impl<T> Page<T> {
    /// Builds a page from its content and a known total
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(size),
            size: request.size(),
            number: request.page(),
        }
    }

    /// Builds a page, calling `count` only when the total cannot be
    /// derived from the content
    ///
    /// The total is known without counting when the page is the first one
    /// and is not full, or when it is a later, non-empty page that is not
    /// full (it must then be the last page).
    pub async fn assemble<F, Fut, E>(
        content: Vec<T>,
        request: &PageRequest,
        count: F,
    ) -> Result<Self, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<u64, E>>,
    {
        let returned = content.len() as u64;
        let size = u64::from(request.size());
        let offset = request.offset();

        let total = if returned < size && (offset == 0 || returned > 0) {
            tracing::debug!(offset, returned, "Skipping count query");
            offset + returned
        } else {
            count().await?
        };

        Ok(Self::new(content, request, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn request(page: u32, size: u32) -> PageRequest {
        PageRequest::new(page, size).unwrap()
    }

    async fn assemble_counting(
        content: Vec<u32>,
        request: &PageRequest,
        total: u64,
        calls: &AtomicUsize,
    ) -> Page<u32> {
        Page::assemble(content, request, move || async move {
            calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok::<_, Infallible>(total)
        })
        .await
        .unwrap()
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = PageRequest::new(0, 0);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("at least one"));
    }

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(request(0, 10).offset(), 0);
        assert_eq!(request(3, 10).offset(), 30);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2], &request(0, 2), 5);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.size, 2);
        assert_eq!(page.number, 0);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<u32> = Page::new(vec![], &request(0, 10), 0);

        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn first_partial_page_skips_count() {
        let calls = AtomicUsize::new(0);
        let page = assemble_counting(vec![1, 2, 3], &request(0, 10), 99, &calls).await;

        assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(page.total_elements, 3);
    }

    #[tokio::test]
    async fn last_partial_page_skips_count() {
        let calls = AtomicUsize::new(0);
        let page = assemble_counting(vec![1], &request(1, 3), 99, &calls).await;

        assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn full_page_runs_count() {
        let calls = AtomicUsize::new(0);
        let page = assemble_counting(vec![1, 2], &request(0, 2), 4, &calls).await;

        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(page.total_elements, 4);
    }

    #[tokio::test]
    async fn empty_page_past_the_end_runs_count() {
        let calls = AtomicUsize::new(0);
        let page = assemble_counting(vec![], &request(5, 2), 4, &calls).await;

        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(page.total_elements, 4);
    }

    #[tokio::test]
    async fn count_error_is_propagated() {
        let result: Result<Page<u32>, String> =
            Page::assemble(vec![1, 2], &request(0, 2), || async {
                Err("connection lost".to_string())
            })
            .await;

        assert_eq!(result.unwrap_err(), "connection lost");
    }

    #[test]
    fn parse_order_with_direction() {
        let order: Order = "username,desc".parse().unwrap();

        assert_eq!(order, Order::desc(MemberSortProperty::Username));
    }

    #[test]
    fn parse_order_defaults_to_ascending() {
        let order: Order = "teamName".parse().unwrap();

        assert_eq!(order, Order::asc(MemberSortProperty::TeamName));
    }

    #[test]
    fn parse_order_rejects_unknown_property() {
        let result = "password,asc".parse::<Order>();

        assert!(result.unwrap_err().contains("Unknown sort property"));
    }

    #[test]
    fn parse_order_rejects_unknown_direction() {
        assert!("age,sideways".parse::<Order>().is_err());
        assert!("age,asc,desc".parse::<Order>().is_err());
        assert!("".parse::<Order>().is_err());
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = Page::new(vec![1], &request(0, 5), 1);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["content"], serde_json::json!([1]));
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["size"], 5);
        assert_eq!(json["number"], 0);
    }
}
