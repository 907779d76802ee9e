use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use std::fmt;
use std::fmt::Formatter;

pub mod books;

/// 도서 검색 API 호출 중 발생한 에러
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// 요청 URL을 만들 수 없음 (잘못된 호스트 등)
    InvalidUrl(String),

    /// 연결 실패, 타임아웃 등 응답을 받지 못함
    RequestFailed(String),

    /// 200 이외의 상태 코드를 받음
    UnexpectedStatus(u16),

    /// 응답 본문이 JSON 스키마와 맞지 않음
    ResponseParseFailed(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidUrl(s) => write!(f, "Invalid request url: {}", s),
            ClientError::RequestFailed(s) => write!(f, "Request failed: {}", s),
            ClientError::UnexpectedStatus(status) => write!(f, "Unexpected status: {}", status),
            ClientError::ResponseParseFailed(s) => write!(f, "Failed to parse response: {}", s),
        }
    }
}

impl std::error::Error for ClientError {}

/// 검색 결과 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Title,
    Author,
}

impl SortBy {
    /// 대소문자를 구분하지 않고 `title`, `author`만 허용한다.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("title") {
            Some(SortBy::Title)
        } else if s.eq_ignore_ascii_case("author") {
            Some(SortBy::Author)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Title => "title",
            SortBy::Author => "author",
        }
    }
}

/// 검증을 통과한 검색 요청
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    host: String,
    port: u16,
    query: String,
    page: u32,
    sort_by: SortBy,
}

impl Request {
    pub fn new(host: impl Into<String>, port: u16, query: impl Into<String>, page: u32, sort_by: SortBy) -> Self {
        Request {
            host: host.into(),
            port,
            query: query.into(),
            page,
            sort_by,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }
}

/// 검색 결과의 도서 한 권
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub title: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub author: String,

    /// 표지 이미지 URL
    #[serde(rename = "imageUrl", default)]
    #[serde_as(as = "DefaultOnNull")]
    pub image_url: String,
}

/// 검색 API 응답
///
/// # Description
/// `books`가 없거나 `null`이면 빈 목록으로, `numberOfPages`가 없거나 `null`이면 0으로 처리한다.
/// `numberOfPages`는 서버가 준 값 그대로이며 `books`의 개수와 비교하지 않는다.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BooksResponse {
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub books: Vec<Book>,

    #[serde(rename = "numberOfPages", default)]
    #[serde_as(as = "DefaultOnNull")]
    pub number_of_pages: i32,
}

pub trait Client {
    fn get_books(&self, request: &Request) -> Result<BooksResponse, ClientError>;
}

impl<T: Client + ?Sized> Client for &T {
    fn get_books(&self, request: &Request) -> Result<BooksResponse, ClientError> {
        (**self).get_books(request)
    }
}
