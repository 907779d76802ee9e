use crate::provider;
use crate::provider::api::{BooksResponse, ClientError, Request};
use reqwest::blocking;
use reqwest::{StatusCode, Url};
use std::net::{IpAddr, Ipv6Addr};
use tracing::{debug, info};

/// 도서 검색 API 경로
pub const BOOKS_PATH: &'static str = "/books";

const BASE_URL: &'static str = "http://127.0.0.1";

/// 도서 검색 서버 클라이언트
///
/// # Description
/// 호출 한번에 요청 한번만 보내며 재시도 하지 않는다. 타임아웃은 reqwest 기본값을 따르고 시스템 프록시는 사용하지 않는다.
pub struct Client {
    http: blocking::Client,
}

impl Client {
    pub fn new() -> Result<Self, ClientError> {
        let http = blocking::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| ClientError::RequestFailed(format!("클라이언트 생성 실패: {}", e)))?;

        Ok(Client { http })
    }

    /// GET 요청을 보내고 200 응답의 본문을 반환한다. 그 외 상태 코드는 본문을 읽지 않는다.
    fn fetch(&self, url: Url) -> Result<String, ClientError> {
        let response = self.http.get(url)
            .send()
            .map_err(|e| ClientError::RequestFailed(format!("{:?}", e)))?;

        let status = response.status();
        info!(status = status.as_u16(), "response received");
        if status != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        response.text()
            .map_err(|e| ClientError::RequestFailed(format!("{:?}", e)))
    }
}

impl provider::api::Client for Client {
    fn get_books(&self, request: &Request) -> Result<BooksResponse, ClientError> {
        let url = build_search_url(request)?;
        debug!(%url, "searching books");

        let body = self.fetch(url)?;
        let response = decode(&body)?;
        info!(books = response.books.len(), pages = response.number_of_pages, "response decoded");

        Ok(response)
    }
}

/// `http://{host}:{port}/books?query=..&page=..&sortBy=..` 형태의 URL을 만든다.
///
/// # Description
/// 쿼리 값은 각각 인코딩 되므로 검색어에 `&`, `=`, `%`, 비ASCII 문자가 있어도 하나의 값으로 유지된다.
pub fn build_search_url(request: &Request) -> Result<Url, ClientError> {
    let mut url = Url::parse(BASE_URL)
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

    // 괄호 없는 IPv6 주소는 URL 문법상 호스트로 쓸 수 없으므로 IP로 직접 설정한다.
    match request.host().parse::<Ipv6Addr>() {
        Ok(ip) => url.set_ip_host(IpAddr::V6(ip))
            .map_err(|_| ClientError::InvalidUrl(format!("HOST: {}", request.host())))?,
        Err(_) => url.set_host(Some(request.host()))
            .map_err(|e| ClientError::InvalidUrl(format!("HOST: {}, ERROR: {}", request.host(), e)))?,
    }
    url.set_port(Some(request.port()))
        .map_err(|_| ClientError::InvalidUrl(format!("PORT: {}", request.port())))?;
    url.set_path(BOOKS_PATH);

    url.query_pairs_mut()
        .append_pair("query", request.query())
        .append_pair("page", &request.page().to_string())
        .append_pair("sortBy", request.sort_by().as_str());

    Ok(url)
}

pub fn decode(body: &str) -> Result<BooksResponse, ClientError> {
    serde_json::from_str::<BooksResponse>(body)
        .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
}
