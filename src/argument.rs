use crate::provider::api::{Request, SortBy};
use std::fmt;
use std::fmt::Formatter;

pub const DEFAULT_HOST: &'static str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SORT: &'static str = "title";
pub const DEFAULT_PAGE: i32 = 1;

/// 커맨드 라인 인자 해석 중 발생한 에러
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// 값이 필요한 플래그가 마지막 토큰으로 입력됨
    MissingValue(String),

    /// `-p`의 값이 정수가 아님
    InvalidPage(String),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::MissingValue(flag) => write!(f, "Missing value for {}.", flag),
            ArgumentError::InvalidPage(value) => {
                write!(f, "Page {} was not a valid number. Please re-enter and try again.", value)
            }
        }
    }
}

impl std::error::Error for ArgumentError {}

/// 검색 파라미터 검증 규칙 위반 항목
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    MissingSearchTerms,
    InvalidSortField(String),
    NonPositivePage(i32),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingSearchTerms => write!(f, "Please enter search terms."),
            Violation::InvalidSortField(_) => write!(f, "Sort By must be \"title\" or \"author\"."),
            Violation::NonPositivePage(_) => write!(f, "Page must be greater than 0."),
        }
    }
}

/// 검증에 실패한 모든 규칙을 담는다. 첫번째 위반에서 멈추지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "The following errors have occurred:")?;
        for violation in &self.violations {
            write!(f, "\n{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// 인자 해석 결과
#[derive(Debug, PartialEq)]
pub enum Command {
    /// `--help`가 입력됨. 나머지 인자는 무시된다.
    Help,
    Search(Argument),
}

/// 기본값이 적용된 커맨드 라인 옵션
///
/// # Description
/// 검증 이전의 값으로 [`Argument::validate`]를 통과해야만 [`Request`]로 변환된다.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    host: String,
    port: u16,
    search: Option<String>,
    sort_by: String,
    page: i32,
}

impl Argument {
    pub fn builder() -> ArgumentBuilder {
        ArgumentBuilder::new()
    }

    /// 프로그램 이름을 제외한 토큰들을 왼쪽부터 순서대로 해석한다.
    ///
    /// # Description
    /// 플래그 이름은 대소문자를 구분하지 않고 값은 입력된 그대로 사용한다.
    /// 같은 플래그가 여러번 입력되면 마지막 값이 사용되며, 알 수 없는 토큰은 무시된다.
    pub fn parse(tokens: &[String]) -> Result<Command, ArgumentError> {
        let mut builder = Argument::builder();
        let mut tokens = tokens.iter();

        while let Some(token) = tokens.next() {
            let flag = token.to_lowercase();
            match flag.as_str() {
                "--help" => return Ok(Command::Help),
                "-s" | "--search" => {
                    builder = builder.search(next_value(&mut tokens, token)?);
                }
                "--sort" => {
                    builder = builder.sort_by(next_value(&mut tokens, token)?);
                }
                "-p" => {
                    let value = next_value(&mut tokens, token)?;
                    let page = value.parse::<i32>()
                        .map_err(|_| ArgumentError::InvalidPage(value.clone()))?;
                    builder = builder.page(page);
                }
                "-h" | "--host" => {
                    builder = builder.host(next_value(&mut tokens, token)?);
                }
                _ => {}
            }
        }

        Ok(Command::Search(builder.build()))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn page(&self) -> i32 {
        self.page
    }

    /// 모든 검증 규칙을 확인하고 통과하면 요청 정보로 변환한다.
    pub fn validate(self) -> Result<Request, ValidationError> {
        let mut violations = Vec::new();

        if self.search.is_none() {
            violations.push(Violation::MissingSearchTerms);
        }
        let sort_by = SortBy::parse(&self.sort_by);
        if sort_by.is_none() {
            violations.push(Violation::InvalidSortField(self.sort_by.clone()));
        }
        if self.page <= 0 {
            violations.push(Violation::NonPositivePage(self.page));
        }

        match (self.search, sort_by, u32::try_from(self.page)) {
            (Some(query), Some(sort_by), Ok(page)) => {
                Ok(Request::new(self.host, self.port, query, page, sort_by))
            }
            _ => Err(ValidationError { violations }),
        }
    }
}

fn next_value<'a>(
    tokens: &mut impl Iterator<Item = &'a String>,
    flag: &str
) -> Result<String, ArgumentError> {
    tokens.next()
        .cloned()
        .ok_or_else(|| ArgumentError::MissingValue(flag.to_owned()))
}

/// [`Argument`] 빌더로 setter는 이전 값을 덮어쓴다.
pub struct ArgumentBuilder {
    host: String,
    search: Option<String>,
    sort_by: String,
    page: i32,
}

impl ArgumentBuilder {
    pub fn new() -> Self {
        ArgumentBuilder {
            host: DEFAULT_HOST.to_owned(),
            search: None,
            sort_by: DEFAULT_SORT.to_owned(),
            page: DEFAULT_PAGE,
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    pub fn page(mut self, page: i32) -> Self {
        self.page = page;
        self
    }

    pub fn build(self) -> Argument {
        Argument {
            host: self.host,
            port: DEFAULT_PORT,
            search: self.search,
            sort_by: self.sort_by,
            page: self.page,
        }
    }
}

impl Default for ArgumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn parse_search(values: &[&str]) -> Argument {
        match Argument::parse(&tokens(values)) {
            Ok(Command::Search(argument)) => argument,
            other => panic!("expected search command, got {:?}", other),
        }
    }

    #[test]
    fn defaults_are_applied() {
        let argument = parse_search(&[]);

        assert_eq!(argument.host(), "127.0.0.1");
        assert_eq!(argument.port(), 8080);
        assert_eq!(argument.search(), None);
        assert_eq!(argument.sort_by(), "title");
        assert_eq!(argument.page(), 1);
    }

    #[test]
    fn all_flags_are_read() {
        let argument = parse_search(&["-s", "design patterns", "--sort", "author", "-p", "2", "-h", "10.0.0.5"]);

        assert_eq!(argument.search(), Some("design patterns"));
        assert_eq!(argument.sort_by(), "author");
        assert_eq!(argument.page(), 2);
        assert_eq!(argument.host(), "10.0.0.5");
    }

    #[test]
    fn flag_names_ignore_case_but_values_are_verbatim() {
        let argument = parse_search(&["--SEARCH", "Rust Book", "--Sort", "AUTHOR", "-P", "3", "--HOST", "Example.COM"]);

        assert_eq!(argument.search(), Some("Rust Book"));
        assert_eq!(argument.sort_by(), "AUTHOR");
        assert_eq!(argument.page(), 3);
        assert_eq!(argument.host(), "Example.COM");
    }

    #[test]
    fn last_occurrence_wins() {
        let argument = parse_search(&["-s", "first", "--search", "second", "-p", "4", "-p", "5"]);

        assert_eq!(argument.search(), Some("second"));
        assert_eq!(argument.page(), 5);
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let argument = parse_search(&["--verbose", "-s", "dune", "stray"]);

        assert_eq!(argument.search(), Some("dune"));
    }

    #[test]
    fn help_stops_processing() {
        assert_eq!(Argument::parse(&tokens(&["--HELP", "-p", "abc"])), Ok(Command::Help));
        assert_eq!(Argument::parse(&tokens(&["-s", "dune", "--help"])), Ok(Command::Help));
    }

    #[test]
    fn help_as_a_flag_value_is_taken_verbatim() {
        let argument = parse_search(&["-s", "--help"]);

        assert_eq!(argument.search(), Some("--help"));
    }

    #[test]
    fn malformed_page_is_usage_error() {
        let result = Argument::parse(&tokens(&["-s", "dune", "-p", "two"]));

        assert_eq!(result, Err(ArgumentError::InvalidPage("two".to_string())));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Page two was not a valid number. Please re-enter and try again."
        );
    }

    #[test]
    fn flag_without_value_is_usage_error() {
        for flag in ["-s", "--search", "--sort", "-p", "-h", "--host"] {
            let result = Argument::parse(&tokens(&[flag]));
            assert_eq!(result, Err(ArgumentError::MissingValue(flag.to_string())));
        }
    }

    #[test]
    fn non_positive_pages_are_rejected() {
        for page in [0, -1, i32::MIN] {
            let err = Argument::builder().search("dune").page(page).build()
                .validate()
                .unwrap_err();
            assert_eq!(err.violations(), &[Violation::NonPositivePage(page)]);
            assert!(err.to_string().contains("Page must be greater than 0."));
        }
    }

    #[test]
    fn positive_pages_pass() {
        for page in [1, 2, i32::MAX] {
            let request = Argument::builder().search("dune").page(page).build()
                .validate()
                .unwrap();
            assert_eq!(request.page(), page as u32);
        }
    }

    #[test]
    fn sort_field_is_checked_ignoring_case() {
        for sort in ["Title", "AUTHOR", "author", "title"] {
            let result = Argument::builder().search("dune").sort_by(sort).build().validate();
            assert!(result.is_ok(), "{} should pass", sort);
        }

        let err = Argument::builder().search("dune").sort_by("isbn").build()
            .validate()
            .unwrap_err();
        assert_eq!(err.violations(), &[Violation::InvalidSortField("isbn".to_string())]);
    }

    #[test]
    fn sort_field_is_canonicalized() {
        let request = Argument::builder().search("dune").sort_by("AUTHOR").build()
            .validate()
            .unwrap();

        assert_eq!(request.sort_by(), SortBy::Author);
        assert_eq!(request.sort_by().as_str(), "author");
    }

    #[test]
    fn missing_search_terms_are_rejected() {
        let err = Argument::builder().build().validate().unwrap_err();

        assert_eq!(err.violations(), &[Violation::MissingSearchTerms]);
    }

    #[test]
    fn every_violation_is_reported() {
        let err = Argument::builder().sort_by("price").page(0).build()
            .validate()
            .unwrap_err();

        assert_eq!(err.violations().len(), 3);
        assert_eq!(
            err.to_string(),
            "The following errors have occurred:\n\
             Please enter search terms.\n\
             Sort By must be \"title\" or \"author\".\n\
             Page must be greater than 0."
        );
    }
}
