use crate::argument::{Argument, ArgumentError, Command, ValidationError};
use crate::provider::api::{Client, ClientError, Request};
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::io::Write;

pub mod argument;
pub mod configs;
pub mod presenter;
pub mod provider;

/// 검색 한번의 실행 중 발생할 수 있는 모든 에러
///
/// # Description
/// `Display`는 사용자에게 보여줄 메시지 블록을 출력하고, 각 분류별 종료 코드는 [`Error::exit_code`]로 구한다.
#[derive(Debug)]
pub enum Error {
    Usage(ArgumentError),
    Validation(ValidationError),
    Client(ClientError),

    /// 검색 결과를 출력하지 못함
    Output(io::Error),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Output(_) => 1,
            Error::Usage(_) => 2,
            Error::Validation(_) => 3,
            Error::Client(ClientError::InvalidUrl(_)) => 4,
            Error::Client(ClientError::RequestFailed(_)) => 5,
            Error::Client(ClientError::UnexpectedStatus(_)) => 6,
            Error::Client(ClientError::ResponseParseFailed(_)) => 7,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(e) => write!(f, "{}", e),
            Error::Validation(e) => write!(f, "{}", e),
            Error::Client(ClientError::InvalidUrl(detail)) => {
                write!(f, "An error occurred. Please try again.\nError data: {}", detail)
            }
            Error::Client(ClientError::RequestFailed(detail)) => write!(
                f,
                "Failed to successfully retrieve a response from the server. Please try again.\nError data: {}",
                detail
            ),
            Error::Client(ClientError::UnexpectedStatus(status)) => write!(
                f,
                "An error was received from the server. Please try again. (status: {})",
                status
            ),
            Error::Client(ClientError::ResponseParseFailed(detail)) => write!(
                f,
                "Failed to successfully parse the response from the server. Please try again.\nError data: {}",
                detail
            ),
            Error::Output(e) => write!(f, "Failed to print the results: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Usage(e) => Some(e),
            Error::Validation(e) => Some(e),
            Error::Client(e) => Some(e),
            Error::Output(e) => Some(e),
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Error::Usage(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<ClientError> for Error {
    fn from(e: ClientError) -> Self {
        Error::Client(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Output(e)
    }
}

/// 프로그램 이름을 제외한 인자들로 검색을 실행하고 결과를 `out`에 출력한다.
pub fn run<W: Write>(tokens: &[String], out: &mut W) -> Result<(), Error> {
    run_with_client(tokens, provider::api::books::Client::new, out)
}

/// 인자 해석, 검증, 검색, 출력 순으로 실행한다. 어느 단계든 실패하면 이후 단계는 실행 되지 않는다.
///
/// # Description
/// 클라이언트는 검증을 통과한 뒤에만 `connect`로 생성 되므로 `--help`나 검증 실패 시에는 만들어지지 않는다.
pub fn run_with_client<C, F, W>(tokens: &[String], connect: F, out: &mut W) -> Result<(), Error>
where
    C: Client,
    F: FnOnce() -> Result<C, ClientError>,
    W: Write,
{
    match Argument::parse(tokens)? {
        Command::Help => presenter::print_help(out)?,
        Command::Search(argument) => {
            let request = argument.validate()?;
            let client = connect()?;
            search(&client, &request, out)?;
        }
    }
    Ok(())
}

pub fn search<C: Client, W: Write>(client: &C, request: &Request, out: &mut W) -> Result<(), Error> {
    let response = client.get_books(request)?;
    presenter::render(out, request.page(), &response)?;
    Ok(())
}
