use crate::provider::api::BooksResponse;
use std::io;
use std::io::Write;

const USAGE: &'static str = "Usage Instructions:
--help - Output a usage message and exit.
-s, --search TERMS - The terms to search for. If TERMS contains spaces, it must be fully quoted.
--sort FIELD - Where FIELD is one of \"author\" or \"title\". Sorts the results by the specified field. Defaults to title.
-p NUMBER - Display the NUMBER page of results. Defaults to 1.
-h, --host HOSTNAME - The hostname or ip address where the server can be found. Defaults to 127.0.0.1.
";

pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(USAGE.as_bytes())
}

/// 요청한 페이지 번호와 서버가 알려준 전체 페이지 수를 먼저 출력하고, 도서는 받은 순서대로 출력한다.
pub fn render<W: Write>(out: &mut W, page: u32, response: &BooksResponse) -> io::Result<()> {
    writeln!(out, "Results (Page {} of {}):", page, response.number_of_pages)?;
    for book in &response.books {
        write!(out, "Title: {}\n Author: {}\n Image: {}\n\n", book.title, book.author, book.image_url)?;
    }
    out.flush()
}
