//! Live progress lines.
//!
//! One colored line per classified response, written to stdout as soon as
//! the response is classified:
//!
//! ```text
//! 200 GET 5120w http://example.com
//! 301 GET 0w http://example.com => http://example.com/login
//! ```

use crate::net::HttpResponse;
use crate::probe::{resolve_redirect, size_text, StatusClass};
use console::style;

const METHOD: &str = "GET";

/// Render the live line for `response`, or `None` if it is not recorded.
pub fn live_line(response: &HttpResponse) -> Option<String> {
    let class = StatusClass::of(response.status)?;
    let code = style(response.status.as_str());
    let code = match class {
        StatusClass::Success => code.green(),
        StatusClass::Redirect => code.blue(),
        StatusClass::ClientError => code.magenta(),
        StatusClass::ServerError => code.yellow(),
    };

    let line = format!(
        "{} {} {} {}",
        code,
        METHOD,
        style(size_text(response.body_size)).dim(),
        response.url
    );

    if class != StatusClass::Redirect {
        return Some(line);
    }

    let location = response.location.as_deref().unwrap_or_default();
    Some(format!(
        "{} => {}",
        line,
        style(resolve_redirect(&response.url, location)).cyan()
    ))
}

/// Print the live line for `response` to stdout.
pub fn print_live(response: &HttpResponse) {
    if let Some(line) = live_line(response) {
        println!("{}", line);
    }
}
