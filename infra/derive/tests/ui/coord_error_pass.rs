use coord_derive::coord_error;
use std::borrow::Cow;

#[coord_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing route{}: {route}", format_context(.context))]
    Missing { route: &'static str, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    std::fs::read_to_string("/definitely/not/here").context("Reading fixture")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.variant_name(), "Io");

    let err: DemoError = "boom".into();
    assert_eq!(err.variant_name(), "Internal");

    let err: Result<(), DemoError> =
        Err(DemoError::Missing { route: "Screen", context: None });
    let err = err.context("resolving home").unwrap_err();
    assert_eq!(err.to_string(), "Missing route (resolving home): Screen");
}
