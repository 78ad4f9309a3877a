use std::borrow::Cow;

/// Why a route could not be resolved.
///
/// The variants are checked in declaration order: registration first, then
/// the producer's output, then the requested type.
#[coord_derive::coord_error]
#[derive(Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No producer is registered for the route type.
    #[error("Unregistered route type{}: {route}", format_context(.context))]
    UnregisteredType { route: &'static str, context: Option<Cow<'static, str>> },

    /// The producer ran but yielded nothing for this particular route value.
    #[error("Producer returned no value{}: {route}", format_context(.context))]
    ProducerReturnedNil { route: &'static str, context: Option<Cow<'static, str>> },

    /// The produced value is not of the requested type.
    #[error(
        "Type mismatch{}: {route} produced a value that is not {expected}",
        format_context(.context)
    )]
    TypeMismatch {
        route: &'static str,
        expected: &'static str,
        context: Option<Cow<'static, str>>,
    },
}

impl ResolveError {
    /// Type name of the route that failed.
    #[must_use]
    pub const fn route(&self) -> &'static str {
        match self {
            Self::UnregisteredType { route, .. }
            | Self::ProducerReturnedNil { route, .. }
            | Self::TypeMismatch { route, .. } => *route,
        }
    }
}
