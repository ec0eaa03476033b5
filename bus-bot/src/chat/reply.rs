//! Replies sent back to the user.

use serde::Serialize;

const HELP: &str = "¡Hola! Soy un bot que te ayuda a encontrar horarios de micros. \
Podés preguntar cosas como: 'Quiero llegar a la facultad a las 15:00', \
'Dame el listado completo de micros antes de las 19:00' o \
'Dame los horarios del micro ruta 60'.";

const NOT_UNDERSTOOD: &str =
    "Lo siento, no entendí tu solicitud. Por favor, sé más específico.";

const NO_MATCHES: &str = "No se encontraron micros que se ajusten a tu búsqueda. \
Intentá con otra hora o modificá tu solicitud.";

const INTERNAL_ERROR: &str = "Lo siento, hubo un error al procesar tu solicitud. \
Por favor, intentá de nuevo más tarde.";

/// Exactly one of these answers every incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Usage message, for commands.
    Help,
    /// Formatted trip listing (Markdown).
    Schedule(String),
    /// The message could not be turned into an intent.
    NotUnderstood,
    /// A valid question with no qualifying trips.
    NoMatches,
    /// Something unexpected went wrong.
    InternalError,
}

/// Machine-readable reply category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Help,
    Schedule,
    NotUnderstood,
    NoMatches,
    InternalError,
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Help => HELP,
            Reply::Schedule(listing) => listing,
            Reply::NotUnderstood => NOT_UNDERSTOOD,
            Reply::NoMatches => NO_MATCHES,
            Reply::InternalError => INTERNAL_ERROR,
        }
    }

    pub fn kind(&self) -> ReplyKind {
        match self {
            Reply::Help => ReplyKind::Help,
            Reply::Schedule(_) => ReplyKind::Schedule,
            Reply::NotUnderstood => ReplyKind::NotUnderstood,
            Reply::NoMatches => ReplyKind::NoMatches,
            Reply::InternalError => ReplyKind::InternalError,
        }
    }
}
