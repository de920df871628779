//! The two-step lookup: fuzzy name match, then printings.

use crate::models::{Card, PrintList};
use crate::sources::{CardSource, SourceError};

/// Why a lookup failed
///
/// The display text of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The name-match request did not succeed
    #[error("Carta no encontrada")]
    NotFound(#[source] SourceError),

    /// The printings request did not succeed
    #[error("Error al buscar impresiones")]
    PrintsFetchFailed(#[source] SourceError),

    /// Network failure or malformed payload
    #[error("Error desconocido al buscar la carta.")]
    Unknown(#[source] SourceError),
}

impl LookupError {
    /// Underlying source error
    pub fn cause(&self) -> &SourceError {
        match self {
            LookupError::NotFound(e) | LookupError::PrintsFetchFailed(e) | LookupError::Unknown(e) => e,
        }
    }
}

/// Look up the best match for `query` and all of its printings.
///
/// The printings request is only issued once the name match succeeded, using
/// the URI carried by the matched card.
pub async fn fetch_card_with_prints<S>(
    source: &S,
    query: &str,
) -> Result<(Card, PrintList), LookupError>
where
    S: CardSource + ?Sized,
{
    let card = source.named_fuzzy(query).await.map_err(|e| {
        if e.is_rejection() {
            LookupError::NotFound(e)
        } else {
            LookupError::Unknown(e)
        }
    })?;

    tracing::debug!(query, card = %card.name, "matched card, fetching printings");

    let prints = source
        .prints(&card.prints_search_uri)
        .await
        .map_err(|e| {
            if e.is_rejection() {
                LookupError::PrintsFetchFailed(e)
            } else {
                LookupError::Unknown(e)
            }
        })?;

    Ok((card, prints))
}
