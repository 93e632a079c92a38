use crate::{Candidate, Offer, OfferStatus};

/// Filtro duro previo al scoring, para acotar los pares a evaluar.
///
/// Siempre restringe a ofertas activas. Si el candidato declara sector, exige
/// igualdad exacta (una oferta sin sector no iguala a ninguno). Un candidato
/// sin sector ve el pool activo completo: el perfil incompleto recibe
/// resultados, no una lista vacía.
pub fn filter_offers_for_candidate<'a>(
    candidate: &Candidate,
    offers: &'a [Offer],
) -> Vec<&'a Offer> {
    offers
        .iter()
        .filter(|offer| {
            if offer.status != OfferStatus::Active {
                return false;
            }
            match candidate.sector_id.as_deref() {
                Some(sector) => offer.sector_id.as_deref() == Some(sector),
                None => true,
            }
        })
        .collect()
}

/// Dirección simétrica: candidatos para una oferta. Una oferta con sector
/// exige igualdad; sin sector no restringe. Los candidatos no tienen estado
/// de publicación.
pub fn filter_candidates_for_offer<'a>(
    offer: &Offer,
    candidates: &'a [Candidate],
) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| match offer.sector_id.as_deref() {
            Some(sector) => candidate.sector_id.as_deref() == Some(sector),
            None => true,
        })
        .collect()
}
