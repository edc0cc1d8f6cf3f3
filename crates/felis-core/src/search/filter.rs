use crate::catalog::Breed;

/// True for the distinguished "show everything" query.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Returns the breeds whose name, origin or temperament contains `query`.
///
/// Matching is case-insensitive on the trimmed query. A blank query returns
/// the whole collection. Output keeps the input order.
pub fn filter_breeds(breeds: &[Breed], query: &str) -> Vec<Breed> {
    if is_blank_query(query) {
        return breeds.to_vec();
    }

    let needle = query.trim().to_lowercase();
    breeds
        .iter()
        .filter(|breed| breed.matches(&needle))
        .cloned()
        .collect()
}
