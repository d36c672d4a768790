//! Bylines for bibliography entries

use crate::models::{Authorship, Publication};

/// Byline used when a publication lists no authors
pub const ANONYMOUS: &str = "Anónimo";

/// Lead author: the authorship marked `first`, else the first one listed
pub fn lead_author(authorships: &[Authorship]) -> Option<(usize, &Authorship)> {
    authorships
        .iter()
        .enumerate()
        .find(|(_, a)| a.is_lead())
        .or_else(|| authorships.first().map(|a| (0, a)))
}

/// Render the author line for a publication
///
/// * no authors: `Anónimo`
/// * one or two: names joined with `, `, lead author first
/// * three or more: `<lead> et al.`
pub fn format_byline(publication: &Publication) -> String {
    let authorships = &publication.authorships;
    let Some((lead_index, lead)) = lead_author(authorships) else {
        return ANONYMOUS.to_string();
    };

    if authorships.len() >= 3 {
        return format!("{} et al.", lead.raw_author_name);
    }

    std::iter::once(lead)
        .chain(
            authorships
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != lead_index)
                .map(|(_, a)| a),
        )
        .map(|a| a.raw_author_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Byline followed by the publication year, for detail views
pub fn format_byline_with_year(publication: &Publication) -> String {
    let byline = format_byline(publication);
    match publication.pub_year {
        Some(year) => format!("{}, {}", byline, year),
        None => byline,
    }
}
