//! A hydrated, displayable deck card.

use chrono::NaiveDate;
use serde::Serialize;

use dorama_catalog::DramaDetail;
use dorama_core::types::DramaId;

/// One card in the swipe deck, in display order.
///
/// Carries only what the card face and the list-write payload need;
/// the full provider record stays in the detail cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckItem {
    /// Zero-based position within the deck.
    pub position: usize,
    pub drama_id: DramaId,
    pub title: String,
    pub poster_path: Option<String>,
    pub first_air_date: Option<NaiveDate>,
    /// Provider rating on the 0-10 scale.
    pub rating: Option<f64>,
    pub episode_count: Option<i32>,
}

impl DeckItem {
    pub fn from_detail(detail: &DramaDetail, position: usize) -> Self {
        Self {
            position,
            drama_id: detail.id,
            title: detail.name.clone(),
            poster_path: detail.poster_path.clone(),
            first_air_date: detail.first_air_date,
            rating: detail.vote_average,
            episode_count: detail.number_of_episodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> DramaDetail {
        serde_json::from_str(
            r#"{
                "id": 93405,
                "name": "Squid Game",
                "poster_path": "/dDlEmu3EZ0Pgg93K2SVNLCjCSvE.jpg",
                "first_air_date": "2021-09-17",
                "vote_average": 7.8,
                "number_of_episodes": 17,
                "overview": "Hundreds of cash-strapped players..."
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn maps_detail_fields_onto_card() {
        let item = DeckItem::from_detail(&detail(), 4);

        assert_eq!(item.position, 4);
        assert_eq!(item.drama_id, 93405);
        assert_eq!(item.title, "Squid Game");
        assert_eq!(item.poster_path.as_deref(), Some("/dDlEmu3EZ0Pgg93K2SVNLCjCSvE.jpg"));
        assert_eq!(item.first_air_date, NaiveDate::from_ymd_opt(2021, 9, 17));
        assert_eq!(item.rating, Some(7.8));
        assert_eq!(item.episode_count, Some(17));
    }

    #[test]
    fn sparse_detail_leaves_optional_fields_empty() {
        let sparse: DramaDetail =
            serde_json::from_str(r#"{"id": 100757, "name": "Extraordinary Attorney Woo"}"#)
                .unwrap();
        let item = DeckItem::from_detail(&sparse, 0);

        assert_eq!(item.poster_path, None);
        assert_eq!(item.first_air_date, None);
        assert_eq!(item.rating, None);
        assert_eq!(item.episode_count, None);
    }
}
