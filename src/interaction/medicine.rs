//! Medicine search widget, with a demo catalogue fallback.

use tracing::instrument;

use crate::{
    base::demo::{DEMO_MEDICINE_LINES, DEMO_NOTE},
    base::types::Medicine,
    service::portal::PortalClient,
};

use super::{ListItem, Listing, Outcome, attempt};

/// Look up a medicine's stock.
///
/// A blank query is ignored: no request is made and nothing is rendered.
#[instrument(skip(portal))]
pub async fn check_medicine(portal: &PortalClient, query: &str) -> Option<Outcome<Listing>> {
    let query = query.trim();

    if query.is_empty() {
        return None;
    }

    let outcome = attempt("Medicine search", portal.search_medicines(query), render, || Listing::demo(DEMO_MEDICINE_LINES, DEMO_NOTE)).await;

    Some(outcome)
}

fn render(medicines: Vec<Medicine>) -> Listing {
    if medicines.is_empty() {
        return Listing(vec![ListItem::new("No results found.")]);
    }

    Listing(
        medicines
            .into_iter()
            .map(|m| ListItem::new(format!("{} — Stock: {} (Location: {})", m.name, m.stock, m.location)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        assert_eq!(check_medicine(&PortalClient::offline(), "   ").await, None);
    }

    #[tokio::test]
    async fn test_offline_shows_demo_list() {
        let outcome = check_medicine(&PortalClient::offline(), "para").await.unwrap();

        assert!(outcome.is_demo());
        assert_eq!(
            outcome.view().texts(),
            vec!["Paracetamol 500mg — Stock: 125 (Pharmacy A)", "Ibuprofen 200mg — Stock: 60 (Pharmacy B)", "[Demo data – connect to backend later]"]
        );
        assert!(outcome.view().items()[2].muted);
    }

    #[test]
    fn test_render_formats_rows() {
        let listing = render(vec![Medicine {
            name: "Cetirizine 10mg".into(),
            stock: 210,
            location: "Pharmacy C".into(),
        }]);

        assert_eq!(listing.texts(), vec!["Cetirizine 10mg — Stock: 210 (Location: Pharmacy C)"]);
    }

    #[test]
    fn test_render_empty_result() {
        assert_eq!(render(vec![]).texts(), vec!["No results found."]);
    }
}
